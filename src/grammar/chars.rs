//! Character classes from the RFC 2616 header grammar.

/// Indicates if the given character is in the US-ASCII range.
#[must_use]
pub const fn is_ascii_char(c: char) -> bool {
    (c as u32) <= 127
}

/// Indicates if the given character is in the ISO Latin 1 range.
#[must_use]
pub const fn is_latin1_char(c: char) -> bool {
    (c as u32) <= 255
}

/// Indicates if the given character is a control character.
#[must_use]
pub const fn is_control(c: char) -> bool {
    (c as u32) <= 31 || (c as u32) == 127
}

/// Indicates if the given character is a space.
#[must_use]
pub const fn is_space(c: char) -> bool {
    c == ' '
}

/// Indicates if the given character is linear whitespace: a space,
/// horizontal tab, carriage return or line feed.
#[must_use]
pub const fn is_linear_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Indicates if the given character is one of the RFC 2616 separators.
#[must_use]
pub const fn is_separator(c: char) -> bool {
    matches!(
        c,
        '(' | ')'
            | '<'
            | '>'
            | '@'
            | ','
            | ';'
            | ':'
            | '\\'
            | '"'
            | '/'
            | '['
            | ']'
            | '?'
            | '='
            | '{'
            | '}'
            | ' '
            | '\t'
    )
}

/// Indicates if the given character is legal inside an HTTP token.
#[must_use]
pub const fn is_token_char(c: char) -> bool {
    is_ascii_char(c) && !is_control(c) && !is_separator(c)
}

/// Indicates if the given character is textual (Latin 1 and not a
/// control character, horizontal tab excepted).
#[must_use]
pub const fn is_text(c: char) -> bool {
    c == '\t' || (is_latin1_char(c) && !is_control(c))
}

/// Indicates if the given character may appear unescaped inside a
/// quoted string.
#[must_use]
pub const fn is_quoted_text(c: char) -> bool {
    is_text(c) && c != '"' && c != '\\'
}

/// Indicates if the given string is a valid non-empty HTTP token.
#[must_use]
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}
