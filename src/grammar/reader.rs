use std::io;

use crate::data::Parameter;
use crate::error::ParseError;

use super::chars::{is_linear_whitespace, is_quoted_text, is_space, is_text, is_token_char};
use super::scanner::Scanner;

/// Generic HTTP-style header value tokenizer.
///
/// Built on the [`Scanner`], it reads one value's worth of a comma or
/// semicolon delimited header at a time: tokens, quoted strings with
/// backslash escaping, `name=value` parameters and raw free-text runs.
/// Typed readers specialize it by supplying a value-reading function to
/// [`read_values`](Self::read_values).
#[derive(Debug)]
pub struct HeaderReader<'a> {
    scanner: Scanner<'a>,
}

impl<'a> HeaderReader<'a> {
    #[must_use]
    pub fn new(header: &'a str) -> Self {
        Self {
            scanner: Scanner::new(header),
        }
    }

    /// Reads the next character, advancing the cursor.
    pub fn read(&mut self) -> Option<char> {
        self.scanner.read()
    }

    /// Reads the next character without moving the cursor.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.scanner.peek()
    }

    /// Steps the cursor back one character.
    pub fn unread(&mut self) {
        self.scanner.unread();
    }

    /// Whether the cursor has consumed the whole header.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.scanner.is_at_end()
    }

    /// The current byte offset into the header.
    #[must_use]
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Repositions the cursor at a prior offset.
    pub fn set_position(&mut self, position: usize) {
        self.scanner.set_position(position);
    }

    /// Skips linear whitespace. Returns true if any was skipped.
    pub fn skip_spaces(&mut self) -> bool {
        let mut skipped = false;
        while self.scanner.peek().is_some_and(is_linear_whitespace) {
            self.scanner.read();
            skipped = true;
        }
        skipped
    }

    /// Skips the next value separator (comma), including surrounding
    /// spaces. Returns true if a separator was effectively skipped.
    pub fn skip_value_separator(&mut self) -> bool {
        self.skip_separator(',')
    }

    /// Skips the next parameter separator (semicolon), including
    /// surrounding spaces. Returns true if a separator was effectively
    /// skipped.
    pub fn skip_parameter_separator(&mut self) -> bool {
        self.skip_separator(';')
    }

    fn skip_separator(&mut self, separator: char) -> bool {
        self.skip_spaces();
        match self.scanner.read() {
            Some(c) if c == separator => {
                self.skip_spaces();
                true
            }
            Some(_) => {
                self.scanner.unread();
                false
            }
            None => false,
        }
    }

    /// Reads a maximal run of token characters. May be empty.
    pub fn read_token(&mut self) -> String {
        let mut token = String::new();
        while let Some(c) = self.scanner.read() {
            if is_token_char(c) {
                token.push(c);
            } else {
                self.scanner.unread();
                break;
            }
        }
        token
    }

    /// Reads a quoted string. The next character must be a double quote.
    ///
    /// A backslash escapes the following character; the backslash itself
    /// is dropped. Fails if end of input is reached before the closing
    /// quote.
    pub fn read_quoted_string(&mut self) -> Result<String, ParseError> {
        match self.scanner.read() {
            Some('"') => {}
            _ => {
                return Err(ParseError::malformed(
                    "a quoted string must start with a double quote",
                ));
            }
        }

        let mut buffer = String::new();
        loop {
            match self.scanner.read() {
                Some('"') => return Ok(buffer),
                Some('\\') => match self.scanner.read() {
                    Some(c) => buffer.push(c),
                    None => {
                        return Err(ParseError::malformed(
                            "unexpected end of input inside a quoted pair",
                        ));
                    }
                },
                Some(c) if is_quoted_text(c) => buffer.push(c),
                Some(c) => {
                    return Err(ParseError::malformed(format!(
                        "invalid character {c:?} inside a quoted string"
                    )));
                }
                None => {
                    return Err(ParseError::malformed(
                        "unexpected end of input inside a quoted string",
                    ));
                }
            }
        }
    }

    /// Reads a parameter value: a quoted string if the input starts with
    /// a double quote, otherwise a run of token characters. Returns
    /// `None` if neither is present.
    pub fn read_parameter_value(&mut self) -> Result<Option<String>, ParseError> {
        self.skip_spaces();
        match self.scanner.peek() {
            Some('"') => self.read_quoted_string().map(Some),
            Some(c) if is_token_char(c) => Ok(Some(self.read_token())),
            _ => Ok(None),
        }
    }

    /// Reads the next `name[=value]` pair as a [`Parameter`].
    ///
    /// A name with no `=` before a separator yields a parameter without a
    /// value (a bare flag). An empty name is a grammar violation.
    pub fn read_parameter(&mut self) -> Result<Parameter, ParseError> {
        self.skip_spaces();
        let name = self.read_token();
        if name.is_empty() {
            return Err(ParseError::malformed("parameter has no name"));
        }

        match self.scanner.read() {
            Some('=') => {
                let value = self.read_parameter_value()?.unwrap_or_default();
                Ok(Parameter::new(name, value))
            }
            Some(_) => {
                self.scanner.unread();
                Ok(Parameter::flag(name))
            }
            None => Ok(Parameter::flag(name)),
        }
    }

    /// Reads raw text up to the next top-level comma or end of input,
    /// with leading and trailing whitespace trimmed. The comma itself is
    /// not consumed. Returns `None` if nothing but whitespace remains.
    pub fn read_raw_value(&mut self) -> Option<String> {
        self.skip_spaces();
        let mut value = String::new();
        while let Some(c) = self.scanner.read() {
            if c == ',' {
                self.scanner.unread();
                break;
            }
            value.push(c);
        }

        value.truncate(value.trim_end_matches(is_linear_whitespace).len());
        if value.is_empty() { None } else { Some(value) }
    }

    /// Advances past the next occurrence of any of the given separators,
    /// treating quotes as ordinary characters. Used to resynchronize
    /// after a malformed atom, whose quoting cannot be trusted.
    pub(crate) fn skip_past_separator(&mut self, separators: &[char]) {
        while let Some(c) = self.scanner.read() {
            if separators.contains(&c) {
                break;
            }
        }
    }

    /// Reads every value of a multi-value header through `read_value`.
    ///
    /// `read_value` parses one atom, leaving the cursor before the
    /// terminating comma (or at end of input), and returns `Ok(None)` for
    /// an empty trailing atom. A malformed atom is reported at debug
    /// level and skipped up to the next top-level comma; reading then
    /// continues with the remaining atoms. Duplicate values are added
    /// only once.
    pub fn read_values<V, F>(&mut self, mut read_value: F) -> Vec<V>
    where
        V: PartialEq,
        F: FnMut(&mut Self) -> Result<Option<V>, ParseError>,
    {
        let mut values = Vec::new();
        self.skip_spaces();

        while self.scanner.peek().is_some() {
            let start = self.scanner.position();
            match read_value(self) {
                Ok(Some(value)) => {
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::debug!(%error, "skipping malformed header value");
                    self.scanner.set_position(start);
                    self.skip_past_separator(&[',']);
                }
            }

            self.skip_value_separator();
            self.skip_spaces();
            if self.scanner.position() == start {
                tracing::debug!("header value reader made no progress, stopping");
                break;
            }
        }

        values
    }

    /// Reads the metadata part of a preference entry: free text up to a
    /// comma, semicolon or end of input, with interior spaces ignored.
    pub(crate) fn read_metadata_name(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        while let Some(c) = self.scanner.read() {
            if c == ',' || c == ';' {
                self.scanner.unread();
                break;
            } else if is_space(c) || c == '\t' {
                // interior whitespace carries no meaning here
            } else if is_text(c) {
                name.push(c);
            } else {
                return Err(ParseError::malformed(format!(
                    "unexpected character {c:?} in metadata name"
                )));
            }
        }
        Ok(name)
    }
}

/// A raw `name: value` header line, as handed over by a transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader {
    name: String,
    value: String,
}

impl RawHeader {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parses a single header line. Returns `None` for an empty line or
    /// a bare CRLF, which mark the end of a header section.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.strip_suffix("\r\n").unwrap_or(line);
        if line.is_empty() {
            return Ok(None);
        }

        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::malformed("header line has no colon"))?;
        if name.is_empty() {
            return Err(ParseError::malformed("header line has an empty name"));
        }

        Ok(Some(Self::new(name, value.trim_matches([' ', '\t']))))
    }

    /// Reads a single header line from a byte stream, up to and
    /// including the CRLF. Returns `None` when the stream starts with a
    /// bare CRLF (end of headers). Source failures surface as read
    /// errors.
    pub fn read_from(source: &mut impl io::Read) -> Result<Option<Self>, ParseError> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];

        loop {
            if source.read(&mut byte)? == 0 {
                return Err(ParseError::malformed(
                    "unexpected end of stream inside a header line",
                ));
            }
            match byte[0] {
                b'\r' => {
                    if source.read(&mut byte)? == 0 || byte[0] != b'\n' {
                        return Err(ParseError::malformed(
                            "carriage return not followed by a line feed",
                        ));
                    }
                    break;
                }
                b => line.push(b),
            }
        }

        if line.is_empty() {
            return Ok(None);
        }

        // header lines are latin-1 on the wire
        let line: String = line.iter().map(|&b| b as char).collect();
        Self::parse(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token() {
        let mut reader = HeaderReader::new("gzip;q=0.5");
        assert_eq!(reader.read_token(), "gzip");
        assert_eq!(reader.peek(), Some(';'));
    }

    #[test]
    fn quoted_string_plain() {
        let mut reader = HeaderReader::new(r#""hello world""#);
        assert_eq!(reader.read_quoted_string().unwrap(), "hello world");
        assert!(reader.peek().is_none());
    }

    #[test]
    fn quoted_string_with_escapes() {
        let mut reader = HeaderReader::new(r#""a \"quote\" and a \\ slash""#);
        assert_eq!(
            reader.read_quoted_string().unwrap(),
            r#"a "quote" and a \ slash"#
        );
    }

    #[test]
    fn quoted_string_unterminated() {
        let mut reader = HeaderReader::new(r#""never ends"#);
        let err = reader.read_quoted_string().unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn parameter_with_value() {
        let mut reader = HeaderReader::new("charset=utf-8");
        let param = reader.read_parameter().unwrap();
        assert_eq!(param.name(), "charset");
        assert_eq!(param.value(), Some("utf-8"));
    }

    #[test]
    fn parameter_with_quoted_value() {
        let mut reader = HeaderReader::new(r#"title="a, b; c""#);
        let param = reader.read_parameter().unwrap();
        assert_eq!(param.name(), "title");
        assert_eq!(param.value(), Some("a, b; c"));
    }

    #[test]
    fn parameter_bare_flag() {
        let mut reader = HeaderReader::new("secure; other");
        let param = reader.read_parameter().unwrap();
        assert_eq!(param.name(), "secure");
        assert_eq!(param.value(), None);
    }

    #[test]
    fn parameter_without_name_is_an_error() {
        let mut reader = HeaderReader::new("=oops");
        assert!(reader.read_parameter().unwrap_err().is_malformed());
    }

    #[test]
    fn raw_value_trims_whitespace() {
        let mut reader = HeaderReader::new("  no-cache \t, next");
        assert_eq!(reader.read_raw_value().as_deref(), Some("no-cache"));
        assert!(reader.skip_value_separator());
        assert_eq!(reader.read_raw_value().as_deref(), Some("next"));
    }

    #[test]
    fn values_loop_recovers_from_malformed_atom() {
        let mut reader = HeaderReader::new("one, =bad, three");
        let values = reader.read_values(|r| {
            let token = r.read_token();
            if token.is_empty() {
                Err(ParseError::malformed("empty token"))
            } else {
                Ok(Some(token))
            }
        });
        assert_eq!(values, ["one", "three"]);
    }

    #[test]
    fn values_loop_deduplicates() {
        let mut reader = HeaderReader::new("a, b, a");
        let values = reader.read_values(|r| Ok(Some(r.read_token())));
        assert_eq!(values, ["a", "b"]);
    }

    #[test]
    fn raw_header_line() {
        let header = RawHeader::parse("Content-Type: text/html\r\n")
            .unwrap()
            .unwrap();
        assert_eq!(header.name(), "Content-Type");
        assert_eq!(header.value(), "text/html");
    }

    #[test]
    fn raw_header_end_of_section() {
        assert_eq!(RawHeader::parse("\r\n").unwrap(), None);
        assert_eq!(RawHeader::parse("").unwrap(), None);
    }

    #[test]
    fn raw_header_missing_colon() {
        assert!(RawHeader::parse("no colon here").unwrap_err().is_malformed());
    }

    #[test]
    fn raw_header_from_stream() {
        let mut bytes: &[u8] = b"Accept: text/html\r\n\r\n";
        let header = RawHeader::read_from(&mut bytes).unwrap().unwrap();
        assert_eq!(header.name(), "Accept");
        assert_eq!(header.value(), "text/html");
        assert_eq!(RawHeader::read_from(&mut bytes).unwrap(), None);
    }

    #[test]
    fn raw_header_stream_failure_is_a_read_error() {
        struct Failing;
        impl io::Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("connection reset"))
            }
        }
        let err = RawHeader::read_from(&mut Failing).unwrap_err();
        assert!(err.is_read());
    }
}
