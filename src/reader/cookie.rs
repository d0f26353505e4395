use crate::data::Cookie;
use crate::error::ParseError;
use crate::grammar::HeaderReader;

/// Reads every cookie from a request `Cookie` header value.
///
/// Pairs are separated by `;` or `,`. Names starting with `$` are
/// RFC 2965 attributes rather than cookies: a leading `$Version`
/// governs the whole list, while `$Path` and `$Domain` apply to the
/// cookie read just before them. A malformed pair is reported at debug
/// level and skipped; the remaining pairs are still read.
#[must_use]
pub fn read_cookies(header: &str) -> Vec<Cookie> {
    let mut reader = HeaderReader::new(header);
    let mut cookies: Vec<Cookie> = Vec::new();
    let mut version = 0u32;

    reader.skip_spaces();
    while reader.peek().is_some() {
        let start = reader.position();
        match read_pair(&mut reader) {
            Ok(Some((name, value))) => {
                if let Some(attribute) = name.strip_prefix('$') {
                    apply_attribute(attribute, value, &mut version, &mut cookies);
                } else {
                    let cookie = Cookie::new(name, value.unwrap_or_default()).with_version(version);
                    if !cookies.contains(&cookie) {
                        cookies.push(cookie);
                    }
                }
            }
            Ok(None) => {}
            Err(error) => {
                tracing::debug!(%error, "skipping malformed cookie pair");
                reader.set_position(start);
                reader.skip_past_separator(&[';', ',']);
            }
        }

        skip_pair_separator(&mut reader);
        if reader.position() == start {
            tracing::debug!("cookie reader made no progress, stopping");
            break;
        }
    }

    cookies
}

fn apply_attribute(
    attribute: &str,
    value: Option<String>,
    version: &mut u32,
    cookies: &mut [Cookie],
) {
    if attribute.eq_ignore_ascii_case("version") {
        match value.as_deref().map(str::parse) {
            Some(Ok(v)) => {
                *version = v;
                for cookie in cookies.iter_mut() {
                    cookie.set_version(v);
                }
            }
            _ => tracing::debug!("ignoring cookie $Version with a non-numeric value"),
        }
    } else if attribute.eq_ignore_ascii_case("path") {
        match cookies.last_mut() {
            Some(cookie) => cookie.set_path(value.unwrap_or_default()),
            None => tracing::debug!("ignoring cookie $Path with no preceding cookie"),
        }
    } else if attribute.eq_ignore_ascii_case("domain") {
        match cookies.last_mut() {
            Some(cookie) => cookie.set_domain(value.unwrap_or_default()),
            None => tracing::debug!("ignoring cookie $Domain with no preceding cookie"),
        }
    } else {
        tracing::debug!(attribute, "ignoring unknown cookie attribute");
    }
}

/// Reads one `name[=value]` pair, leaving the cursor before the next
/// `;` or `,`. The value is a quoted string or a free run of characters
/// up to the next separator, trailing whitespace trimmed.
fn read_pair(reader: &mut HeaderReader<'_>) -> Result<Option<(String, Option<String>)>, ParseError> {
    reader.skip_spaces();
    let name = reader.read_token();
    if name.is_empty() {
        return match reader.peek() {
            None => Ok(None),
            Some(_) => Err(ParseError::malformed("empty cookie name")),
        };
    }

    match reader.read() {
        Some('=') => {}
        Some(_) => {
            reader.unread();
            return Ok(Some((name, None)));
        }
        None => return Ok(Some((name, None))),
    }

    if reader.peek() == Some('"') {
        return Ok(Some((name, Some(reader.read_quoted_string()?))));
    }

    let mut value = String::new();
    while let Some(c) = reader.read() {
        if c == ';' || c == ',' {
            reader.unread();
            break;
        }
        value.push(c);
    }
    value.truncate(value.trim_end().len());
    Ok(Some((name, Some(value))))
}

fn skip_pair_separator(reader: &mut HeaderReader<'_>) {
    reader.skip_spaces();
    match reader.read() {
        Some(';' | ',') => {
            reader.skip_spaces();
        }
        Some(_) => reader.unread(),
        None => {}
    }
}
