use std::fmt;

use http::{HeaderName, HeaderValue, header};

use crate::data::Cookie;
use crate::error::ParseError;
use crate::header::{HeaderDecode, HeaderEncode, TypedHeader};
use crate::reader::read_cookies;

/// `Cookie` header, defined in
/// [RFC2965](https://datatracker.ietf.org/doc/html/rfc2965#section-3.3.4)
///
/// A client sends the cookies that apply to a request in a single
/// header. An optional leading `$Version` attribute governs the list;
/// `$Path` and `$Domain` attributes refine the cookie they follow.
///
/// # ABNF
///
/// ```text
/// cookie          = "Cookie:" cookie-version 1*((";" | ",") cookie-value)
/// cookie-value    = NAME "=" VALUE [";" path] [";" domain]
/// cookie-version  = "$Version" "=" value
/// path            = "$Path" "=" value
/// domain          = "$Domain" "=" value
/// ```
///
/// # Example values
/// * `sessionId=abc123`
/// * `$Version=1; sessionId=abc123; $Path=/app`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cookies(pub Vec<Cookie>);

impl Cookies {
    #[must_use]
    pub fn new(cookie: Cookie) -> Self {
        Self(vec![cookie])
    }

    /// The first cookie with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.0.iter().find(|cookie| cookie.name() == name)
    }

    #[must_use]
    pub fn cookies(&self) -> &[Cookie] {
        &self.0
    }

    #[must_use]
    pub fn into_cookies(self) -> Vec<Cookie> {
        self.0
    }
}

impl TypedHeader for Cookies {
    fn name() -> &'static HeaderName {
        &header::COOKIE
    }
}

impl HeaderDecode for Cookies {
    fn decode<'i, I>(values: &mut I) -> Result<Self, ParseError>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let mut cookies = Vec::new();
        for value in values {
            let value = value
                .to_str()
                .map_err(|_| ParseError::malformed("header value is not ASCII"))?;
            cookies.extend(read_cookies(value));
        }
        if cookies.is_empty() {
            tracing::debug!(header = %Self::name(), "no valid cookie in header");
            return Err(ParseError::malformed("no valid cookie in header"));
        }
        Ok(Self(cookies))
    }
}

impl HeaderEncode for Cookies {
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        let value = HeaderValue::from_str(&self.to_string())
            .expect("serialized cookies are always a valid header value");
        values.extend(std::iter::once(value));
    }
}

impl fmt::Display for Cookies {
    /// A single `$Version` attribute leads the list when any cookie
    /// carries a non-zero version.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = self.0.iter().map(Cookie::version).max().unwrap_or(0);
        let mut first = true;
        if version > 0 {
            write!(f, "$Version={version}")?;
            first = false;
        }
        for cookie in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{cookie}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{test_decode, test_encode};

    #[test]
    fn decode_simple_pair() {
        let cookies: Cookies = test_decode(&["sessionId=abc123"]).unwrap();
        assert_eq!(cookies.get("sessionId").unwrap().value(), "abc123");
    }

    #[test]
    fn decode_versioned_cookie() {
        let cookies: Cookies = test_decode(&["$Version=1; sessionId=abc123; $Path=/app"]).unwrap();

        let cookie = cookies.get("sessionId").unwrap();
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.version(), 1);
        assert_eq!(cookie.path(), Some("/app"));
    }

    #[test]
    fn decode_multiple_header_values() {
        let cookies: Cookies = test_decode(&["a=1", "b=2"]).unwrap();
        assert_eq!(cookies.cookies().len(), 2);
        assert_eq!(cookies.get("b").unwrap().value(), "2");
    }

    #[test]
    fn decode_rejects_header_with_no_valid_cookie() {
        assert!(test_decode::<Cookies>(&["==="]).is_none());
    }

    #[test]
    fn encode_plain_cookie() {
        let headers = test_encode(Cookies::new(Cookie::new("sessionId", "abc123")));
        assert_eq!(headers["cookie"], "sessionId=abc123");
    }

    #[test]
    fn encode_versioned_cookie() {
        let cookie = Cookie::new("sessionId", "abc123")
            .with_version(1)
            .with_path("/app");
        let headers = test_encode(Cookies::new(cookie));
        assert_eq!(
            headers["cookie"],
            r#"$Version=1; sessionId=abc123; $Path="/app""#
        );
    }

    #[test]
    fn round_trip() {
        let original: Cookies = test_decode(&["$Version=1; a=1; $Path=/x; b=2"]).unwrap();
        let headers = test_encode(original.clone());
        let decoded: Cookies = test_decode(&[headers["cookie"].to_str().unwrap()]).unwrap();
        assert_eq!(decoded, original);
    }
}
