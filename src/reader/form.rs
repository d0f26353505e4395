use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::data::Parameter;

/// The characters escaped when writing a form name or value. Everything
/// outside the unreserved set, as browsers submit it.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A parsed `application/x-www-form-urlencoded` body or query string.
///
/// Pairs keep their wire order; a name may repeat. A pair that is
/// present with an empty value (`a=` or a bare `a`) is distinguished
/// from an absent one: lookups answer `Some("")` for the former and
/// `None` for the latter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    pairs: Vec<Parameter>,
}

impl FormData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a form-encoded string: `&`-separated pairs, `+` as
    /// space, percent sequences as UTF-8.
    #[must_use]
    pub fn parse(form: &str) -> Self {
        let mut pairs = Vec::new();
        for pair in form.split('&') {
            if pair.is_empty() {
                continue;
            }
            match pair.split_once('=') {
                Some((name, value)) => pairs.push(Parameter::new(decode(name), decode(value))),
                None => pairs.push(Parameter::flag(decode(pair))),
            }
        }
        Self { pairs }
    }

    /// Adds a pair at the end.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push(Parameter::new(name, value));
    }

    /// The value of the first pair with the given name: `None` when the
    /// name is absent, `Some("")` when it is present but empty.
    #[must_use]
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .map(|p| p.value().unwrap_or_default())
    }

    /// Every value bound to the given name, in wire order.
    #[must_use]
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|p| p.name().eq_ignore_ascii_case(name))
            .map(|p| p.value().unwrap_or_default())
            .collect()
    }

    /// All pairs, in wire order.
    #[must_use]
    pub fn pairs(&self) -> &[Parameter] {
        &self.pairs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn decode(encoded: &str) -> String {
    let spaced = encoded.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

impl fmt::Display for FormData {
    /// Re-encodes the pairs. Spaces and reserved characters are percent
    /// escaped; a valueless pair is written as a bare name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}", utf8_percent_encode(pair.name(), FORM_ENCODE_SET))?;
            if let Some(value) = pair.value() {
                write!(f, "={}", utf8_percent_encode(value, FORM_ENCODE_SET))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_pairs() {
        let form = FormData::parse("a=1&b=2");
        assert_eq!(form.len(), 2);
        assert_eq!(form.first_value("a"), Some("1"));
        assert_eq!(form.first_value("b"), Some("2"));
    }

    #[test]
    fn percent_and_plus_decoding() {
        let form = FormData::parse("name=Jane+Doe&city=S%C3%A3o+Paulo");
        assert_eq!(form.first_value("name"), Some("Jane Doe"));
        assert_eq!(form.first_value("city"), Some("São Paulo"));
    }

    #[test]
    fn present_but_empty_is_not_absent() {
        let form = FormData::parse("a=&b");
        assert_eq!(form.first_value("a"), Some(""));
        assert_eq!(form.first_value("b"), Some(""));
        assert_eq!(form.first_value("c"), None);
    }

    #[test]
    fn repeated_names_keep_order() {
        let form = FormData::parse("tag=x&other=1&tag=y&tag=z");
        assert_eq!(form.values("tag"), ["x", "y", "z"]);
        assert_eq!(form.first_value("tag"), Some("x"));
    }

    #[test]
    fn round_trip() {
        let mut form = FormData::new();
        form.push("name", "Jane Doe");
        form.push("note", "a&b=c");
        let encoded = form.to_string();
        assert_eq!(encoded, "name=Jane%20Doe&note=a%26b%3Dc");
        assert_eq!(FormData::parse(&encoded), form);
    }

    #[test]
    fn empty_input() {
        assert!(FormData::parse("").is_empty());
        assert!(FormData::parse("&&").is_empty());
    }
}
