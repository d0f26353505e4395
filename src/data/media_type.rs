use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::grammar::HeaderReader;

use super::metadata::{Metadata, Specificity};
use super::parameter::Parameter;

/// A media type: a main type and sub type split on `/`, plus the
/// parameters that are part of the type itself (e.g. `charset`).
///
/// Equality ignores the case of the type names and includes the
/// parameters; [`essence`](Self::essence) drops them. Either part may be
/// the `*` wildcard, with `*/concrete` ranges rejected on match (only
/// `*/*` is a valid full wildcard).
///
/// # Example values
///
/// * `text/html`
/// * `application/json; charset=utf-8`
/// * `text/*`
#[derive(Debug, Clone, Eq)]
pub struct MediaType {
    name: Cow<'static, str>,
    slash: usize,
    parameters: Vec<Parameter>,
}

impl MediaType {
    /// `*/*`, matching every media type.
    pub const ALL: Self = Self::from_static("*/*", 1);

    pub const APPLICATION_JSON: Self = Self::from_static("application/json", 11);
    pub const APPLICATION_OCTET_STREAM: Self = Self::from_static("application/octet-stream", 11);
    pub const APPLICATION_XML: Self = Self::from_static("application/xml", 11);
    pub const TEXT_ALL: Self = Self::from_static("text/*", 4);
    pub const TEXT_HTML: Self = Self::from_static("text/html", 4);
    pub const TEXT_PLAIN: Self = Self::from_static("text/plain", 4);

    const fn from_static(name: &'static str, slash: usize) -> Self {
        Self {
            name: Cow::Borrowed(name),
            slash,
            parameters: Vec::new(),
        }
    }

    /// Create a media type from its main and sub types.
    #[must_use]
    pub fn new(main_type: &str, sub_type: &str) -> Self {
        Self {
            slash: main_type.len(),
            name: Cow::Owned(format!("{main_type}/{sub_type}")),
            parameters: Vec::new(),
        }
    }

    /// Attach parameters, replacing any already present.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// The part before the `/`, e.g. `text`.
    #[must_use]
    pub fn main_type(&self) -> &str {
        &self.name[..self.slash]
    }

    /// The part after the `/`, e.g. `html`.
    #[must_use]
    pub fn sub_type(&self) -> &str {
        &self.name[self.slash + 1..]
    }

    /// The parameters, in wire order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// This media type without its parameters.
    #[must_use]
    pub fn essence(&self) -> Self {
        Self {
            name: self.name.clone(),
            slash: self.slash,
            parameters: Vec::new(),
        }
    }

    /// Looks up the `charset` parameter, if any.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case("charset"))
            .and_then(Parameter::value)
    }

    /// True if this type, interpreted as a range, covers `other`.
    /// `text/*` includes `text/html`; `*/*` includes everything.
    #[must_use]
    pub fn includes(&self, other: &Self) -> bool {
        self.matches(other).is_some()
    }
}

impl Metadata for MediaType {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_wildcard(&self) -> bool {
        self.main_type() == "*" && self.sub_type() == "*"
    }

    fn parent(&self) -> Option<Self> {
        if self.sub_type() != "*" {
            Some(Self::new(self.main_type(), "*"))
        } else if self.main_type() != "*" {
            Some(Self::ALL)
        } else {
            None
        }
    }

    fn matches(&self, candidate: &Self) -> Option<Specificity> {
        if self.main_type() == "*" {
            // ranges such as */html are not supported
            return (self.sub_type() == "*").then_some(Specificity::Wildcard);
        }
        if !self.main_type().eq_ignore_ascii_case(candidate.main_type()) {
            return None;
        }
        if self.sub_type() == "*" {
            Some(Specificity::Partial)
        } else if self.sub_type().eq_ignore_ascii_case(candidate.sub_type()) {
            Some(Specificity::Exact)
        } else {
            None
        }
    }
}

impl PartialEq for MediaType {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name) && self.parameters == other.parameters
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for parameter in &self.parameters {
            write!(f, "; {parameter}")?;
        }
        Ok(())
    }
}

impl FromStr for MediaType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut reader = HeaderReader::new(s);
        reader.skip_spaces();
        let name = reader.read_metadata_name()?;
        let mut media_type = from_name(name)?;

        while reader.skip_parameter_separator() {
            media_type.parameters.push(reader.read_parameter()?);
        }
        if reader.peek().is_some() {
            return Err(ParseError::malformed("trailing input after media type"));
        }
        Ok(media_type)
    }
}

/// Builds a media type from a bare metadata name. A name without a `/`
/// is widened to `name/*`, and a lone `*` to `*/*`.
pub(crate) fn from_name(name: String) -> Result<MediaType, ParseError> {
    if name.is_empty() {
        return Err(ParseError::malformed("empty media type name"));
    }
    if name == "*" {
        return Ok(MediaType::ALL);
    }

    Ok(match name.find('/') {
        Some(slash) => {
            if slash == 0 || slash + 1 == name.len() || name[slash + 1..].contains('/') {
                return Err(ParseError::malformed(format!(
                    "invalid media type name {name:?}"
                )));
            }
            MediaType {
                name: Cow::Owned(name),
                slash,
                parameters: Vec::new(),
            }
        }
        None => MediaType::new(&name, "*"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain() {
        let media_type: MediaType = "text/html".parse().unwrap();
        assert_eq!(media_type.main_type(), "text");
        assert_eq!(media_type.sub_type(), "html");
        assert!(media_type.parameters().is_empty());
    }

    #[test]
    fn parse_with_parameters() {
        let media_type: MediaType = "application/json; charset=utf-8".parse().unwrap();
        assert_eq!(media_type.essence(), MediaType::APPLICATION_JSON);
        assert_eq!(media_type.charset(), Some("utf-8"));
        assert_eq!(media_type.to_string(), "application/json; charset=utf-8");
    }

    #[test]
    fn parse_widens_bare_names() {
        assert_eq!("*".parse::<MediaType>().unwrap(), MediaType::ALL);
        assert_eq!("text".parse::<MediaType>().unwrap(), MediaType::TEXT_ALL);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<MediaType>().is_err());
        assert!("/html".parse::<MediaType>().is_err());
        assert!("text/".parse::<MediaType>().is_err());
        assert!("a/b/c".parse::<MediaType>().is_err());
    }

    #[test]
    fn equality_ignores_case_but_not_parameters() {
        let a: MediaType = "Text/HTML".parse().unwrap();
        assert_eq!(a, MediaType::TEXT_HTML);
        let b: MediaType = "text/html; level=1".parse().unwrap();
        assert_ne!(a, b);
        assert_eq!(a, b.essence());
    }

    #[test]
    fn matching_specificity() {
        assert_eq!(
            MediaType::TEXT_HTML.matches(&MediaType::TEXT_HTML),
            Some(Specificity::Exact)
        );
        assert_eq!(
            MediaType::TEXT_ALL.matches(&MediaType::TEXT_HTML),
            Some(Specificity::Partial)
        );
        assert_eq!(
            MediaType::ALL.matches(&MediaType::TEXT_HTML),
            Some(Specificity::Wildcard)
        );
        assert_eq!(MediaType::TEXT_ALL.matches(&MediaType::APPLICATION_JSON), None);
        // */html is not a valid range
        assert_eq!(
            MediaType::new("*", "html").matches(&MediaType::TEXT_HTML),
            None
        );
    }

    #[test]
    fn parents() {
        assert_eq!(
            MediaType::TEXT_HTML.parent().unwrap(),
            MediaType::TEXT_ALL
        );
        assert_eq!(MediaType::TEXT_ALL.parent().unwrap(), MediaType::ALL);
        assert_eq!(MediaType::ALL.parent(), None);
    }
}
