use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

use super::metadata::{Metadata, Specificity};

/// A character set, e.g. `utf-8`. Names compare case-insensitively.
#[derive(Debug, Clone, Eq)]
pub struct CharacterSet {
    name: Cow<'static, str>,
}

impl CharacterSet {
    /// `*`, matching every character set.
    pub const ALL: Self = Self::from_static("*");

    /// The default character set of HTTP/1.1 text media types.
    pub const ISO_8859_1: Self = Self::from_static("ISO-8859-1");

    pub const US_ASCII: Self = Self::from_static("US-ASCII");
    pub const UTF_8: Self = Self::from_static("UTF-8");
    pub const UTF_16: Self = Self::from_static("UTF-16");

    const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    /// Create a character set from its IANA name.
    pub fn new(name: impl Into<String>) -> Result<Self, ParseError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ParseError::malformed("empty character set name"));
        }
        Ok(Self {
            name: Cow::Owned(name),
        })
    }
}

impl Metadata for CharacterSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn parent(&self) -> Option<Self> {
        None
    }

    fn matches(&self, candidate: &Self) -> Option<Specificity> {
        if self.is_wildcard() {
            Some(Specificity::Wildcard)
        } else if self.name.eq_ignore_ascii_case(&candidate.name) {
            Some(Specificity::Exact)
        } else {
            None
        }
    }
}

impl PartialEq for CharacterSet {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for CharacterSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}
