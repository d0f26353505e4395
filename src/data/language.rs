use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

use super::metadata::{Metadata, Specificity};

/// A language tag: a primary tag and zero or more sub tags split on
/// `-`, e.g. `en-us`. Names compare case-insensitively.
///
/// Only the bare `*` is a valid wildcard range; `*-gb` is not.
#[derive(Debug, Clone, Eq)]
pub struct Language {
    name: Cow<'static, str>,
}

impl Language {
    /// `*`, matching every language.
    pub const ALL: Self = Self::from_static("*");

    pub const ENGLISH: Self = Self::from_static("en");
    pub const ENGLISH_US: Self = Self::from_static("en-us");
    pub const FRENCH: Self = Self::from_static("fr");
    pub const SPANISH: Self = Self::from_static("es");

    const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    /// Create a language from its tag.
    pub fn new(name: impl Into<String>) -> Result<Self, ParseError> {
        let name = name.into();
        if name.is_empty() || name.starts_with('-') || name.ends_with('-') {
            return Err(ParseError::malformed(format!(
                "invalid language tag {name:?}"
            )));
        }
        Ok(Self {
            name: Cow::Owned(name),
        })
    }

    /// The tag before the first `-`, e.g. `en` for `en-us`.
    #[must_use]
    pub fn primary_tag(&self) -> &str {
        self.name.split('-').next().unwrap_or(&self.name)
    }

    /// The tags after the primary one, in order.
    pub fn sub_tags(&self) -> impl Iterator<Item = &str> {
        self.name.split('-').skip(1)
    }
}

impl Metadata for Language {
    fn name(&self) -> &str {
        &self.name
    }

    fn parent(&self) -> Option<Self> {
        let primary = self.primary_tag();
        (primary.len() < self.name.len()).then(|| Self {
            name: Cow::Owned(primary.to_owned()),
        })
    }

    fn matches(&self, candidate: &Self) -> Option<Specificity> {
        if self.primary_tag() == "*" {
            // only the bare `*` is an acceptable language range
            return (self.sub_tags().next().is_none()).then_some(Specificity::Wildcard);
        }
        if !self.primary_tag().eq_ignore_ascii_case(candidate.primary_tag()) {
            return None;
        }

        let mut own = self.sub_tags();
        let mut other = candidate.sub_tags();
        loop {
            match (own.next(), other.next()) {
                (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => {}
                // the range has sub tags the candidate lacks or differs on
                (Some(_), _) => return None,
                // the range is a proper prefix of the candidate
                (None, Some(_)) => return Some(Specificity::Partial),
                (None, None) => return Some(Specificity::Exact),
            }
        }
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}
