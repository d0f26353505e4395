use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

use super::metadata::{Metadata, Specificity};

/// A content coding, e.g. `gzip`. Names compare case-insensitively.
#[derive(Debug, Clone, Eq)]
pub struct Encoding {
    name: Cow<'static, str>,
}

impl Encoding {
    /// `*`, matching every content coding.
    pub const ALL: Self = Self::from_static("*");

    /// The absence of any transformation.
    pub const IDENTITY: Self = Self::from_static("identity");

    pub const BROTLI: Self = Self::from_static("br");
    pub const COMPRESS: Self = Self::from_static("compress");
    pub const DEFLATE: Self = Self::from_static("deflate");
    pub const GZIP: Self = Self::from_static("gzip");
    pub const ZSTD: Self = Self::from_static("zstd");

    const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    /// Create a content coding from its registered name.
    pub fn new(name: impl Into<String>) -> Result<Self, ParseError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ParseError::malformed("empty encoding name"));
        }
        Ok(Self {
            name: Cow::Owned(name),
        })
    }
}

impl Metadata for Encoding {
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

impl PartialEq for Encoding {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Encoding {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_case() {
        assert_eq!("GZIP".parse::<Encoding>().unwrap(), Encoding::GZIP);
        assert_ne!(Encoding::GZIP, Encoding::DEFLATE);
    }

    #[test]
    fn matching() {
        assert_eq!(
            Encoding::GZIP.matches(&Encoding::GZIP),
            Some(Specificity::Exact)
        );
        assert_eq!(
            Encoding::ALL.matches(&Encoding::ZSTD),
            Some(Specificity::Wildcard)
        );
        assert_eq!(Encoding::GZIP.matches(&Encoding::IDENTITY), None);
    }
}
