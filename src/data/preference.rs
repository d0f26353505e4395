use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

use super::metadata::Metadata;
use super::parameter::Parameter;

/// The strength of a preference, in thousandths in the closed range
/// [0, 1000] — the wire's `q` parameter scaled by 1000.
///
/// Storing thousandths makes the [0, 1] invariant structural and gives
/// total ordering without floating point edge cases. The default is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u16);

impl Quality {
    /// Explicit refusal: `q=0`.
    pub const ZERO: Self = Self(0);

    /// Full strength, the default when `q` is unspecified.
    pub const ONE: Self = Self(1000);

    /// Create a quality from thousandths. Values above 1000 are
    /// rejected.
    #[must_use]
    pub fn from_thousandths(thousandths: u16) -> Option<Self> {
        (thousandths <= 1000).then_some(Self(thousandths))
    }

    /// This quality in thousandths, 0..=1000.
    #[must_use]
    pub fn thousandths(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::ONE
    }
}

impl FromStr for Quality {
    type Err = ParseError;

    /// Parses a `q` value. Any decimal in [0, 1] is accepted, with
    /// precision beyond three decimals rounded; out-of-range or
    /// non-numeric input is an unsupported quality.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f32 = trimmed
            .parse()
            .map_err(|_| ParseError::unsupported_quality(s))?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ParseError::unsupported_quality(s));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self((value * 1000.0).round() as u16))
    }
}

impl fmt::Display for Quality {
    /// The canonical decimal form: `1`, `0`, `0.5`, `0.85`, `0.125`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1000 => f.write_str("1"),
            0 => f.write_str("0"),
            thousandths => {
                let digits = format!("{thousandths:03}");
                write!(f, "0.{}", digits.trim_end_matches('0'))
            }
        }
    }
}

/// A weighted client preference for one metadata value: the metadata, a
/// quality and any accept extension parameters.
///
/// The reserved `q` parameter is consumed into the quality during
/// parsing and never appears in the residual parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Preference<M> {
    metadata: M,
    quality: Quality,
    parameters: Vec<Parameter>,
}

impl<M: Metadata> Preference<M> {
    /// Create a preference at full strength.
    #[must_use]
    pub fn new(metadata: M) -> Self {
        Self {
            metadata,
            quality: Quality::ONE,
            parameters: Vec::new(),
        }
    }

    /// Create a preference with an explicit quality.
    #[must_use]
    pub fn with_quality(metadata: M, quality: Quality) -> Self {
        Self {
            metadata,
            quality,
            parameters: Vec::new(),
        }
    }

    /// Create a preference with extension parameters. Any `q` parameter
    /// in the list is dropped in favor of the explicit quality.
    #[must_use]
    pub fn from_parts(metadata: M, quality: Quality, mut parameters: Vec<Parameter>) -> Self {
        parameters.retain(|p| !p.name().eq_ignore_ascii_case("q"));
        Self {
            metadata,
            quality,
            parameters,
        }
    }

    #[must_use]
    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    #[must_use]
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// The accept extension parameters, in wire order, `q` excluded.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    #[must_use]
    pub fn into_metadata(self) -> M {
        self.metadata
    }
}

impl<M: Metadata> fmt::Display for Preference<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.metadata.fmt(f)?;
        if self.quality != Quality::ONE {
            write!(f, ";q={}", self.quality)?;
        }
        for parameter in &self.parameters {
            write!(f, ";{parameter}")?;
        }
        Ok(())
    }
}
