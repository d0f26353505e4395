use std::borrow::Cow;
use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;

/// Errors trying to parse a header value.
#[derive(Debug)]
pub struct ParseError {
    kind: Kind,
}

#[derive(Debug)]
enum Kind {
    /// A single atom violated the header grammar.
    Malformed { reason: Cow<'static, str> },
    /// A `q` parameter was not a number in the closed range [0, 1].
    UnsupportedQuality { value: String },
    /// The underlying source failed while reading.
    ///
    /// Only reachable when reading from a streamed source; parsing a
    /// buffered string never produces this.
    Read(io::Error),
}

impl ParseError {
    /// Create an error for a grammar violation.
    #[must_use]
    pub fn malformed(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: Kind::Malformed {
                reason: reason.into(),
            },
        }
    }

    /// Create an error for a quality value outside [0, 1] or not a number.
    #[must_use]
    pub fn unsupported_quality(value: impl Into<String>) -> Self {
        Self {
            kind: Kind::UnsupportedQuality {
                value: value.into(),
            },
        }
    }

    /// Returns true if this error is a grammar violation.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, Kind::Malformed { .. })
    }

    /// Returns true if this error is an out-of-range or non-numeric quality.
    #[must_use]
    pub fn is_unsupported_quality(&self) -> bool {
        matches!(self.kind, Kind::UnsupportedQuality { .. })
    }

    /// Returns true if this error comes from the underlying source.
    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(self.kind, Kind::Read(_))
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.kind {
            Kind::Malformed { reason } => write!(f, "malformed header: {reason}"),
            Kind::UnsupportedQuality { value } => write!(
                f,
                "unsupported quality value {value:?}: expected a number in [0, 1]"
            ),
            Kind::Read(err) => write!(f, "header source read failed: {err}"),
        }
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            Kind::Read(err) => Some(err),
            Kind::Malformed { .. } | Kind::UnsupportedQuality { .. } => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        Self {
            kind: Kind::Read(err),
        }
    }
}

/// Content negotiation found zero acceptable variants.
///
/// Surfaced as a decision outcome: the caller decides whether to fall
/// back to a default representation or reject the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoAcceptableVariant;

impl Display for NoAcceptableVariant {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("no variant is acceptable to the client")
    }
}

impl error::Error for NoAcceptableVariant {}
