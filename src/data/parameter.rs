use std::fmt;

use crate::grammar::chars::is_token;

/// An ordered `name[=value]` pair as it appears on the wire.
///
/// The name is always present; the value may be absent (a bare flag) or
/// any string, quoted on output when it is not a valid token. Parameter
/// order on an entity follows appearance on the wire and is preserved
/// for round-trip serialization.
#[derive(Debug, Clone, Eq)]
pub struct Parameter {
    name: String,
    value: Option<String>,
}

impl Parameter {
    /// Create a parameter with a value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Create a valueless parameter (a bare flag).
    #[must_use]
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name) && self.value == other.value
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(value) = &self.value {
            f.write_str("=")?;
            fmt_parameter_value(f, value)?;
        }
        Ok(())
    }
}

/// Writes a parameter value, quoting it when it is not a valid token.
///
/// Double quotes and backslashes inside a quoted value are escaped with
/// a backslash.
pub(crate) fn fmt_parameter_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if is_token(value) {
        return f.write_str(value);
    }

    f.write_str("\"")?;
    for c in value.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}
