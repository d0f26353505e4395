use std::fmt;

use super::parameter::fmt_parameter_value;

/// One cookie from a request `Cookie` header: a name/value pair plus
/// the RFC 2965 attributes that may accompany it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
    version: u32,
    path: Option<String>,
    domain: Option<String>,
}

impl Cookie {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            version: 0,
            path: None,
            domain: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The cookie specification version, 0 for original Netscape
    /// cookies.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.set_version(version);
        self
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.set_path(path);
        self
    }

    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = Some(domain.into());
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.set_domain(domain);
        self
    }
}

impl fmt::Display for Cookie {
    /// The `name=value` pair, followed by `$Path` and `$Domain` when
    /// the version calls for them. The list-wide `$Version` prefix is
    /// written by the header writer, not per cookie.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.name)?;
        fmt_parameter_value(f, &self.value)?;
        if self.version > 0 {
            if let Some(path) = &self.path {
                f.write_str("; $Path=")?;
                fmt_parameter_value(f, path)?;
            }
            if let Some(domain) = &self.domain {
                f.write_str("; $Domain=")?;
                fmt_parameter_value(f, domain)?;
            }
        }
        Ok(())
    }
}
