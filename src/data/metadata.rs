use std::fmt;

/// How closely a preference's metadata names the value it matched.
///
/// Ordered: an exact match beats a partial wildcard (`text/*`, bare
/// primary language tag), which beats a full wildcard (`*` or `*/*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
    /// A full wildcard matched.
    Wildcard,
    /// A partial wildcard matched (main type or primary tag only).
    Partial,
    /// The metadata named the value exactly.
    Exact,
}

/// A named metadata value along one negotiation dimension: a media
/// type, character set, language or encoding.
///
/// Two metadata values of the same kind are equal iff their names match
/// case-insensitively. A metadata name is never empty.
pub trait Metadata: Clone + PartialEq + fmt::Display {
    /// The wire name, e.g. `text/html`, `utf-8`, `en-us` or `gzip`.
    fn name(&self) -> &str;

    /// True if this value matches every concrete value of its kind.
    fn is_wildcard(&self) -> bool {
        self.name() == "*"
    }

    /// The next more general value, if any: `text/html` -> `text/*` ->
    /// `*/*`, `en-us` -> `en`.
    fn parent(&self) -> Option<Self>;

    /// Matches this value, interpreted as a client range, against a
    /// concrete candidate. Returns the match specificity, or `None` if
    /// the candidate falls outside the range.
    fn matches(&self, candidate: &Self) -> Option<Specificity>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specificity_ordering() {
        assert!(Specificity::Exact > Specificity::Partial);
        assert!(Specificity::Partial > Specificity::Wildcard);
    }
}
