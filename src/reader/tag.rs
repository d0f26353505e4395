use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::error::ParseError;
use crate::grammar::HeaderReader;

/// An interned, case-normalized token.
///
/// Tags only exist inside a [`TagRegistry`]; two lookups for the same
/// name (in any casing) return the same allocation, so equality checks
/// between registry tags are pointer comparisons in practice.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    name: String,
}

impl Tag {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A concurrent intern pool for [`Tag`]s.
///
/// Reads take a shared lock; only the first sighting of a name takes
/// the exclusive lock to insert. Names are trimmed and lowercased
/// before lookup, so `Gzip` and `gzip` intern to the same tag.
#[derive(Debug, Default)]
pub struct TagRegistry {
    tags: RwLock<AHashMap<String, Arc<Tag>>>,
}

impl TagRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the interned tag for the given name, creating it on
    /// first use. An empty (or all-whitespace) name yields `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Tag>> {
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            return None;
        }

        if let Some(tag) = self.tags.read().get(&name) {
            return Some(tag.clone());
        }

        let mut tags = self.tags.write();
        // Double-checked: another writer may have interned it between
        // the read unlock and the write lock.
        let tag = tags
            .entry(name.clone())
            .or_insert_with(|| Arc::new(Tag { name }))
            .clone();
        Some(tag)
    }

    /// The number of distinct tags interned so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.read().is_empty()
    }
}

/// Reads a comma-separated list of tokens, interning each through the
/// registry. Malformed entries are skipped with the shared recovery
/// behavior; duplicates collapse to a single entry.
#[must_use]
pub fn read_tags(registry: &TagRegistry, header: &str) -> Vec<Arc<Tag>> {
    let mut reader = HeaderReader::new(header);
    reader.read_values(|reader| {
        reader.skip_spaces();
        let token = reader.read_token();
        if token.is_empty() {
            return if reader.is_at_end() {
                Ok(None)
            } else {
                Err(ParseError::malformed("expected a token"))
            };
        }
        reader.skip_spaces();
        match reader.peek() {
            None | Some(',') => {}
            Some(c) => {
                return Err(ParseError::malformed(format!(
                    "unexpected character '{c}' after token"
                )));
            }
        }
        Ok(registry.get(&token))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_case_insensitive() {
        let registry = TagRegistry::new();
        let a = registry.get("Gzip").unwrap();
        let b = registry.get("  gzip ").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.name(), "gzip");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_name_is_rejected() {
        let registry = TagRegistry::new();
        assert!(registry.get("").is_none());
        assert!(registry.get("   ").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn reads_token_lists() {
        let registry = TagRegistry::new();
        let tags = read_tags(&registry, "gzip, Deflate , br");
        let names: Vec<_> = tags.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["gzip", "deflate", "br"]);
    }

    #[test]
    fn duplicates_collapse() {
        let registry = TagRegistry::new();
        let tags = read_tags(&registry, "gzip, GZIP, gzip");
        assert_eq!(tags.len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let registry = TagRegistry::new();
        let tags = read_tags(&registry, "gzip, a b, br");
        let names: Vec<_> = tags.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["gzip", "br"]);
    }

    #[test]
    fn concurrent_interning_is_consistent() {
        let registry = Arc::new(TagRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    (0..100)
                        .map(|i| registry.get(&format!("tag-{}", i % 10)).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 10);
        let first = registry.get("tag-0").unwrap();
        let again = registry.get("TAG-0").unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }
}
