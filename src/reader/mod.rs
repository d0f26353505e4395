//! Header-family readers built on the shared [`grammar`] layer.
//!
//! Each reader turns one header value (or body) into typed data:
//! preference lists for the `Accept-*` family, cookie pairs, URL-encoded
//! forms, and interned token lists. All of them share the same recovery
//! behavior: a malformed entry is logged and skipped, and reading resumes
//! at the next separator.
//!
//! [`grammar`]: crate::grammar

mod cookie;
mod form;
mod preference;
mod tag;

pub use cookie::read_cookies;
pub use form::FormData;
pub use preference::{
    PreferenceMetadata, read_character_set_preferences, read_encoding_preferences,
    read_language_preferences, read_media_type_preferences, read_preferences,
};
pub use tag::{Tag, TagRegistry, read_tags};
