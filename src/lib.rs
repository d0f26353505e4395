//! # entente
//!
//! Strongly-typed parsing and writing for the HTTP negotiation headers,
//! plus the engine that turns the parsed preferences into a content
//! negotiation decision.
//!
//! The crate is built around three layers:
//!
//! - [`grammar`]: a character scanner and tokenizer for the RFC 2616
//!   header grammar (tokens, quoted strings, parameters), with
//!   per-entry error recovery so one malformed list entry never takes
//!   the rest of the header down with it.
//! - [`reader`] and [`data`]: typed readers built on the grammar that
//!   produce [`Preference`] lists for the `Accept-*` family,
//!   [`Cookie`] records per RFC 2965, URL-encoded [`FormData`] and
//!   interned option tags.
//! - [`conneg`]: given the server's [`Variant`]s and the client's
//!   parsed preferences, picks the best representation or reports
//!   [`NoAcceptableVariant`].
//!
//! [`Variant`]: conneg::Variant
//!
//! Typed access to an [`http::HeaderMap`] goes through
//! [`HeaderMapExt`]:
//!
//! ```
//! use entente::{Accept, HeaderMapExt};
//! use entente::conneg::{ClientPreferences, Negotiator, Variant};
//! use entente::data::MediaType;
//!
//! let mut headers = http::HeaderMap::new();
//! headers.insert(
//!     http::header::ACCEPT,
//!     "application/json;q=1.0, text/*;q=0.5".parse().unwrap(),
//! );
//!
//! let accept = headers.typed_get::<Accept>().unwrap();
//! assert_eq!(accept.preferences().len(), 2);
//!
//! let negotiator = Negotiator::new(vec![
//!     Variant::new().with_media_type(MediaType::TEXT_HTML),
//!     Variant::new().with_media_type(MediaType::APPLICATION_JSON),
//! ]);
//! let best = negotiator
//!     .negotiate(&ClientPreferences::from_header_map(&headers))
//!     .unwrap();
//! assert_eq!(best.media_type(), Some(&MediaType::APPLICATION_JSON));
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

pub mod conneg;
pub mod data;
pub mod grammar;
pub mod reader;

mod common;
mod error;
mod header;
mod map_ext;

pub use common::{Accept, AcceptCharset, AcceptEncoding, AcceptLanguage, Cookies};
pub use error::{NoAcceptableVariant, ParseError};
pub use header::{HeaderDecode, HeaderEncode, TypedHeader};
pub use map_ext::HeaderMapExt;

pub use data::{Cookie, Preference, Quality};
pub use reader::FormData;
