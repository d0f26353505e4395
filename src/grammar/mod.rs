//! The HTTP header grammar: character classes, a character scanner and
//! the generic header tokenizer the typed readers build on.
//!
//! The tokenizer operates on a single, already unfolded header value.
//! Assembling multi-line headers into one value is the transport
//! layer's responsibility.

pub mod chars;

mod scanner;
pub use scanner::Scanner;

mod reader;
pub use reader::{HeaderReader, RawHeader};
