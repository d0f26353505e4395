//! The typed data model: parameters, the metadata kinds along the four
//! negotiation dimensions, weighted preferences and cookies.

mod parameter;
pub use parameter::Parameter;

mod metadata;
pub use metadata::{Metadata, Specificity};

mod media_type;
pub use media_type::MediaType;
pub(crate) use media_type::from_name as media_type_from_name;

mod charset;
pub use charset::CharacterSet;

mod encoding;
pub use encoding::Encoding;

mod language;
pub use language::Language;

mod preference;
pub use preference::{Preference, Quality};

mod cookie;
pub use cookie::Cookie;
