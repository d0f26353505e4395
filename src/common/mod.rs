//! Typed representations of the headers this crate understands.
//!
//! Each type couples one header name with its decoded shape and plugs
//! into [`HeaderMapExt`] via the [`HeaderDecode`] and [`HeaderEncode`]
//! traits.
//!
//! [`HeaderMapExt`]: crate::HeaderMapExt
//! [`HeaderDecode`]: crate::HeaderDecode
//! [`HeaderEncode`]: crate::HeaderEncode

mod accept;
mod cookie;

pub use accept::{Accept, AcceptCharset, AcceptEncoding, AcceptLanguage};
pub use cookie::Cookies;

/// Generates a typed preference header: a newtype over a preference
/// list that decodes with the shared reader and encodes as a
/// comma-delimited list.
macro_rules! derive_preference_header {
    ($(#[$docs:meta])* ($id:ident, $name:ident) => $metadata:ty) => {
        $(#[$docs])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $id(pub Vec<$crate::data::Preference<$metadata>>);

        impl $id {
            /// A header holding a single preference.
            #[must_use]
            pub fn new(preference: $crate::data::Preference<$metadata>) -> Self {
                Self(vec![preference])
            }

            #[must_use]
            pub fn preferences(&self) -> &[$crate::data::Preference<$metadata>] {
                &self.0
            }

            #[must_use]
            pub fn into_preferences(self) -> Vec<$crate::data::Preference<$metadata>> {
                self.0
            }

            /// The preferences ordered by descending quality. Entries
            /// with equal quality keep their wire order.
            #[must_use]
            pub fn ranked(&self) -> Vec<&$crate::data::Preference<$metadata>> {
                let mut ranked: Vec<_> = self.0.iter().collect();
                ranked.sort_by(|a, b| b.quality().cmp(&a.quality()));
                ranked
            }
        }

        impl $crate::header::TypedHeader for $id {
            fn name() -> &'static ::http::HeaderName {
                &::http::header::$name
            }
        }

        impl $crate::header::HeaderDecode for $id {
            fn decode<'i, I>(values: &mut I) -> Result<Self, $crate::error::ParseError>
            where
                I: Iterator<Item = &'i ::http::HeaderValue>,
            {
                let mut preferences = Vec::new();
                for value in values {
                    let value = value.to_str().map_err(|_| {
                        $crate::error::ParseError::malformed("header value is not ASCII")
                    })?;
                    preferences.extend($crate::reader::read_preferences::<$metadata>(value));
                }
                if preferences.is_empty() {
                    ::tracing::debug!(
                        header = %<Self as $crate::header::TypedHeader>::name(),
                        "no valid preference in header"
                    );
                    return Err($crate::error::ParseError::malformed(
                        "no valid preference in header",
                    ));
                }
                Ok(Self(preferences))
            }
        }

        impl $crate::header::HeaderEncode for $id {
            fn encode<E: Extend<::http::HeaderValue>>(&self, values: &mut E) {
                let value = ::http::HeaderValue::from_str(&self.to_string())
                    .expect("serialized preferences are always a valid header value");
                values.extend(::std::iter::once(value));
            }
        }

        impl ::std::fmt::Display for $id {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let mut first = true;
                for preference in &self.0 {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{preference}")?;
                }
                Ok(())
            }
        }
    };
}

pub(crate) use derive_preference_header;

#[cfg(test)]
pub(crate) fn test_decode<H: crate::header::HeaderDecode>(values: &[&str]) -> Option<H> {
    use crate::map_ext::HeaderMapExt;

    let mut map = http::HeaderMap::new();
    for value in values {
        map.append(H::name(), value.parse().unwrap());
    }
    map.typed_get()
}

#[cfg(test)]
pub(crate) fn test_encode<H: crate::header::HeaderEncode>(header: H) -> http::HeaderMap {
    use crate::map_ext::HeaderMapExt;

    let mut map = http::HeaderMap::new();
    map.typed_insert(header);
    map
}
