use http::{HeaderName, HeaderValue};

use crate::error::ParseError;

/// The identity of a typed header: which header name it lives under.
pub trait TypedHeader {
    /// The name of this header.
    fn name() -> &'static HeaderName;
}

/// A typed header that can be decoded from raw header values.
pub trait HeaderDecode: TypedHeader + Sized {
    /// Decode this type from an iterator of [`HeaderValue`]s.
    ///
    /// The iterator yields every value stored under [`TypedHeader::name`],
    /// in insertion order.
    fn decode<'i, I>(values: &mut I) -> Result<Self, ParseError>
    where
        I: Iterator<Item = &'i HeaderValue>;
}

/// A typed header that can be encoded to raw header values.
pub trait HeaderEncode: TypedHeader {
    /// Encode this type into a container of [`HeaderValue`]s.
    ///
    /// This function should be infallible. Any errors converting to a
    /// `HeaderValue` should have been caught when parsing or constructing
    /// this value.
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E);

    /// Encode this header to a single [`HeaderValue`].
    fn encode_to_value(&self) -> HeaderValue {
        let mut container = ExtendOnce(None);
        self.encode(&mut container);
        container.0.expect("encode produced no value")
    }
}

struct ExtendOnce(Option<HeaderValue>);

impl Extend<HeaderValue> for ExtendOnce {
    fn extend<T: IntoIterator<Item = HeaderValue>>(&mut self, iter: T) {
        self.0 = iter.into_iter().next();
    }
}
