use http::HeaderMap;

use crate::error::ParseError;
use crate::header::{HeaderDecode, HeaderEncode};

/// An extension trait adding "typed" methods to [`http::HeaderMap`].
pub trait HeaderMapExt: self::sealed::Sealed {
    /// Inserts the typed header into this `HeaderMap`, replacing any
    /// values already stored under its name.
    fn typed_insert<H>(&mut self, header: H)
    where
        H: HeaderEncode;

    /// Tries to find the header by name, and then decode it into `H`.
    fn typed_get<H>(&self) -> Option<H>
    where
        H: HeaderDecode;

    /// Tries to find the header by name, and then decode it into `H`.
    fn typed_try_get<H>(&self) -> Result<Option<H>, ParseError>
    where
        H: HeaderDecode;
}

impl HeaderMapExt for HeaderMap {
    fn typed_insert<H>(&mut self, header: H)
    where
        H: HeaderEncode,
    {
        // Every header in this crate serializes its whole list into one
        // comma- or semicolon-delimited value.
        self.insert(H::name(), header.encode_to_value());
    }

    fn typed_get<H>(&self) -> Option<H>
    where
        H: HeaderDecode,
    {
        HeaderMapExt::typed_try_get(self).unwrap_or(None)
    }

    fn typed_try_get<H>(&self) -> Result<Option<H>, ParseError>
    where
        H: HeaderDecode,
    {
        let mut values = self.get_all(H::name()).iter();
        if values.size_hint() == (0, Some(0)) {
            Ok(None)
        } else {
            H::decode(&mut values).map(Some)
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for ::http::HeaderMap {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Accept;

    #[test]
    fn typed_insert_writes_one_value() {
        let mut headers = HeaderMap::new();
        headers.typed_insert(Accept::json());

        assert_eq!(headers.get_all("accept").iter().count(), 1);
        assert_eq!(headers["accept"], "application/json");
    }

    #[test]
    fn typed_insert_replaces_existing_values() {
        let mut headers = HeaderMap::new();
        headers.append("accept", "text/html".parse().unwrap());
        headers.append("accept", "text/plain".parse().unwrap());

        headers.typed_insert(Accept::json());

        assert_eq!(headers.get_all("accept").iter().count(), 1);
        assert_eq!(headers["accept"], "application/json");
    }

    #[test]
    fn typed_get_joins_all_values() {
        let mut headers = HeaderMap::new();
        headers.append("accept", "text/html;q=0.8".parse().unwrap());
        headers.append("accept", "application/json;q=0.9".parse().unwrap());

        let accept = headers.typed_get::<Accept>().unwrap();
        assert_eq!(accept.preferences().len(), 2);
    }

    #[test]
    fn typed_get_absent_header() {
        let headers = HeaderMap::new();
        assert!(headers.typed_get::<Accept>().is_none());
    }
}
