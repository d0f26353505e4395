use crate::common::derive_preference_header;
use crate::data::{CharacterSet, Encoding, Language, MediaType, Preference};

derive_preference_header! {
    /// `Accept` header, defined in
    /// [RFC2616](https://datatracker.ietf.org/doc/html/rfc2616#section-14.1)
    ///
    /// The `Accept` header field can be used by user agents to specify
    /// response media types that are acceptable.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept = #( media-range [ accept-params ] )
    ///
    /// media-range    = ( "*/*"
    ///                  / ( type "/" "*" )
    ///                  / ( type "/" subtype )
    ///                  ) *( OWS ";" OWS parameter )
    /// accept-params  = weight *( accept-ext )
    /// accept-ext = OWS ";" OWS token [ "=" ( token / quoted-string ) ]
    /// ```
    ///
    /// # Example values
    /// * `audio/*; q=0.2, audio/basic`
    /// * `text/plain; q=0.5, text/html, text/x-dvi; q=0.8, text/x-c`
    (Accept, ACCEPT) => MediaType
}

impl Accept {
    /// A constructor to easily create `Accept: */*`.
    #[must_use]
    pub fn star() -> Self {
        Self::new(Preference::new(MediaType::ALL))
    }

    /// A constructor to easily create `Accept: application/json`.
    #[must_use]
    pub fn json() -> Self {
        Self::new(Preference::new(MediaType::APPLICATION_JSON))
    }

    /// A constructor to easily create `Accept: text/*`.
    #[must_use]
    pub fn text() -> Self {
        Self::new(Preference::new(MediaType::TEXT_ALL))
    }

    /// A constructor to easily create `Accept: text/html`.
    #[must_use]
    pub fn html() -> Self {
        Self::new(Preference::new(MediaType::TEXT_HTML))
    }
}

derive_preference_header! {
    /// `Accept-Charset` header, defined in
    /// [RFC2616](https://datatracker.ietf.org/doc/html/rfc2616#section-14.2)
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept-Charset = 1#( ( charset / "*" ) [ weight ] )
    /// ```
    ///
    /// # Example values
    /// * `iso-8859-5, unicode-1-1;q=0.8`
    (AcceptCharset, ACCEPT_CHARSET) => CharacterSet
}

impl AcceptCharset {
    /// A constructor to easily create `Accept-Charset: utf-8`.
    #[must_use]
    pub fn utf_8() -> Self {
        Self::new(Preference::new(CharacterSet::UTF_8))
    }
}

derive_preference_header! {
    /// `Accept-Language` header, defined in
    /// [RFC2616](https://datatracker.ietf.org/doc/html/rfc2616#section-14.4)
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept-Language = 1#( language-range [ weight ] )
    /// language-range  = ( 1*8ALPHA *( "-" 1*8alphanum ) ) / "*"
    /// ```
    ///
    /// # Example values
    /// * `da, en-gb;q=0.8, en;q=0.7`
    (AcceptLanguage, ACCEPT_LANGUAGE) => Language
}

derive_preference_header! {
    /// `Accept-Encoding` header, defined in
    /// [RFC2616](https://datatracker.ietf.org/doc/html/rfc2616#section-14.3)
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept-Encoding  = #( codings [ weight ] )
    /// codings          = content-coding / "identity" / "*"
    /// ```
    ///
    /// # Example values
    /// * `gzip, deflate`
    /// * `br;q=1.0, gzip;q=0.8, *;q=0.1`
    (AcceptEncoding, ACCEPT_ENCODING) => Encoding
}

impl AcceptEncoding {
    /// A constructor to easily create `Accept-Encoding: gzip`.
    #[must_use]
    pub fn gzip() -> Self {
        Self::new(Preference::new(Encoding::GZIP))
    }

    /// A constructor to easily create `Accept-Encoding: identity`.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(Preference::new(Encoding::IDENTITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{test_decode, test_encode};
    use crate::data::{Metadata, Quality};

    #[test]
    fn decode_rfc_example() {
        let Accept(preferences) = test_decode(&["audio/*; q=0.2, audio/basic"]).unwrap();

        assert_eq!(preferences.len(), 2);
        assert_eq!(preferences[0].metadata().name(), "audio/*");
        assert_eq!(preferences[0].quality(), Quality::from_thousandths(200).unwrap());
        assert_eq!(preferences[1].metadata().name(), "audio/basic");
        assert_eq!(preferences[1].quality(), Quality::ONE);
    }

    #[test]
    fn decode_multiple_values() {
        let Accept(preferences) =
            test_decode(&["text/html;q=0.8", "application/json;q=0.9"]).unwrap();

        assert_eq!(preferences.len(), 2);
        assert_eq!(preferences[0].metadata().name(), "text/html");
        assert_eq!(preferences[1].metadata().name(), "application/json");
    }

    #[test]
    fn ranked_orders_by_quality() {
        let accept: Accept =
            test_decode(&["text/html;q=0.8, application/json;q=0.9, */*;q=0.1"]).unwrap();

        let ranked = accept.ranked();
        assert_eq!(ranked[0].metadata().name(), "application/json");
        assert_eq!(ranked[1].metadata().name(), "text/html");
        assert_eq!(ranked[2].metadata().name(), "*/*");
    }

    #[test]
    fn decode_keeps_media_parameters() {
        let Accept(preferences) =
            test_decode(&["text/plain; charset=utf-8; q=0.5; level=2"]).unwrap();

        let preference = &preferences[0];
        assert_eq!(preference.metadata().charset(), Some("utf-8"));
        assert_eq!(preference.quality(), Quality::from_thousandths(500).unwrap());
        assert_eq!(preference.parameters().len(), 1);
        assert_eq!(preference.parameters()[0].name(), "level");
    }

    #[test]
    fn decode_rejects_header_with_no_valid_entry() {
        assert!(test_decode::<Accept>(&[";;;"]).is_none());
    }

    #[test]
    fn encode_accept() {
        let headers = test_encode(Accept::json());
        assert_eq!(headers["accept"], "application/json");
    }

    #[test]
    fn encode_omits_default_quality() {
        let accept: AcceptEncoding = test_decode(&["br;q=1.0, gzip;q=0.8, *;q=0.1"]).unwrap();
        let headers = test_encode(accept);
        assert_eq!(headers["accept-encoding"], "br, gzip;q=0.8, *;q=0.1");
    }

    #[test]
    fn decode_languages() {
        let AcceptLanguage(preferences) = test_decode(&["da, en-gb;q=0.8, en;q=0.7"]).unwrap();

        assert_eq!(preferences.len(), 3);
        assert_eq!(preferences[1].metadata().primary_tag(), "en");
        assert_eq!(
            preferences[1].metadata().sub_tags().collect::<Vec<_>>(),
            ["gb"]
        );
    }

    #[test]
    fn decode_charsets() {
        let AcceptCharset(preferences) =
            test_decode(&["iso-8859-5, unicode-1-1;q=0.8"]).unwrap();

        assert_eq!(preferences.len(), 2);
        assert_eq!(preferences[0].metadata().name(), "iso-8859-5");
    }
}
