use crate::data::{
    CharacterSet, Encoding, Language, media_type_from_name, MediaType, Metadata, Parameter,
    Preference, Quality,
};
use crate::error::ParseError;
use crate::grammar::HeaderReader;

/// A metadata kind that can be built from one preference header atom.
///
/// The one behavioral split between kinds: media type equality depends
/// on the parameters written before `q` (e.g. `charset=`), so a media
/// type keeps them, while every other kind leaves them on the
/// preference as extension parameters.
pub trait PreferenceMetadata: Metadata {
    /// True if the parameters before `q` belong to the metadata itself.
    const KEEPS_PARAMETERS: bool;

    /// Builds the metadata from a bare name and the parameters that
    /// belong to it (always empty unless [`KEEPS_PARAMETERS`] is set).
    ///
    /// [`KEEPS_PARAMETERS`]: Self::KEEPS_PARAMETERS
    fn from_atom(name: String, parameters: Vec<Parameter>) -> Result<Self, ParseError>;
}

impl PreferenceMetadata for MediaType {
    const KEEPS_PARAMETERS: bool = true;

    fn from_atom(name: String, parameters: Vec<Parameter>) -> Result<Self, ParseError> {
        Ok(media_type_from_name(name)?.with_parameters(parameters))
    }
}

impl PreferenceMetadata for CharacterSet {
    const KEEPS_PARAMETERS: bool = false;

    fn from_atom(name: String, _: Vec<Parameter>) -> Result<Self, ParseError> {
        Self::new(name)
    }
}

impl PreferenceMetadata for Language {
    const KEEPS_PARAMETERS: bool = false;

    fn from_atom(name: String, _: Vec<Parameter>) -> Result<Self, ParseError> {
        Self::new(name)
    }
}

impl PreferenceMetadata for Encoding {
    const KEEPS_PARAMETERS: bool = false;

    fn from_atom(name: String, _: Vec<Parameter>) -> Result<Self, ParseError> {
        Self::new(name)
    }
}

/// Reads every preference from one `Accept`-family header value.
///
/// Entries are separated by commas, parameters by semicolons; the
/// reserved `q` parameter becomes the entry's quality. A malformed or
/// quality-rejected entry is reported at debug level and skipped
/// without aborting the rest of the header.
pub fn read_preferences<M: PreferenceMetadata>(header: &str) -> Vec<Preference<M>> {
    HeaderReader::new(header).read_values(read_preference)
}

/// Reads media type preferences from an `Accept` header value.
#[must_use]
pub fn read_media_type_preferences(header: &str) -> Vec<Preference<MediaType>> {
    read_preferences(header)
}

/// Reads character set preferences from an `Accept-Charset` header
/// value.
#[must_use]
pub fn read_character_set_preferences(header: &str) -> Vec<Preference<CharacterSet>> {
    read_preferences(header)
}

/// Reads language preferences from an `Accept-Language` header value.
#[must_use]
pub fn read_language_preferences(header: &str) -> Vec<Preference<Language>> {
    read_preferences(header)
}

/// Reads encoding preferences from an `Accept-Encoding` header value.
#[must_use]
pub fn read_encoding_preferences(header: &str) -> Vec<Preference<Encoding>> {
    read_preferences(header)
}

/// Reads one preference entry, leaving the cursor before the
/// terminating comma. `Ok(None)` means only trailing whitespace was
/// left.
fn read_preference<M: PreferenceMetadata>(
    reader: &mut HeaderReader<'_>,
) -> Result<Option<Preference<M>>, ParseError> {
    reader.skip_spaces();
    let name = reader.read_metadata_name()?;
    if name.is_empty() {
        return match reader.peek() {
            None => Ok(None),
            Some(_) => Err(ParseError::malformed("empty metadata name")),
        };
    }

    let mut raw_parameters = Vec::new();
    while reader.skip_parameter_separator() {
        raw_parameters.push(reader.read_parameter()?);
    }
    match reader.peek() {
        None | Some(',') => {}
        Some(c) => {
            return Err(ParseError::malformed(format!(
                "unexpected character {c:?} after preference parameters"
            )));
        }
    }

    let mut quality = Quality::ONE;
    let mut seen_quality = false;
    let mut metadata_parameters = Vec::new();
    let mut extensions = Vec::new();
    for parameter in raw_parameters {
        if !seen_quality && parameter.name().eq_ignore_ascii_case("q") {
            let value = parameter
                .value()
                .ok_or_else(|| ParseError::unsupported_quality(""))?;
            quality = value.parse()?;
            seen_quality = true;
        } else if seen_quality || !M::KEEPS_PARAMETERS {
            extensions.push(parameter);
        } else {
            metadata_parameters.push(parameter);
        }
    }

    let metadata = M::from_atom(name, metadata_parameters)?;
    Ok(Some(Preference::from_parts(metadata, quality, extensions)))
}
