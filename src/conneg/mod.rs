//! Preference-based content negotiation.
//!
//! A server declares the representations it can produce as [`Variant`]s,
//! each constrained along up to four independent dimensions: media type,
//! language, character set and encoding. A [`Negotiator`] scores those
//! variants against the client's parsed `Accept-*` preferences and picks
//! the best one, or ranks them all.
//!
//! Dimensions combine by strict lexicographic priority: media type
//! first, then language, then character set, then encoding. The media
//! type dominates because it decides whether the client can consume the
//! payload at all. Within one dimension a variant is scored by the
//! quality of its best matching preference, with match specificity as
//! the tie-break, so `application/json;q=0.9` outranks `*/*;q=0.9` for
//! a JSON variant. Equal scores fall back to the variants' declared
//! order, which keeps the outcome deterministic.

use std::fmt;

use http::HeaderMap;

use crate::common::{Accept, AcceptCharset, AcceptEncoding, AcceptLanguage};
use crate::data::{
    CharacterSet, Encoding, Language, MediaType, Metadata, Preference, Quality, Specificity,
};
use crate::error::NoAcceptableVariant;
use crate::map_ext::HeaderMapExt;

/// One representation the server can produce.
///
/// Every dimension is optional; an unset dimension is unconstrained and
/// matches any client preference with neutral weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variant {
    media_type: Option<MediaType>,
    language: Option<Language>,
    character_set: Option<CharacterSet>,
    encoding: Option<Encoding>,
}

impl Variant {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn media_type(&self) -> Option<&MediaType> {
        self.media_type.as_ref()
    }

    #[must_use]
    pub fn language(&self) -> Option<&Language> {
        self.language.as_ref()
    }

    #[must_use]
    pub fn character_set(&self) -> Option<&CharacterSet> {
        self.character_set.as_ref()
    }

    #[must_use]
    pub fn encoding(&self) -> Option<&Encoding> {
        self.encoding.as_ref()
    }

    pub fn set_media_type(&mut self, media_type: MediaType) -> &mut Self {
        self.media_type = Some(media_type);
        self
    }

    #[must_use]
    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn set_language(&mut self, language: Language) -> &mut Self {
        self.language = Some(language);
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn set_character_set(&mut self, character_set: CharacterSet) -> &mut Self {
        self.character_set = Some(character_set);
        self
    }

    #[must_use]
    pub fn with_character_set(mut self, character_set: CharacterSet) -> Self {
        self.character_set = Some(character_set);
        self
    }

    pub fn set_encoding(&mut self, encoding: Encoding) -> &mut Self {
        self.encoding = Some(encoding);
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for part in [
            self.media_type.as_ref().map(ToString::to_string),
            self.language.as_ref().map(ToString::to_string),
            self.character_set.as_ref().map(ToString::to_string),
            self.encoding.as_ref().map(ToString::to_string),
        ]
        .into_iter()
        .flatten()
        {
            write!(f, "{sep}{part}")?;
            sep = " ";
        }
        Ok(())
    }
}

/// How a variant is treated when the client expressed preferences for a
/// dimension and none of them match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Policy {
    /// The variant is excluded. This is the default.
    #[default]
    Strict,
    /// The variant survives with a zero score in that dimension, so it
    /// can still win when nothing else is acceptable.
    Permissive,
}

/// The client's parsed preferences, one list per dimension.
///
/// An empty list means the client accepts anything in that dimension at
/// quality 1.
#[derive(Debug, Clone, Default)]
pub struct ClientPreferences {
    media_types: Vec<Preference<MediaType>>,
    languages: Vec<Preference<Language>>,
    character_sets: Vec<Preference<CharacterSet>>,
    encodings: Vec<Preference<Encoding>>,
}

impl ClientPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects preferences from the request's `Accept`,
    /// `Accept-Language`, `Accept-Charset` and `Accept-Encoding`
    /// headers. Absent or undecodable headers leave the matching
    /// dimension empty.
    #[must_use]
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let mut preferences = Self::new();
        if let Some(accept) = headers.typed_get::<Accept>() {
            preferences.media_types = accept.into_preferences();
        }
        if let Some(accept) = headers.typed_get::<AcceptLanguage>() {
            preferences.languages = accept.into_preferences();
        }
        if let Some(accept) = headers.typed_get::<AcceptCharset>() {
            preferences.character_sets = accept.into_preferences();
        }
        if let Some(accept) = headers.typed_get::<AcceptEncoding>() {
            preferences.encodings = accept.into_preferences();
        }
        preferences
    }

    pub fn set_media_types(&mut self, media_types: Vec<Preference<MediaType>>) -> &mut Self {
        self.media_types = media_types;
        self
    }

    #[must_use]
    pub fn with_media_types(mut self, media_types: Vec<Preference<MediaType>>) -> Self {
        self.media_types = media_types;
        self
    }

    pub fn set_languages(&mut self, languages: Vec<Preference<Language>>) -> &mut Self {
        self.languages = languages;
        self
    }

    #[must_use]
    pub fn with_languages(mut self, languages: Vec<Preference<Language>>) -> Self {
        self.languages = languages;
        self
    }

    pub fn set_character_sets(
        &mut self,
        character_sets: Vec<Preference<CharacterSet>>,
    ) -> &mut Self {
        self.character_sets = character_sets;
        self
    }

    #[must_use]
    pub fn with_character_sets(mut self, character_sets: Vec<Preference<CharacterSet>>) -> Self {
        self.character_sets = character_sets;
        self
    }

    pub fn set_encodings(&mut self, encodings: Vec<Preference<Encoding>>) -> &mut Self {
        self.encodings = encodings;
        self
    }

    #[must_use]
    pub fn with_encodings(mut self, encodings: Vec<Preference<Encoding>>) -> Self {
        self.encodings = encodings;
        self
    }
}

/// One dimension's contribution: the winning preference's quality and,
/// when a concrete match happened, how specific it was. Quality compares
/// first, specificity breaks ties.
type DimensionScore = (Quality, Option<Specificity>);

/// The full lexicographic key for one variant, in dimension priority
/// order.
type Score = [DimensionScore; 4];

const NEUTRAL: DimensionScore = (Quality::ONE, None);

/// Picks the best of a fixed set of variants for each request.
#[derive(Debug, Clone, Default)]
pub struct Negotiator {
    variants: Vec<Variant>,
    policy: Policy,
}

impl Negotiator {
    #[must_use]
    pub fn new(variants: Vec<Variant>) -> Self {
        Self {
            variants,
            policy: Policy::default(),
        }
    }

    pub fn set_policy(&mut self, policy: Policy) -> &mut Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// The single best variant for the given preferences.
    ///
    /// Fails when no variant is acceptable: every variant was either
    /// refused with `q=0` or, under [`Policy::Strict`], left unmatched
    /// in a dimension the client constrained.
    pub fn negotiate(&self, preferences: &ClientPreferences) -> Result<&Variant, NoAcceptableVariant> {
        self.rank(preferences)
            .into_iter()
            .next()
            .ok_or(NoAcceptableVariant)
    }

    /// All acceptable variants, best first. Variants with equal scores
    /// keep their declared order.
    #[must_use]
    pub fn rank(&self, preferences: &ClientPreferences) -> Vec<&Variant> {
        let mut ranked: Vec<(&Variant, Score)> = self
            .variants
            .iter()
            .filter_map(|variant| {
                self.score(variant, preferences)
                    .map(|score| (variant, score))
            })
            .collect();
        // Stable sort keeps declared order among equal scores.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().map(|(variant, _)| variant).collect()
    }

    fn score(&self, variant: &Variant, preferences: &ClientPreferences) -> Option<Score> {
        Some([
            self.score_dimension(variant.media_type(), &preferences.media_types)?,
            self.score_dimension(variant.language(), &preferences.languages)?,
            self.score_dimension(variant.character_set(), &preferences.character_sets)?,
            self.score_dimension(variant.encoding(), &preferences.encodings)?,
        ])
    }

    /// Scores one dimension, or excludes the variant (`None`).
    ///
    /// The candidate's best match is the most specific preference that
    /// matches it, so an exact `q=0` refusal is found even when a
    /// wildcard would otherwise accept the value.
    fn score_dimension<M: Metadata>(
        &self,
        candidate: Option<&M>,
        preferences: &[Preference<M>],
    ) -> Option<DimensionScore> {
        let Some(candidate) = candidate else {
            return Some(NEUTRAL);
        };
        if preferences.is_empty() {
            return Some(NEUTRAL);
        }

        let mut best: Option<(Specificity, Quality)> = None;
        for preference in preferences {
            if let Some(specificity) = preference.metadata().matches(candidate) {
                let entry = (specificity, preference.quality());
                if best.is_none_or(|current| entry > current) {
                    best = Some(entry);
                }
            }
        }

        match best {
            // Explicit refusal, regardless of policy.
            Some((_, quality)) if quality.is_zero() => None,
            Some((specificity, quality)) => Some((quality, Some(specificity))),
            None => match self.policy {
                Policy::Strict => None,
                Policy::Permissive => Some((Quality::ZERO, None)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{read_language_preferences, read_media_type_preferences};

    fn media_variants() -> Vec<Variant> {
        vec![
            Variant::new().with_media_type(MediaType::TEXT_HTML),
            Variant::new().with_media_type(MediaType::APPLICATION_JSON),
        ]
    }

    #[test]
    fn strict_policy_selects_exact_preference() {
        let negotiator = Negotiator::new(media_variants());
        let preferences = ClientPreferences::new()
            .with_media_types(read_media_type_preferences("application/json;q=1.0, text/*;q=0.5"));

        let best = negotiator.negotiate(&preferences).unwrap();
        assert_eq!(best.media_type(), Some(&MediaType::APPLICATION_JSON));
    }

    #[test]
    fn quality_zero_is_explicit_refusal() {
        let negotiator =
            Negotiator::new(vec![Variant::new().with_media_type(MediaType::TEXT_HTML)]);
        let preferences = ClientPreferences::new()
            .with_media_types(read_media_type_preferences("text/html;q=0"));

        assert_eq!(negotiator.negotiate(&preferences), Err(NoAcceptableVariant));
    }

    #[test]
    fn quality_zero_beats_wildcard_rescue() {
        let negotiator =
            Negotiator::new(vec![Variant::new().with_media_type(MediaType::TEXT_HTML)]);
        let preferences = ClientPreferences::new()
            .with_media_types(read_media_type_preferences("*/*;q=1, text/html;q=0"));

        assert_eq!(negotiator.negotiate(&preferences), Err(NoAcceptableVariant));
    }

    #[test]
    fn specificity_breaks_quality_ties() {
        let negotiator = Negotiator::new(media_variants());
        let preferences = ClientPreferences::new()
            .with_media_types(read_media_type_preferences("text/html;q=0.9, */*;q=0.9"));

        // Both variants score 0.9, but text/html matched exactly.
        let best = negotiator.negotiate(&preferences).unwrap();
        assert_eq!(best.media_type(), Some(&MediaType::TEXT_HTML));
    }

    #[test]
    fn empty_preferences_accept_anything() {
        let negotiator = Negotiator::new(media_variants());
        let ranked = negotiator.rank(&ClientPreferences::new());
        // All neutral, so declared order decides.
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].media_type(), Some(&MediaType::TEXT_HTML));
    }

    #[test]
    fn strict_excludes_unmatched_variants() {
        let negotiator = Negotiator::new(media_variants());
        let preferences = ClientPreferences::new()
            .with_media_types(read_media_type_preferences("image/png"));

        assert_eq!(negotiator.negotiate(&preferences), Err(NoAcceptableVariant));
    }

    #[test]
    fn permissive_keeps_unmatched_variants_as_last_resort() {
        let negotiator = Negotiator::new(media_variants()).with_policy(Policy::Permissive);
        let preferences = ClientPreferences::new()
            .with_media_types(read_media_type_preferences("application/json, image/png"));

        let ranked = negotiator.rank(&preferences);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].media_type(), Some(&MediaType::APPLICATION_JSON));
        assert_eq!(ranked[1].media_type(), Some(&MediaType::TEXT_HTML));
    }

    #[test]
    fn media_type_outranks_language() {
        let variants = vec![
            Variant::new()
                .with_media_type(MediaType::TEXT_HTML)
                .with_language(Language::FRENCH),
            Variant::new()
                .with_media_type(MediaType::APPLICATION_JSON)
                .with_language(Language::ENGLISH),
        ];
        let negotiator = Negotiator::new(variants).with_policy(Policy::Permissive);
        let preferences = ClientPreferences::new()
            .with_media_types(read_media_type_preferences("application/json;q=0.6, text/html;q=0.5"))
            .with_languages(read_language_preferences("fr"));

        // French is the only acceptable language, but the media type
        // dimension decides first.
        let best = negotiator.negotiate(&preferences).unwrap();
        assert_eq!(best.media_type(), Some(&MediaType::APPLICATION_JSON));
    }

    #[test]
    fn partial_language_match_ranks_below_exact() {
        let variants = vec![
            Variant::new().with_language(Language::ENGLISH_US),
            Variant::new().with_language(Language::ENGLISH),
        ];
        let negotiator = Negotiator::new(variants);
        let preferences =
            ClientPreferences::new().with_languages(read_language_preferences("en"));

        let ranked = negotiator.rank(&preferences);
        // "en" matches en exactly and en-us partially; equal quality,
        // so specificity orders them.
        assert_eq!(ranked[0].language(), Some(&Language::ENGLISH));
        assert_eq!(ranked[1].language(), Some(&Language::ENGLISH_US));
    }

    #[test]
    fn unconstrained_variant_matches_everything() {
        let negotiator = Negotiator::new(vec![Variant::new()]);
        let preferences = ClientPreferences::new()
            .with_media_types(read_media_type_preferences("application/json"));

        assert!(negotiator.negotiate(&preferences).is_ok());
    }
}
