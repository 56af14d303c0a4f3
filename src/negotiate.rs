//! Accept-Language negotiation.
//!
//! The header is parsed into requested ranges, every range is matched against the
//! supported languages (exactly, or through its base language with a down-weighted
//! quality) and the resulting candidates are ordered by quality. Ties keep header order.
//!
//! Qualities are kept in fixed point so that equal weights compare equal: a qvalue is
//! stored in thousandths and a [`Confidence`] modifier in tenths.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::language::{
    Confidence,
    LanguageError,
    LanguageTag,
};

/// Why a header could not be parsed. Negotiation treats every variant as "no match".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderParseError {
    #[error("Invalid language range '{range}': {source}")]
    InvalidRange {
        range: String,
        #[source]
        source: LanguageError,
    },

    #[error("Invalid quality value '{0}'")]
    InvalidQuality(String),
}

/// One element of an Accept-Language header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageRange {
    /// `*`
    Wildcard { quality: u16 },
    Tag {
        tag: LanguageTag,
        /// Thousandths, `0..=1000`.
        quality: u16,
        /// Whether the header spelled the tag in canonical form.
        canonical: bool,
    },
}

/// A supported language matched by the header, with its effective quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptCandidate {
    pub tag: LanguageTag,
    /// Requested quality times the confidence modifier, in ten-thousandths.
    pub weight: u32,
    pub confidence: Confidence,
}

impl AcceptCandidate {
    /// Effective quality in `[0, 1]`.
    #[must_use]
    #[allow(clippy::float_arithmetic)]
    pub fn quality(&self) -> f64 {
        f64::from(self.weight) / 10_000.0
    }
}

/// Parses an Accept-Language header into ranges, in header order.
///
/// Empty elements are skipped and parameters other than `q` are ignored.
///
/// # Errors
/// Returns error when a language range or a quality value is malformed.
pub fn parse_accept_language(header: &str) -> Result<Vec<LanguageRange>, HeaderParseError> {
    let mut ranges = Vec::new();

    for element in header.split(',') {
        let mut parts = element.split(';');
        let range = parts.next().unwrap_or_default().trim();
        if range.is_empty() {
            continue;
        }

        let mut quality = 1000;
        for param in parts {
            if let Some((name, value)) = param.split_once('=')
                && name.trim().eq_ignore_ascii_case("q")
            {
                quality = parse_quality(value.trim())?;
            }
        }

        if range == "*" {
            ranges.push(LanguageRange::Wildcard { quality });
            continue;
        }

        let tag = LanguageTag::parse(range).map_err(|source| HeaderParseError::InvalidRange {
            range: range.to_string(),
            source,
        })?;
        let canonical = tag.as_str() == range;
        ranges.push(LanguageRange::Tag { tag, quality, canonical });
    }

    Ok(ranges)
}

/// Parses an RFC 9110 `qvalue` (`0[.ddd]` or `1[.000]`) into thousandths.
fn parse_quality(value: &str) -> Result<u16, HeaderParseError> {
    let invalid = || HeaderParseError::InvalidQuality(value.to_string());

    let (integer, fraction) = value.split_once('.').unwrap_or((value, ""));
    let well_formed = matches!(integer, "0" | "1")
        && fraction.len() <= 3
        && fraction.chars().all(|c| c.is_ascii_digit())
        && (integer == "0" || fraction.chars().all(|c| c == '0'));
    if !well_formed {
        return Err(invalid());
    }

    if integer == "1" {
        return Ok(1000);
    }
    let thousandths: u32 = fraction
        .chars()
        .zip([100, 10, 1])
        .filter_map(|(digit, scale)| digit.to_digit(10).map(|digit| digit * scale))
        .sum();
    u16::try_from(thousandths).map_err(|_| invalid())
}

/// Matches Accept-Language headers against a fixed set of supported languages.
#[derive(Debug, Clone)]
pub struct LanguageMatcher {
    /// Languages a candidate may resolve to.
    supported: BTreeSet<LanguageTag>,
    /// Returned by [`LanguageMatcher::best_or_fallback`] when nothing matches.
    fallback: LanguageTag,
}

impl LanguageMatcher {
    #[must_use]
    pub fn new(supported: impl IntoIterator<Item = LanguageTag>, fallback: LanguageTag) -> Self {
        Self { supported: supported.into_iter().collect(), fallback }
    }

    #[must_use]
    pub const fn fallback(&self) -> &LanguageTag {
        &self.fallback
    }

    #[must_use]
    pub const fn supported(&self) -> &BTreeSet<LanguageTag> {
        &self.supported
    }

    /// Candidates for `header`, best first.
    ///
    /// A malformed header yields no candidates.
    #[must_use]
    pub fn rank(&self, header: &str) -> Vec<AcceptCandidate> {
        let ranges = match parse_accept_language(header) {
            Ok(ranges) => ranges,
            Err(error) => {
                tracing::debug!(header, %error, "Ignoring malformed Accept-Language header");
                return Vec::new();
            }
        };

        let mut candidates: Vec<AcceptCandidate> =
            ranges.into_iter().filter_map(|range| self.match_range(range)).collect();

        // `sort_by` is stable: equal weights keep header order.
        candidates.sort_by(|a, b| b.weight.cmp(&a.weight));
        tracing::trace!(header, ?candidates, "Ranked Accept-Language candidates");
        candidates
    }

    /// Supported languages acceptable for `header`, best first and without duplicates.
    ///
    /// An empty result means negotiation failed; the fallback is not injected.
    #[must_use]
    pub fn accept_language(&self, header: &str) -> Vec<LanguageTag> {
        let mut tags: Vec<LanguageTag> = Vec::new();
        for candidate in self.rank(header) {
            if !tags.contains(&candidate.tag) {
                tags.push(candidate.tag);
            }
        }
        tags
    }

    /// Best acceptable language, or the configured fallback.
    #[must_use]
    pub fn best_or_fallback(&self, header: &str) -> LanguageTag {
        self.accept_language(header).into_iter().next().unwrap_or_else(|| self.fallback.clone())
    }

    /// Candidate for a single range, if any supported language accepts it.
    fn match_range(&self, range: LanguageRange) -> Option<AcceptCandidate> {
        let LanguageRange::Tag { tag, quality, canonical } = range else {
            return None;
        };
        if quality == 0 {
            return None;
        }

        if self.supported.contains(&tag) {
            return Some(AcceptCandidate {
                tag,
                weight: u32::from(quality) * Confidence::Exact.modifier(),
                confidence: Confidence::Exact,
            });
        }

        let (base, confidence) = tag.base()?;
        if !self.supported.contains(&base) {
            return None;
        }
        let confidence = if canonical { confidence } else { Confidence::Low };

        Some(AcceptCandidate { tag: base, weight: u32::from(quality) * confidence.modifier(), confidence })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn matcher(supported: &[&str]) -> LanguageMatcher {
        LanguageMatcher::new(
            supported.iter().map(|raw| LanguageTag::parse(raw).unwrap()),
            LanguageTag::parse("en").unwrap(),
        )
    }

    fn tags(candidates: &[AcceptCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.tag.as_str()).collect()
    }

    #[googletest::test]
    fn exact_match_is_never_down_weighted() {
        let matcher = matcher(&["en", "en-US"]);

        let candidates = matcher.rank("en-US");

        expect_that!(tags(&candidates), elements_are![eq(&"en-US")]);
        expect_that!(candidates[0].weight, eq(10_000));
        expect_that!(candidates[0].quality(), eq(1.0));
        expect_that!(candidates[0].confidence, eq(Confidence::Exact));
    }

    #[googletest::test]
    fn base_language_match_is_weighted() {
        let matcher = matcher(&["en"]);

        let candidates = matcher.rank("en-US;q=1.0");

        expect_that!(tags(&candidates), elements_are![eq(&"en")]);
        expect_that!(candidates[0].weight, eq(6000));
        expect_that!(candidates[0].confidence, eq(Confidence::High));
    }

    #[rstest]
    #[case::script("zh-Hant", &["zh"], 3000)]
    #[case::non_canonical("en_us", &["en"], 3000)]
    #[case::variant("de-CH-1996", &["de"], 3000)]
    #[case::half_quality("en-GB;q=0.5", &["en"], 3000)]
    #[case::three_digits("en-GB;q=0.125", &["en"], 750)]
    fn low_confidence_reductions(
        #[case] header: &str,
        #[case] supported: &[&str],
        #[case] expected: u32,
    ) {
        let candidates = matcher(supported).rank(header);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].weight, expected);
    }

    #[rstest]
    #[case::no_match("xx-YY")]
    #[case::empty("")]
    #[case::blank("  ,  ")]
    #[case::bad_quality("en;q=2")]
    #[case::non_numeric_quality("en;q=high")]
    #[case::too_precise_quality("en;q=0.1234")]
    #[case::bad_tag("en-US, !!, nl")]
    #[case::wildcard_only("*")]
    #[case::refused("nl;q=0")]
    fn no_candidates(#[case] header: &str) {
        let matcher = matcher(&["en", "nl"]);

        assert!(matcher.rank(header).is_empty());
        assert!(matcher.accept_language(header).is_empty());
    }

    #[googletest::test]
    fn candidates_sorted_by_quality() {
        let matcher = matcher(&["en", "nl", "de"]);

        let candidates = matcher.rank("de;q=0.2, nl;q=0.9, en;q=0.5");

        expect_that!(tags(&candidates), elements_are![eq(&"nl"), eq(&"en"), eq(&"de")]);
        expect_that!(candidates.windows(2).all(|pair| pair[0].weight >= pair[1].weight), eq(true));
    }

    #[googletest::test]
    fn exact_match_outranks_inferred_match_with_same_declared_quality() {
        let matcher = matcher(&["fr", "nl-BE"]);

        let accepted: Vec<String> =
            matcher.accept_language("fr-CA, nl-BE").iter().map(ToString::to_string).collect();

        expect_that!(accepted, elements_are![eq("nl-BE"), eq("fr")]);
    }

    #[rstest]
    #[case("nl;q=0.6, en-US, de;q=0.6", &["en", "nl", "de"], &["nl", "en", "de"])]
    #[case("nl;q=0.48, en-US;q=0.8", &["en", "nl"], &["nl", "en"])]
    #[case("en-US;q=0.8, nl;q=0.48", &["en", "nl"], &["en", "nl"])]
    #[case("de-AT;q=0.5, nl;q=0.3", &["de", "nl"], &["de", "nl"])]
    fn ties_keep_header_order(
        #[case] header: &str,
        #[case] supported: &[&str],
        #[case] expected: &[&str],
    ) {
        let candidates = matcher(supported).rank(header);

        assert_eq!(tags(&candidates), expected);
        assert!(candidates.windows(2).all(|pair| pair[0].weight == pair[1].weight));
    }

    #[googletest::test]
    fn accept_language_deduplicates() {
        let matcher = matcher(&["en"]);

        let accepted: Vec<String> = matcher
            .accept_language("en-US, en;q=0.4, en-GB;q=0.9")
            .iter()
            .map(ToString::to_string)
            .collect();

        expect_that!(accepted, elements_are![eq("en")]);
    }

    #[rstest]
    #[case("nl-NL, en;q=0.5", "nl")]
    #[case("xx", "en")]
    #[case("garbage;;q=", "en")]
    fn best_or_fallback(#[case] header: &str, #[case] expected: &str) {
        let matcher = matcher(&["nl", "de"]);

        assert_eq!(matcher.best_or_fallback(header).as_str(), expected);
    }

    #[rstest]
    fn parse_keeps_wildcards_and_parameters() {
        let ranges = parse_accept_language("fr-CH, fr;q=0.9;level=1, *;q=0.5").unwrap();

        assert_eq!(ranges.len(), 3);
        assert!(matches!(&ranges[0], LanguageRange::Tag { quality: 1000, canonical: true, .. }));
        assert!(matches!(&ranges[1], LanguageRange::Tag { quality: 900, .. }));
        assert!(matches!(ranges[2], LanguageRange::Wildcard { quality: 500 }));
    }

    #[rstest]
    #[case("0", 0)]
    #[case("0.", 0)]
    #[case("0.75", 750)]
    #[case("0.48", 480)]
    #[case("0.005", 5)]
    #[case("1", 1000)]
    #[case("1.000", 1000)]
    fn parse_quality_values(#[case] raw: &str, #[case] expected: u16) {
        assert_eq!(parse_quality(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("1.5")]
    #[case("1.001")]
    #[case("-0.5")]
    #[case(".5")]
    #[case("")]
    fn parse_quality_rejects(#[case] raw: &str) {
        assert!(parse_quality(raw).is_err());
    }
}
