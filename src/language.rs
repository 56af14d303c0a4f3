//! Language tags.
//!
//! A [`LanguageTag`] wraps a [`LanguageIdentifier`] and caches its canonical string so
//! that equality is plain string equality: `en_us`, `EN-us` and `en-US` all end up as
//! `en-US`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{
    Hash,
    Hasher,
};
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use thiserror::Error;
use unic_langid::LanguageIdentifier;

mod names;

/// Shared instance returned by [`LanguageTag::undefined_ref`].
static UNDEFINED_TAG: LazyLock<LanguageTag> =
    LazyLock::new(|| LanguageTag::from_identifier(LanguageIdentifier::default()));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("Language tag is empty")]
    Empty,

    #[error("Invalid language tag '{tag}': {reason}")]
    Invalid { tag: String, reason: String },
}

/// How certain a reduction to the base language is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    /// No reduction took place.
    Exact,
    /// A plain region strip such as `en-US` -> `en`.
    High,
    /// Scripts, variants, several subtags or non-canonical input.
    Low,
}

impl Confidence {
    /// Weight, in tenths, applied to the requested quality of a candidate matched with
    /// this confidence.
    #[must_use]
    pub const fn modifier(self) -> u32 {
        match self {
            Self::Exact => 10,
            Self::High => 6,
            Self::Low => 3,
        }
    }
}

/// Language identifier such as `en`, `en-US` or `zh-Hant-TW`.
#[derive(Debug, Clone)]
pub struct LanguageTag {
    /// Parsed subtags.
    id: LanguageIdentifier,
    /// `id` rendered once; used for comparison, hashing and ordering.
    canonical: String,
}

impl LanguageTag {
    /// Parses a free-form language identifier.
    ///
    /// Both `-` and `_` separate subtags. Casing is normalised: `zh-hant-tw` becomes
    /// `zh-Hant-TW`.
    pub fn parse(raw: &str) -> Result<Self, LanguageError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LanguageError::Empty);
        }

        let id = trimmed.parse::<LanguageIdentifier>().map_err(|error| LanguageError::Invalid {
            tag: trimmed.to_string(),
            reason: error.to_string(),
        })?;

        Ok(Self::from_identifier(id))
    }

    /// Parses `raw`, falling back to `default` when it is not a valid tag.
    #[must_use]
    pub fn parse_or(raw: &str, default: &Self) -> Self {
        Self::parse(raw).unwrap_or_else(|error| {
            tracing::trace!(raw, %error, fallback = %default, "Using fallback language tag");
            default.clone()
        })
    }

    /// Wraps an already parsed identifier.
    fn from_identifier(id: LanguageIdentifier) -> Self {
        let canonical = id.to_string();
        Self { id, canonical }
    }

    /// The `und` sentinel.
    #[must_use]
    pub fn undefined() -> Self {
        UNDEFINED_TAG.clone()
    }

    /// Borrowed `und` sentinel.
    #[must_use]
    pub fn undefined_ref() -> &'static Self {
        &UNDEFINED_TAG
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        *self == *UNDEFINED_TAG
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    #[must_use]
    pub const fn identifier(&self) -> &LanguageIdentifier {
        &self.id
    }

    /// Primary language subtag (`en` for `en-US`).
    #[must_use]
    pub fn primary(&self) -> &str {
        self.id.language.as_str()
    }

    /// Name of the language in the language itself, such as `Nederlands`.
    ///
    /// Scripts, regions and variants are appended as subtags: `English (US)`,
    /// `中文 (Hant, TW)`. Languages without a known name are shown as their tag.
    #[must_use]
    pub fn native_name(&self) -> String {
        let Some(name) = names::autonym(self.primary()) else {
            return self.canonical.clone();
        };

        let qualifiers: Vec<String> = self
            .id
            .script
            .iter()
            .map(ToString::to_string)
            .chain(self.id.region.iter().map(ToString::to_string))
            .chain(self.id.variants().map(ToString::to_string))
            .collect();
        if qualifiers.is_empty() {
            name.to_string()
        } else {
            format!("{name} ({})", qualifiers.join(", "))
        }
    }

    /// Projects the tag onto its base language.
    ///
    /// Returns `None` when the tag has no subtags to strip.
    #[must_use]
    pub fn base(&self) -> Option<(Self, Confidence)> {
        let has_variants = self.id.variants().next().is_some();
        if self.id.script.is_none() && self.id.region.is_none() && !has_variants {
            return None;
        }

        let confidence = if self.id.script.is_none() && self.id.region.is_some() && !has_variants {
            Confidence::High
        } else {
            Confidence::Low
        };

        let mut base = self.id.clone();
        base.script = None;
        base.region = None;
        base.clear_variants();

        Some((Self::from_identifier(base), confidence))
    }
}

impl PartialEq for LanguageTag {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for LanguageTag {}

impl Hash for LanguageTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for LanguageTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LanguageTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for LanguageTag {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl Serialize for LanguageTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}

impl<'de> Deserialize<'de> for LanguageTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
