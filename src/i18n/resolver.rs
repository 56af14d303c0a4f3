//! Key resolution against one store snapshot.

use std::sync::Arc;

use crate::format::{
    FormatArg,
    FormatError,
};
use crate::language::LanguageTag;
use crate::negotiate::LanguageMatcher;
use crate::store::DictionaryStore;
use crate::translation::{
    NullTranslation,
    Translation,
    TranslationMap,
};

/// Resolves keys against an immutable [`DictionaryStore`] snapshot.
///
/// A resolver never observes a reload: it keeps the snapshot it was created with.
#[derive(Debug, Clone)]
pub struct Resolver {
    store: Arc<DictionaryStore>,
    fallback: LanguageTag,
}

impl Resolver {
    #[must_use]
    pub const fn new(store: Arc<DictionaryStore>, fallback: LanguageTag) -> Self {
        Self { store, fallback }
    }

    #[must_use]
    pub const fn fallback(&self) -> &LanguageTag {
        &self.fallback
    }

    #[must_use]
    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    /// Translation for `tag`, else the fallback language, else [`NullTranslation`].
    #[must_use]
    pub fn translation(&self, tag: &LanguageTag) -> Arc<dyn Translation> {
        if let Some(dictionary) = self.store.dictionary(tag) {
            return Arc::new(TranslationMap::new(dictionary));
        }
        if let Some(dictionary) = self.store.dictionary(&self.fallback) {
            tracing::trace!(requested = %tag, fallback = %self.fallback, "Using fallback language");
            return Arc::new(TranslationMap::new(dictionary));
        }
        tracing::trace!(requested = %tag, "No dictionary available, using null translation");
        Arc::new(NullTranslation)
    }

    /// Translation for a free-form language identifier.
    ///
    /// Unparsable identifiers are treated as the fallback language.
    #[must_use]
    pub fn translation_for(&self, lang: &str) -> Arc<dyn Translation> {
        self.translation(&LanguageTag::parse_or(lang, &self.fallback))
    }

    #[must_use]
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.translation_for(lang).get(key).to_string()
    }

    #[must_use]
    pub fn translate_tag(&self, tag: &LanguageTag, key: &str) -> String {
        self.translation(tag).get(key).to_string()
    }

    /// # Errors
    /// Returns error when `args` do not fit the resolved template.
    pub fn format(&self, lang: &str, key: &str, args: &[FormatArg<'_>]) -> Result<String, FormatError> {
        self.translation_for(lang).format(key, args)
    }

    /// # Errors
    /// Returns error when `args` do not fit the joined template.
    pub fn formats(
        &self,
        lang: &str,
        keys: &[&str],
        args: &[FormatArg<'_>],
    ) -> Result<String, FormatError> {
        self.translation_for(lang).formats(keys, args)
    }

    /// Matcher over the languages of this snapshot.
    #[must_use]
    pub fn matcher(&self) -> LanguageMatcher {
        LanguageMatcher::new(self.store.supported(), self.fallback.clone())
    }

    /// Negotiates `header` and returns the translation of the best candidate.
    #[must_use]
    pub fn accept(&self, header: &str) -> Arc<dyn Translation> {
        let tag = self.matcher().best_or_fallback(header);
        tracing::debug!(header, language = %tag, "Negotiated language");
        self.translation(&tag)
    }
}
