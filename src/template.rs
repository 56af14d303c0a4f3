//! Call shapes used by template engines.
//!
//! A [`TemplateTranslator`] is created per render and handed to the template engine
//! explicitly; it keeps the language selected with `setlang` for the rest of the render.

use crate::format::{
    FormatArg,
    FormatError,
};
use crate::i18n::Resolver;
use crate::language::LanguageTag;

/// Argument of a block-style translation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockArg<'a> {
    /// `{% trans "nl" %}body{% endtrans %}`: the body is the key, looked up in this language.
    Language(&'a str),
    /// The key is the value of an expression evaluated at render time; the current
    /// language is used.
    Dynamic(&'a str),
}

#[derive(Debug, Clone)]
pub struct TemplateTranslator {
    resolver: Resolver,
    /// Language set by [`TemplateTranslator::setlang`].
    lang: LanguageTag,
}

impl TemplateTranslator {
    /// Starts in the resolver's fallback language.
    #[must_use]
    pub fn new(resolver: Resolver) -> Self {
        let lang = resolver.fallback().clone();
        Self { resolver, lang }
    }

    #[must_use]
    pub const fn lang(&self) -> &LanguageTag {
        &self.lang
    }

    /// Switches the language for subsequent lookups. Unparsable identifiers are ignored.
    pub fn setlang(&mut self, lang: &str) {
        match LanguageTag::parse(lang) {
            Ok(tag) => self.lang = tag,
            Err(error) => tracing::debug!(lang, %error, "Ignoring setlang with invalid language"),
        }
    }

    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        self.resolver.translate_tag(&self.lang, key)
    }

    /// Translation of the `yes` or `no` key.
    #[must_use]
    pub fn yesno(&self, value: bool) -> String {
        self.translate(if value { "yes" } else { "no" })
    }

    /// Filter call shape: `{{ key|trans:lang }}`.
    #[must_use]
    pub fn filter(&self, key: &str, lang: &str) -> String {
        self.resolver.translate(lang, key)
    }

    /// Block call shape.
    #[must_use]
    pub fn block(&self, arg: BlockArg<'_>, body: &str) -> String {
        match arg {
            BlockArg::Language(lang) => self.resolver.translate(lang, body),
            BlockArg::Dynamic(key) => self.translate(key),
        }
    }

    /// # Errors
    /// Returns error when `args` do not fit the resolved template; the template engine
    /// decides whether to render a placeholder or abort.
    pub fn format(&self, key: &str, args: &[FormatArg<'_>]) -> Result<String, FormatError> {
        self.resolver.translation(&self.lang).format(key, args)
    }
}
