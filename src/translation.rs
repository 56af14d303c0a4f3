//! The translation capability and its two implementations.

use std::fmt::{
    self,
    Write,
};
use std::sync::Arc;

use crate::format::{
    FormatArg,
    FormatError,
    sprintf,
};
use crate::language::LanguageTag;
use crate::store::Dictionary;

/// A language-bound view that resolves keys to text.
///
/// Lookups never fail: a key without a usable translation resolves to itself, so
/// missing translations show up verbatim in rendered output.
pub trait Translation: fmt::Debug + Send + Sync {
    /// Translation of `key`, or `key` itself when there is none.
    fn get<'a>(&'a self, key: &'a str) -> &'a str;

    /// Whether `key` has a non-empty translation.
    fn has(&self, key: &str) -> bool;

    /// Number of keys known to this translation.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn tag(&self) -> &LanguageTag;

    /// Whether this is the [`NullTranslation`].
    fn is_null(&self) -> bool {
        false
    }

    /// Resolves `key` and uses the result as a format template.
    ///
    /// # Errors
    /// Returns error when `args` do not fit the resolved template.
    fn format(&self, key: &str, args: &[FormatArg<'_>]) -> Result<String, FormatError> {
        sprintf(self.get(key), args)
    }

    /// Resolves each key, joins the results with a space and formats the joined text.
    ///
    /// An empty key list yields an empty string without formatting.
    ///
    /// # Errors
    /// Returns error when `args` do not fit the joined template.
    fn formats(&self, keys: &[&str], args: &[FormatArg<'_>]) -> Result<String, FormatError> {
        if keys.is_empty() {
            return Ok(String::new());
        }
        let joined = keys.iter().map(|key| self.get(key)).collect::<Vec<_>>().join(" ");
        sprintf(&joined, args)
    }
}

/// Dictionary-backed translation.
#[derive(Debug, Clone)]
pub struct TranslationMap {
    dictionary: Arc<Dictionary>,
}

impl TranslationMap {
    #[must_use]
    pub const fn new(dictionary: Arc<Dictionary>) -> Self {
        Self { dictionary }
    }

    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Translates every string argument and concatenates the results.
    ///
    /// A space separates two adjacent operands when neither of them is a string.
    #[must_use]
    pub fn translate_all(&self, args: &[FormatArg<'_>]) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_all(&mut out, args);
        out
    }

    /// Like [`TranslationMap::translate_all`], but every operand is separated by a space
    /// and a newline is appended.
    #[must_use]
    pub fn translate_line(&self, args: &[FormatArg<'_>]) -> String {
        let mut out = String::new();
        let _ = self.write_line(&mut out, args);
        out
    }

    /// Writes what [`TranslationMap::translate_all`] returns to `out`.
    ///
    /// # Errors
    /// Returns error when `out` fails.
    pub fn write_all<W: Write>(&self, out: &mut W, args: &[FormatArg<'_>]) -> fmt::Result {
        let mut previous_was_text = true;
        for (index, arg) in args.iter().enumerate() {
            let is_text = matches!(arg, FormatArg::Str(_));
            if index > 0 && !is_text && !previous_was_text {
                out.write_char(' ')?;
            }
            self.write_operand(out, *arg)?;
            previous_was_text = is_text;
        }
        Ok(())
    }

    /// Writes what [`TranslationMap::translate_line`] returns to `out`.
    ///
    /// # Errors
    /// Returns error when `out` fails.
    pub fn write_line<W: Write>(&self, out: &mut W, args: &[FormatArg<'_>]) -> fmt::Result {
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                out.write_char(' ')?;
            }
            self.write_operand(out, *arg)?;
        }
        out.write_char('\n')
    }

    /// Strings are keys and get translated; other operands are written as is.
    fn write_operand<W: Write>(&self, out: &mut W, arg: FormatArg<'_>) -> fmt::Result {
        match arg {
            FormatArg::Str(key) => out.write_str(self.get(key)),
            other => write!(out, "{other}"),
        }
    }
}

impl Translation for TranslationMap {
    fn get<'a>(&'a self, key: &'a str) -> &'a str {
        // Empty values are untranslated placeholders (as written by the extractor).
        self.dictionary.get(key).filter(|value| !value.is_empty()).unwrap_or(key)
    }

    fn has(&self, key: &str) -> bool {
        self.dictionary.get(key).is_some_and(|value| !value.is_empty())
    }

    fn len(&self) -> usize {
        self.dictionary.len()
    }

    fn tag(&self) -> &LanguageTag {
        self.dictionary.tag()
    }
}

/// Translation used when no dictionary is available: every key is its own text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullTranslation;

impl Translation for NullTranslation {
    fn get<'a>(&'a self, key: &'a str) -> &'a str {
        key
    }

    fn has(&self, _key: &str) -> bool {
        false
    }

    fn len(&self) -> usize {
        0
    }

    fn tag(&self) -> &LanguageTag {
        LanguageTag::undefined_ref()
    }

    fn is_null(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn dutch() -> TranslationMap {
        let entries = HashMap::from([
            ("hello world".to_string(), "hallo wereld".to_string()),
            ("greeting".to_string(), "Hallo %s".to_string()),
            ("unread".to_string(), "%d ongelezen".to_string()),
            ("todo".to_string(), String::new()),
        ]);
        TranslationMap::new(Arc::new(Dictionary::new(LanguageTag::parse("nl").unwrap(), entries)))
    }

    #[googletest::test]
    fn map_resolves_known_keys() {
        let nl = dutch();

        expect_that!(nl.get("hello world"), eq("hallo wereld"));
        expect_that!(nl.has("hello world"), eq(true));
        expect_that!(nl.len(), eq(4));
        expect_that!(nl.tag().as_str(), eq("nl"));
        expect_that!(nl.is_null(), eq(false));
    }

    #[rstest]
    #[case("missing.key")]
    #[case("todo")]
    fn map_returns_key_when_untranslated(#[case] key: &str) {
        let nl = dutch();

        assert_that!(nl.get(key), eq(key));
        assert_that!(nl.has(key), eq(false));
    }

    #[googletest::test]
    fn map_formats_resolved_template() {
        let nl = dutch();

        expect_that!(nl.format("greeting", &["Ann".into()]), ok(eq("Hallo Ann")));
        expect_that!(
            nl.formats(&["greeting", "unread"], &["Ann".into(), 2.into()]),
            ok(eq("Hallo Ann 2 ongelezen"))
        );
        expect_that!(nl.formats(&[], &["ignored".into()]), ok(eq("")));
        expect_that!(nl.format("greeting", &[]), err(anything()));
    }

    #[googletest::test]
    fn map_translate_all_spaces_non_text_operands() {
        let nl = dutch();

        expect_that!(
            nl.translate_all(&["hello world".into(), 1.into(), 2.into(), "!".into()]),
            eq("hallo wereld1 2!")
        );
    }

    #[googletest::test]
    fn map_translate_line_spaces_every_operand() {
        let nl = dutch();

        expect_that!(
            nl.translate_line(&["hello world".into(), 1.into(), "!".into()]),
            eq("hallo wereld 1 !\n")
        );
        expect_that!(nl.translate_line(&[]), eq("\n"));
    }

    #[googletest::test]
    fn map_writes_into_any_fmt_writer() {
        let nl = dutch();
        let mut out = String::from("> ");

        nl.write_all(&mut out, &["hello world".into(), 3.into()]).unwrap();
        nl.write_line(&mut out, &[true.into(), "missing".into()]).unwrap();

        expect_that!(out, eq("> hallo wereld3true missing\n"));
    }

    #[rstest]
    #[case("anything")]
    #[case("")]
    #[case("with %s directive")]
    fn null_translation_is_identity(#[case] key: &str) {
        let null = NullTranslation;

        assert_that!(null.get(key), eq(key));
        assert_that!(null.has(key), eq(false));
        assert_that!(null.len(), eq(0));
        assert_that!(null.is_empty(), eq(true));
        assert_that!(null.tag().is_undefined(), eq(true));
        assert_that!(null.is_null(), eq(true));
    }

    #[googletest::test]
    fn null_translation_formats_raw_keys() {
        let null = NullTranslation;

        expect_that!(null.format("%s items", &[3.into()]), ok(eq("3 items")));
        expect_that!(null.formats(&["a", "%d"], &[1.into()]), ok(eq("a 1")));
        expect_that!(null.formats(&[], &[]), ok(eq("")));
    }

    #[googletest::test]
    fn usable_as_trait_object() {
        let translations: Vec<Arc<dyn Translation>> = vec![Arc::new(dutch()), Arc::new(NullTranslation)];

        let resolved: Vec<&str> = translations.iter().map(|t| t.get("hello world")).collect();
        expect_that!(resolved, elements_are![eq(&"hallo wereld"), eq(&"hello world")]);
    }
}
