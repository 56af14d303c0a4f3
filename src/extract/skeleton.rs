//! The language file written by the extraction tool.

use std::collections::{
    BTreeMap,
    BTreeSet,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::language::LanguageTag;
use crate::store::DictionaryStore;

/// `Lang: { <language>: { <key>: <translation> } }`, sorted at both levels.
///
/// The document loads back as a translation file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skeleton {
    #[serde(rename = "Lang")]
    pub lang: BTreeMap<String, BTreeMap<String, String>>,
}

impl Skeleton {
    /// Existing translations of every loaded language plus an empty entry for each
    /// referenced key they lack. `fallback` is always present.
    #[must_use]
    pub fn build(store: &DictionaryStore, keys: &BTreeSet<String>, fallback: &LanguageTag) -> Self {
        let mut lang: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

        for tag in store.supported() {
            let existing = store
                .keys(&tag)
                .map(|dictionary| {
                    dictionary.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
                })
                .unwrap_or_default();
            lang.insert(tag.to_string(), existing);
        }
        lang.entry(fallback.to_string()).or_default();

        for translations in lang.values_mut() {
            for key in keys {
                translations.entry(key.clone()).or_default();
            }
        }

        Self { lang }
    }

    /// Keys without a translation, per language.
    #[must_use]
    pub fn untranslated(&self) -> BTreeMap<&str, usize> {
        self.lang
            .iter()
            .map(|(language, entries)| {
                (language.as_str(), entries.values().filter(|value| value.is_empty()).count())
            })
            .collect()
    }

    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashMap;

    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::input::translation_file::{
        FileFormat,
        TranslationFile,
    };
    use crate::store::Dictionary;

    fn tag(raw: &str) -> LanguageTag {
        LanguageTag::parse(raw).unwrap()
    }

    fn keys(raw: &[&str]) -> BTreeSet<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    fn store() -> DictionaryStore {
        let mut store = DictionaryStore::new();
        store.insert(Dictionary::new(
            tag("nl"),
            HashMap::from([
                ("Save".to_string(), "Opslaan".to_string()),
                ("Obsolete".to_string(), "Verouderd".to_string()),
            ]),
        ));
        store
    }

    #[rstest]
    fn build_adds_every_key_to_every_language() {
        let skeleton = Skeleton::build(&store(), &keys(&["Save", "Cancel"]), &tag("en"));

        let languages: Vec<String> = skeleton.lang.keys().cloned().collect();
        assert_that!(languages, elements_are![eq("en"), eq("nl")]);
        assert_that!(skeleton.lang["nl"]["Save"], eq("Opslaan"));
        assert_that!(skeleton.lang["nl"]["Cancel"], eq(""));
        assert_that!(skeleton.lang["nl"]["Obsolete"], eq("Verouderd"));
        assert_that!(skeleton.lang["en"].len(), eq(2));
    }

    #[rstest]
    fn to_yaml_is_sorted() {
        let skeleton = Skeleton::build(&store(), &keys(&["b", "a"]), &tag("nl"));

        let yaml = skeleton.to_yaml().unwrap();

        assert_eq!(
            yaml,
            "Lang:\n  nl:\n    Obsolete: Verouderd\n    Save: Opslaan\n    a: ''\n    b: ''\n"
        );
    }

    #[rstest]
    fn output_loads_back_as_translation_file() {
        let skeleton = Skeleton::build(&store(), &keys(&["Cancel"]), &tag("en"));

        let file = TranslationFile::parse(FileFormat::Yaml, &skeleton.to_yaml().unwrap()).unwrap();

        assert_that!(file.languages.len(), eq(2));
        assert_that!(file.languages[1].get("Save"), some(eq("Opslaan")));
    }

    #[rstest]
    fn untranslated_counts_empty_entries() {
        let skeleton = Skeleton::build(&store(), &keys(&["Save", "Cancel"]), &tag("en"));

        let counts = skeleton.untranslated();

        assert_that!(counts.get("en"), some(eq(&2)));
        assert_that!(counts.get("nl"), some(eq(&1)));
    }
}
