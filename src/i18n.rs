//! The `I18n` facade: a reloadable dictionary store plus the resolution entry points.
mod resolver;

use std::collections::BTreeSet;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

pub use resolver::Resolver;

use crate::format::{
    FormatArg,
    FormatError,
};
use crate::language::LanguageTag;
use crate::store::{
    Dictionary,
    DictionaryStore,
    LoadError,
};
use crate::template::TemplateTranslator;
use crate::translation::Translation;

/// Loaded translations and the fallback language.
///
/// Readers work on a shared snapshot of the store; [`I18n::reload`] replaces the
/// snapshot as a whole, so in-flight readers keep seeing the store they started with.
#[derive(Debug)]
pub struct I18n {
    /// Current snapshot.
    store: RwLock<Arc<DictionaryStore>>,
    fallback: LanguageTag,
    /// Root file for [`I18n::reload`].
    root: Option<PathBuf>,
}

impl I18n {
    /// Creates an instance without any dictionaries.
    #[must_use]
    pub fn new(fallback: LanguageTag) -> Self {
        Self { store: RwLock::new(Arc::new(DictionaryStore::new())), fallback, root: None }
    }

    /// Loads `root` and everything it includes.
    ///
    /// # Errors
    /// Returns error if any file of the include graph fails to load.
    pub fn from_file(root: impl AsRef<Path>, fallback: LanguageTag) -> Result<Self, LoadError> {
        let root = root.as_ref().to_path_buf();
        let store = load_store(&root)?;
        tracing::info!(
            root = %root.display(),
            languages = store.len(),
            fallback = %fallback,
            "Translations loaded"
        );

        Ok(Self { store: RwLock::new(Arc::new(store)), fallback, root: Some(root) })
    }

    /// Registers a dictionary, replacing any previous one for the same language.
    pub fn add(&mut self, dictionary: Dictionary) {
        let store = self.store.get_mut().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(store).insert(dictionary);
    }

    /// Re-reads the root file and swaps in the new store.
    ///
    /// Dictionaries registered through [`I18n::add`] are not kept. Without a root file
    /// this is a no-op.
    ///
    /// # Errors
    /// Returns error if loading fails; the current store then stays in place.
    pub fn reload(&self) -> Result<(), LoadError> {
        let Some(root) = &self.root else {
            tracing::debug!("No translation root file, nothing to reload");
            return Ok(());
        };

        let store = Arc::new(load_store(root)?);
        let languages = store.len();
        *self.store.write().unwrap_or_else(PoisonError::into_inner) = store;
        tracing::info!(root = %root.display(), languages, "Translations reloaded");

        Ok(())
    }

    /// Current store snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<DictionaryStore> {
        Arc::clone(&self.store.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Resolver bound to the current snapshot.
    #[must_use]
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.snapshot(), self.fallback.clone())
    }

    /// Per-render template helper starting in the fallback language.
    #[must_use]
    pub fn template(&self) -> TemplateTranslator {
        TemplateTranslator::new(self.resolver())
    }

    #[must_use]
    pub const fn fallback(&self) -> &LanguageTag {
        &self.fallback
    }

    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    #[must_use]
    pub fn supported(&self) -> BTreeSet<LanguageTag> {
        self.snapshot().supported()
    }

    /// Native names of the supported languages, in the order of [`I18n::supported`].
    #[must_use]
    pub fn languages(&self) -> Vec<String> {
        self.supported().iter().map(LanguageTag::native_name).collect()
    }

    /// Dictionary for exactly `tag`.
    #[must_use]
    pub fn keys(&self, tag: &LanguageTag) -> Option<Arc<Dictionary>> {
        self.snapshot().dictionary(tag)
    }

    #[must_use]
    pub fn accept(&self, header: &str) -> Arc<dyn Translation> {
        self.resolver().accept(header)
    }

    /// Supported languages acceptable for `header`, best first.
    #[must_use]
    pub fn accept_language(&self, header: &str) -> Vec<LanguageTag> {
        self.resolver().matcher().accept_language(header)
    }

    #[must_use]
    pub fn translation(&self, tag: &LanguageTag) -> Arc<dyn Translation> {
        self.resolver().translation(tag)
    }

    #[must_use]
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.resolver().translate(lang, key)
    }

    #[must_use]
    pub fn translate_tag(&self, tag: &LanguageTag, key: &str) -> String {
        self.resolver().translate_tag(tag, key)
    }

    /// # Errors
    /// Returns error when `args` do not fit the resolved template.
    pub fn format(&self, lang: &str, key: &str, args: &[FormatArg<'_>]) -> Result<String, FormatError> {
        self.resolver().format(lang, key, args)
    }

    /// # Errors
    /// Returns error when `args` do not fit the joined template.
    pub fn formats(
        &self,
        lang: &str,
        keys: &[&str],
        args: &[FormatArg<'_>],
    ) -> Result<String, FormatError> {
        self.resolver().formats(lang, keys, args)
    }
}

fn load_store(root: &Path) -> Result<DictionaryStore, LoadError> {
    let mut store = DictionaryStore::new();
    store.load(root)?;
    Ok(store)
}
