//! Dictionary store: every loaded language and its flattened translations.

use std::collections::{
    BTreeSet,
    HashMap,
    VecDeque,
};
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use thiserror::Error;

use crate::input::translation_file::{
    FileFormat,
    ParseError,
    TranslationFile,
};
use crate::language::LanguageTag;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read translation file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown translation file format: '{}'", path.display())]
    UnknownFileFormat { path: PathBuf },

    #[error("Translation file '{}' declares no languages and no includes", path.display())]
    EmptyDeclaration { path: PathBuf },

    #[error("Failed to parse translation file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Translation file '{}' includes itself", path.display())]
    IncludeCycle { path: PathBuf },
}

/// Flattened translations of a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    tag: LanguageTag,
    entries: HashMap<String, String>,
}

impl Dictionary {
    #[must_use]
    pub const fn new(tag: LanguageTag, entries: HashMap<String, String>) -> Self {
        Self { tag, entries }
    }

    #[must_use]
    pub const fn tag(&self) -> &LanguageTag {
        &self.tag
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A file waiting in the include worklist, with the chain of files that led to it.
#[derive(Debug)]
struct PendingFile {
    /// File to parse.
    path: PathBuf,
    /// Including files, outermost first; `path` appearing here is a cycle.
    chain: Vec<PathBuf>,
}

/// Every loaded [`Dictionary`], keyed by exact language tag.
///
/// Populated during the load phase and treated as an immutable snapshot afterwards;
/// readers share it through an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    dictionaries: HashMap<LanguageTag, Arc<Dictionary>>,
}

impl DictionaryStore {
    #[must_use]
    pub fn new() -> Self {
        Self { dictionaries: HashMap::new() }
    }

    /// Loads `root` and, breadth-first, every file it includes.
    ///
    /// Relative include paths are resolved against the directory of the including
    /// file. A language declared again by a later file replaces the earlier dictionary
    /// as a whole.
    ///
    /// # Errors
    /// Returns error on unreadable or unparsable files, unknown extensions, files that
    /// declare nothing, and include cycles. The store may be partially populated
    /// when an error is returned and must not be used.
    pub fn load(&mut self, root: &Path) -> Result<(), LoadError> {
        let mut worklist = VecDeque::from([PendingFile { path: root.to_path_buf(), chain: Vec::new() }]);

        while let Some(PendingFile { path, chain }) = worklist.pop_front() {
            let identity = file_identity(&path);
            if chain.contains(&identity) {
                return Err(LoadError::IncludeCycle { path });
            }

            tracing::debug!(path = %path.display(), depth = chain.len(), "Loading translation file");
            let file = read_translation_file(&path)?;
            if file.is_empty() {
                return Err(LoadError::EmptyDeclaration { path });
            }

            for dictionary in file.languages {
                tracing::debug!(
                    language = %dictionary.tag(),
                    keys = dictionary.len(),
                    "Loaded translations"
                );
                self.insert(dictionary);
            }

            let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            let mut child_chain = chain;
            child_chain.push(identity);
            for include in file.include {
                let include_path =
                    if include.is_absolute() { include } else { base_dir.join(include) };
                worklist.push_back(PendingFile { path: include_path, chain: child_chain.clone() });
            }
        }

        Ok(())
    }

    /// Adds a dictionary, replacing any previous one for the same tag.
    pub fn insert(&mut self, dictionary: Dictionary) {
        self.dictionaries.insert(dictionary.tag().clone(), Arc::new(dictionary));
    }

    /// Dictionary for exactly `tag`; no fallback happens at this layer.
    #[must_use]
    pub fn keys(&self, tag: &LanguageTag) -> Option<&Dictionary> {
        self.dictionaries.get(tag).map(AsRef::as_ref)
    }

    /// Shared handle to the dictionary for exactly `tag`.
    #[must_use]
    pub fn dictionary(&self, tag: &LanguageTag) -> Option<Arc<Dictionary>> {
        self.dictionaries.get(tag).cloned()
    }

    #[must_use]
    pub fn contains(&self, tag: &LanguageTag) -> bool {
        self.dictionaries.contains_key(tag)
    }

    /// Snapshot of the loaded language tags.
    #[must_use]
    pub fn supported(&self) -> BTreeSet<LanguageTag> {
        self.dictionaries.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }
}

/// Path used to recognise the same file reached through different spellings.
fn file_identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Reads and parses a single translation file.
fn read_translation_file(path: &Path) -> Result<TranslationFile, LoadError> {
    let format = FileFormat::from_path(path)
        .ok_or_else(|| LoadError::UnknownFileFormat { path: path.to_path_buf() })?;
    let content = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;

    TranslationFile::parse(format, &content)
        .map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })
}
