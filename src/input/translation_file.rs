//! Translation file input definitions

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::document::Document;
use super::flatten::{
    UnsupportedValueType,
    flatten,
};
use crate::language::{
    LanguageError,
    LanguageTag,
};
use crate::store::Dictionary;

/// Serialization format of a translation file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    Yaml,
}

impl FileFormat {
    /// Detects the format from the (case-insensitive) file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_string_lossy().to_lowercase();
        match extension.as_str() {
            "js" | "json" => Some(Self::Json),
            "tml" | "toml" | "conf" => Some(Self::Toml),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid language '{language}': {source}")]
    InvalidLanguage {
        language: String,
        #[source]
        source: LanguageError,
    },

    #[error("'{section}' must be a mapping, found {kind}")]
    NotAMapping { section: String, kind: &'static str },

    #[error(transparent)]
    UnsupportedValueType(#[from] UnsupportedValueType),
}

/// A parsed translation file: declared languages plus further files to include.
#[derive(Debug, Clone, Default)]
pub struct TranslationFile {
    pub languages: Vec<Dictionary>,
    pub include: Vec<PathBuf>,
}

impl TranslationFile {
    /// Parses file contents in the given format.
    ///
    /// # Errors
    /// Returns error if the document cannot be parsed, declares an invalid language,
    /// or contains values that cannot be flattened.
    pub fn parse(format: FileFormat, text: &str) -> Result<Self, ParseError> {
        let document: Document = match format {
            FileFormat::Json => serde_json::from_str(text)?,
            FileFormat::Toml => toml::from_str(text)?,
            FileFormat::Yaml => serde_yaml::from_str(text)?,
        };
        Self::from_document(&document)
    }

    /// Whether the file declares neither languages nor includes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty() && self.include.is_empty()
    }

    fn from_document(document: &Document) -> Result<Self, ParseError> {
        let mut file = Self::default();

        for (language, value) in languages_section(document)? {
            let tag = LanguageTag::parse(language).map_err(|source| ParseError::InvalidLanguage {
                language: language.clone(),
                source,
            })?;
            let Document::Map(entries) = value else {
                return Err(ParseError::NotAMapping {
                    section: language.clone(),
                    kind: value.kind(),
                });
            };
            file.languages.push(Dictionary::new(tag, flatten(entries)?));
        }

        if let Some(include) = lookup(document, "include") {
            file.include = include_paths(include)?;
        }

        Ok(file)
    }
}

/// Entries of the `lang` mapping, or nothing when the section is absent.
fn languages_section(document: &Document) -> Result<&[(String, Document)], ParseError> {
    match lookup(document, "lang") {
        None => Ok(&[]),
        Some(Document::Map(entries)) => Ok(entries),
        Some(other) => {
            Err(ParseError::NotAMapping { section: "lang".to_string(), kind: other.kind() })
        }
    }
}

/// Top-level lookup honouring the capitalised alias emitted by the extractor.
fn lookup<'a>(document: &'a Document, name: &str) -> Option<&'a Document> {
    document.get(name).or_else(|| {
        let mut chars = name.chars();
        let capitalised: String =
            chars.next().map(|c| c.to_ascii_uppercase()).into_iter().chain(chars).collect();
        document.get(&capitalised)
    })
}

/// `include` accepts a list of paths or a single path.
fn include_paths(document: &Document) -> Result<Vec<PathBuf>, ParseError> {
    match document {
        Document::String(path) => Ok(vec![PathBuf::from(path)]),
        Document::List(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Document::String(path) => Ok(PathBuf::from(path)),
                other => Err(UnsupportedValueType {
                    key: format!("include.{index}"),
                    kind: other.kind(),
                }
                .into()),
            })
            .collect(),
        other => Err(UnsupportedValueType { key: "include".to_string(), kind: other.kind() }.into()),
    }
}
