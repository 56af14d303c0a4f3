use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::language::LanguageTag;

/// Settings file looked up in the extraction base directory.
pub const SETTINGS_FILE_NAME: &str = ".template-i18n.json";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings of the extraction tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractSettings {
    /// Templates to scan, relative to the base directory.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,

    /// Existing language file whose translations are carried over.
    /// Relative paths are resolved against the base directory.
    pub languages_file: String,

    /// Language every extracted key is guaranteed to appear under.
    pub fallback_language: String,
}

impl ExtractSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Invalid fallback language
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "includePatterns",
                "At least one pattern is required. Example: [\"templates/**/*.html\"]",
            ));
        }

        for (index, pattern) in self.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.languages_file.is_empty() {
            errors.push(ValidationError::new(
                "languagesFile",
                "The path cannot be empty. Example: \"languages.yaml\"",
            ));
        }

        if let Err(e) = LanguageTag::parse(&self.fallback_language) {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                format!("Invalid language '{}': {e}", self.fallback_language),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/*".to_string()],
            exclude_patterns: vec!["**/*.swp".to_string(), "**/*.swo".to_string()],
            languages_file: "languages.yaml".to_string(),
            fallback_language: "en".to_string(),
        }
    }
}
