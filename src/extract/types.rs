//! Extraction error types.

use thiserror::Error;

use crate::config::{
    ConfigError,
    MatcherError,
};
use crate::language::LanguageError;
use crate::store::LoadError;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// Error when the existing languages file cannot be loaded
    #[error("Failed to load languages file: {0}")]
    Load(#[from] LoadError),

    #[error("Invalid fallback language: {0}")]
    Fallback(#[from] LanguageError),

    #[error("Failed to serialize language file: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
