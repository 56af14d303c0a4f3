//! Settings of the extraction tool.
/// Configuration manager
mod manager;
/// Template file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    ExtractSettings,
    SETTINGS_FILE_NAME,
    ValidationError,
};
