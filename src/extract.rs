//! Static extraction of translation keys from templates.
pub mod scanner;
pub mod skeleton;
mod types;
pub mod workspace;

use std::path::Path;

pub use skeleton::Skeleton;
pub use types::ExtractError;

use crate::config::{
    ConfigManager,
    FileMatcher,
};
use crate::language::LanguageTag;
use crate::store::DictionaryStore;

/// Scans the templates under `base` and merges their keys into the languages file.
///
/// A missing languages file is treated as empty, so a first run starts from scratch.
///
/// # Errors
/// Returns error if the settings are invalid or the languages file cannot be loaded.
pub fn extract(base: &Path, config: &ConfigManager) -> Result<Skeleton, ExtractError> {
    let settings = config.get_settings();
    let fallback = LanguageTag::parse(&settings.fallback_language)?;
    let matcher = FileMatcher::new(base.to_path_buf(), settings)?;

    let languages_path = config.languages_path();
    let mut store = DictionaryStore::new();
    if languages_path.exists() {
        store.load(&languages_path)?;
    } else {
        tracing::info!(path = %languages_path.display(), "Languages file not found, starting empty");
    }

    let keys = workspace::collect_keys(&matcher);
    tracing::info!(
        base = %base.display(),
        keys = keys.len(),
        languages = store.len(),
        "Extracted translation keys"
    );

    Ok(Skeleton::build(&store, &keys, &fallback))
}
