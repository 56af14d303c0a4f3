//! Template discovery and key collection.
use std::collections::BTreeSet;
use std::path::{
    Path,
    PathBuf,
};

use ignore::{
    DirEntry,
    WalkBuilder,
};

use super::scanner::{
    Reference,
    scan,
};
use crate::config::FileMatcher;

/// Template files under the matcher's base directory, in walk order.
///
/// `.gitignore` rules are honoured and `.git` directories are never entered; other hidden
/// files are not skipped.
#[must_use]
pub fn find_template_files(matcher: &FileMatcher) -> Vec<PathBuf> {
    let base = matcher.base();
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(base)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| !is_git_dir(entry))
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(base) else {
            continue;
        };
        if !matcher.is_template_relative(relative_path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files
}

/// A `.git` directory below the walk root.
fn is_git_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_name() == ".git"
        && entry.file_type().is_some_and(|ft| ft.is_dir())
}

/// Literal translation keys referenced by every template under the base directory.
///
/// Unreadable files (including non UTF-8 files) are skipped with a warning.
#[must_use]
pub fn collect_keys(matcher: &FileMatcher) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();

    for path in find_template_files(matcher) {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read file {:?}: {}", path, e);
                continue;
            }
        };

        tracing::debug!(path = %path.display(), "Scanning template");
        collect_from_source(&path, &content, &mut keys);
    }

    keys
}

fn collect_from_source(path: &Path, content: &str, keys: &mut BTreeSet<String>) {
    for reference in scan(content) {
        match reference {
            Reference::Key(key) => {
                keys.insert(key);
            }
            Reference::Dynamic(expression) => {
                tracing::debug!(
                    path = %path.display(),
                    expression = %expression,
                    "Skipping translation with a key computed at render time"
                );
            }
        }
    }
}
