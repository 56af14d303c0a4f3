//! Translation file inputs: parsed documents, flattening and file parsing.

pub mod document;
pub mod flatten;
pub mod translation_file;
