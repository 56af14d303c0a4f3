//! template-i18n
//!
//! Translation dictionaries, Accept-Language negotiation and lookup helpers for
//! server-side template rendering.

pub mod config;
pub mod extract;
pub mod format;
pub mod i18n;
pub mod input;
pub mod language;
pub mod negotiate;
pub mod store;
pub mod template;
pub mod translation;

pub use format::{
    FormatArg,
    FormatError,
};
pub use i18n::{
    I18n,
    Resolver,
};
pub use language::{
    Confidence,
    LanguageTag,
};
pub use negotiate::{
    AcceptCandidate,
    LanguageMatcher,
};
pub use store::{
    Dictionary,
    DictionaryStore,
    LoadError,
};
pub use template::{
    BlockArg,
    TemplateTranslator,
};
pub use translation::{
    NullTranslation,
    Translation,
    TranslationMap,
};
