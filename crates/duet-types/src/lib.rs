mod credential;
mod language;
mod types;

pub use credential::{Credential, wipe_string};
pub use language::{LanguageCode, UnknownLanguage};
pub use types::{ResolvedTranslation, TranslationMode};
