use serde::{Deserialize, Serialize};

use self::clipboard::ClipboardConfig;
use self::languages::{LanguageConfig, Languages};
use self::translator::TranslatorConfig;

pub mod clipboard;
pub mod languages;
pub mod translator;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported language code {code:?} in {field}")]
    UnknownLanguage { field: &'static str, code: String },

    #[error("No secondary languages configured")]
    NoSecondaryLanguages,

    #[error("Too many secondary languages: {count} (max {max})")]
    TooManySecondaryLanguages { count: usize, max: usize },

    #[error("Language {0} is listed more than once")]
    DuplicateLanguage(String),

    #[error("Main language {0} cannot also be a secondary language")]
    MainLanguageInSecondary(String),
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub languages: LanguageConfig,
    pub clipboard: ClipboardConfig,

    /// Plaintext key from older profiles. Only read by the keyring migration,
    /// which blanks it afterwards.
    pub api_key: String,
}

impl Config {
    pub fn validate(&self) -> Result<Languages, ConfigError> {
        self.languages.validate()
    }
}
