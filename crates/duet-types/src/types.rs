use serde::{Deserialize, Serialize};

use crate::LanguageCode;

/// Which side of the main/secondary pair a result landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationMode {
    /// Foreign text translated into the main language (reading mode)
    Main,
    /// Main-language text translated into a secondary language (writing mode)
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTranslation {
    pub text: String,
    pub mode: TranslationMode,
    pub target: LanguageCode,
    pub detected_source_lang: Option<String>,
}
