use serde::{Deserialize, Serialize};

use duet_types::LanguageCode;

use crate::ConfigError;

/// Upper bound on secondary language slots
pub const MAX_SECONDARY_LANGUAGES: usize = 3;

fn default_main_language() -> String {
    "EN".to_string()
}

fn default_available_languages() -> Vec<String> {
    vec!["ES".to_string()]
}

fn default_last_used_language() -> String {
    "ES".to_string()
}

/// Language settings as stored. Codes stay plain strings here so a bad value
/// in the profile surfaces as a `ConfigError` instead of failing the whole load.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LanguageConfig {
    #[serde(default = "default_main_language")]
    pub main_language: String,
    #[serde(default = "default_available_languages")]
    pub available_languages: Vec<String>,
    #[serde(default = "default_last_used_language")]
    pub last_used_language: String,
}

/// Validated view of `LanguageConfig`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Languages {
    pub main: LanguageCode,
    pub available: Vec<LanguageCode>,
    pub last_used: Option<LanguageCode>,
}

impl LanguageConfig {
    pub fn validate(&self) -> Result<Languages, ConfigError> {
        let main = parse_code("main_language", &self.main_language)?;

        if self.available_languages.is_empty() {
            return Err(ConfigError::NoSecondaryLanguages);
        }
        if self.available_languages.len() > MAX_SECONDARY_LANGUAGES {
            return Err(ConfigError::TooManySecondaryLanguages {
                count: self.available_languages.len(),
                max: MAX_SECONDARY_LANGUAGES,
            });
        }

        let mut available = Vec::with_capacity(self.available_languages.len());
        for code in &self.available_languages {
            let lang = parse_code("available_languages", code)?;
            if available.contains(&lang) {
                return Err(ConfigError::DuplicateLanguage(lang.to_string()));
            }
            if lang == main {
                return Err(ConfigError::MainLanguageInSecondary(lang.to_string()));
            }
            available.push(lang);
        }

        let last_used = if self.last_used_language.trim().is_empty() {
            None
        } else {
            Some(parse_code("last_used_language", &self.last_used_language)?)
        };

        Ok(Languages {
            main,
            available,
            last_used,
        })
    }
}

fn parse_code(field: &'static str, code: &str) -> Result<LanguageCode, ConfigError> {
    code.trim()
        .parse()
        .map_err(|_| ConfigError::UnknownLanguage {
            field,
            code: code.to_string(),
        })
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            main_language: default_main_language(),
            available_languages: default_available_languages(),
            last_used_language: default_last_used_language(),
        }
    }
}
