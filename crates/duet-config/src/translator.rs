use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Whole-request timeout for the HTTP client
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl TranslatorConfig {
    /// Apply `DUET_API_URL` / `DUET_TIMEOUT_SECONDS` on top of the stored values
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("DUET_API_URL")
            && !url.trim().is_empty()
        {
            self.api_url = url;
        }

        if let Some(timeout) = env::var("DUET_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_seconds = timeout;
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
