use duet_config::clipboard::ClipboardConfig;
use duet_types::{LanguageCode, TranslationMode};

/// Whether a finished translation goes to the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoCopyPolicy {
    pub to_main: bool,
    pub to_secondary: bool,
}

impl AutoCopyPolicy {
    pub fn should_copy(&self, mode: TranslationMode) -> bool {
        match mode {
            TranslationMode::Main => self.to_main,
            TranslationMode::Secondary => self.to_secondary,
        }
    }
}

impl From<&ClipboardConfig> for AutoCopyPolicy {
    fn from(config: &ClipboardConfig) -> Self {
        Self {
            to_main: config.auto_copy_to_primary,
            to_secondary: config.auto_copy_to_secondary,
        }
    }
}

/// Current secondary language: `last_used` if it is still available,
/// otherwise the first available one.
pub fn select_secondary(
    available: &[LanguageCode],
    last_used: Option<LanguageCode>,
) -> Option<LanguageCode> {
    match last_used {
        Some(lang) if available.contains(&lang) => Some(lang),
        _ => available.first().copied(),
    }
}
