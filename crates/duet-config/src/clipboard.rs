use serde::{Deserialize, Serialize};

fn default_auto_copy() -> bool {
    true
}

fn default_hold_seconds() -> u64 {
    2
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Copy results translated into the main language (reading mode)
    #[serde(default = "default_auto_copy")]
    pub auto_copy_to_primary: bool,
    /// Copy results translated into a secondary language (writing mode)
    #[serde(default = "default_auto_copy")]
    pub auto_copy_to_secondary: bool,
    /// How long `duet` stays alive after copying so a clipboard manager or
    /// paste target can take the text over (X11 and XWayland)
    #[serde(default = "default_hold_seconds")]
    pub hold_seconds: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            auto_copy_to_primary: default_auto_copy(),
            auto_copy_to_secondary: default_auto_copy(),
            hold_seconds: default_hold_seconds(),
        }
    }
}
