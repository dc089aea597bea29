//! Submission flow configuration.

use serde::{Deserialize, Serialize};

const fn default_photo_step() -> bool {
    true
}

fn default_skip_words() -> Vec<String> {
    ["skip", "no", "-", "geç", "atla"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_max_text_len() -> usize {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntakeConfig {
    /// Whether the flow asks for a photo after the schedule.
    #[serde(default = "default_photo_step")]
    pub photo_step: bool,

    /// Text replies that skip the photo step (trimmed, case-insensitive).
    #[serde(default = "default_skip_words")]
    pub skip_words: Vec<String>,

    /// Maximum length in characters of the description and schedule texts.
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            photo_step: default_photo_step(),
            skip_words: default_skip_words(),
            max_text_len: default_max_text_len(),
        }
    }
}
