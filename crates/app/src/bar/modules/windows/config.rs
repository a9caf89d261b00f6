//! Window list configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowsConfig {
    /// Maximum title length in characters, `0` for no limit.
    pub max_title_length: usize,
    /// Maximum width of a single row in px.
    pub max_item_width: f32,
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self {
            max_title_length: 40,
            max_item_width: 240.0,
        }
    }
}
