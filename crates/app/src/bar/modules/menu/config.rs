//! Application menu button configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Nerd-font glyph shown on the button.
    pub icon: String,
    /// Show the translated "Menu" label next to the icon (horizontal bars only).
    pub show_label: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            icon: "󰀻".into(),
            show_label: true,
        }
    }
}
