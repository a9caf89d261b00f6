use serde::{Deserialize, Serialize};

use super::modules::{MenuConfig, WindowsConfig};

/// Bar screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarPosition {
    /// Left edge of the screen.
    Left,
    /// Right edge of the screen.
    Right,
    /// Top edge of the screen.
    Top,
    /// Bottom edge of the screen.
    #[default]
    Bottom,
}

impl BarPosition {
    #[inline(always)]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Panel bar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Main axis thickness in px (height for horizontal, width for vertical).
    pub size: f32,
    /// Screen edge where the bar is placed.
    pub position: BarPosition,
    /// Start section items (left for horizontal, top for vertical).
    pub start: Vec<String>,
    /// Center section items.
    pub center: Vec<String>,
    /// End section items (right for horizontal, bottom for vertical).
    pub end: Vec<String>,
    pub modules: ModulesConfig,
}

/// Per-item configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    pub menu: MenuConfig,
    pub windows: WindowsConfig,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            size: 36.0,
            position: BarPosition::Bottom,
            start: vec!["Menu".into()],
            center: vec!["Windows".into()],
            end: Vec::new(),
            modules: ModulesConfig::default(),
        }
    }
}

impl BarConfig {
    #[inline(always)]
    pub fn is_vertical(&self) -> bool {
        self.position.is_vertical()
    }
}
