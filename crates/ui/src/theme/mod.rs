//! Theme module providing consistent styling for the panel and its popups.
//!
//! Access colors through the `ActiveTheme` trait:
//!
//! ```ignore
//! use ui::ActiveTheme;
//!
//! fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
//!     let theme = cx.theme();
//!     div().bg(theme.bg.primary).text_color(theme.text.primary)
//! }
//! ```

use gpui::{App, Global, Hsla, rgba};

/// The global theme, stored as a GPUI global.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub bg: BgColors,
    pub text: TextColors,
    pub border: BorderColors,
    pub accent: AccentColors,
    pub interactive: InteractiveColors,
}

impl Global for Theme {}

impl Theme {
    /// Install the default theme. Call once at startup.
    pub fn init(cx: &mut App) {
        cx.set_global(Theme::default());
    }

    #[inline(always)]
    pub fn global(cx: &App) -> &Theme {
        cx.global::<Theme>()
    }
}

/// Trait for accessing the active theme.
pub trait ActiveTheme {
    fn theme(&self) -> &Theme;
}

impl ActiveTheme for App {
    #[inline(always)]
    fn theme(&self) -> &Theme {
        Theme::global(self)
    }
}

/// Background colors.
#[derive(Debug, Clone, Copy)]
pub struct BgColors {
    /// Bar background.
    pub primary: Hsla,
    /// Popup menu background.
    pub elevated: Hsla,
}

impl Default for BgColors {
    fn default() -> Self {
        Self {
            primary: rgba(0x1e1e1eff).into(),
            elevated: rgba(0x2a2a2cf2).into(),
        }
    }
}

/// Text colors.
#[derive(Debug, Clone, Copy)]
pub struct TextColors {
    pub primary: Hsla,
    pub secondary: Hsla,
    /// Placeholder rows (pending launches).
    pub muted: Hsla,
}

impl Default for TextColors {
    fn default() -> Self {
        Self {
            primary: rgba(0xffffffee).into(),
            secondary: rgba(0xccccccff).into(),
            muted: rgba(0x888888ff).into(),
        }
    }
}

/// Border colors.
#[derive(Debug, Clone, Copy)]
pub struct BorderColors {
    pub default: Hsla,
    pub subtle: Hsla,
}

impl Default for BorderColors {
    fn default() -> Self {
        Self {
            default: rgba(0x3c3c3cff).into(),
            subtle: rgba(0x2d2d2dff).into(),
        }
    }
}

/// Accent colors.
#[derive(Debug, Clone, Copy)]
pub struct AccentColors {
    pub primary: Hsla,
    /// Focused window row, open submenu.
    pub selection: Hsla,
}

impl Default for AccentColors {
    fn default() -> Self {
        Self {
            primary: rgba(0x007accff).into(),
            selection: rgba(0x094771ff).into(),
        }
    }
}

/// Interactive element colors.
#[derive(Debug, Clone, Copy)]
pub struct InteractiveColors {
    pub default: Hsla,
    pub hover: Hsla,
    pub active: Hsla,
}

impl Default for InteractiveColors {
    fn default() -> Self {
        Self {
            default: rgba(0x3b3b3bff).into(),
            hover: rgba(0x454545ff).into(),
            active: rgba(0x505050ff).into(),
        }
    }
}

/// Spacing constants (in pixels)
pub mod spacing {
    pub const XS: f32 = 4.0;
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 12.0;
}

/// Border radius constants (in pixels)
pub mod radius {
    pub const SM: f32 = 4.0;
    pub const LG: f32 = 8.0;
}

/// Font sizes (in pixels)
pub mod font_size {
    pub const XS: f32 = 10.0;
    pub const SM: f32 = 11.0;
    pub const BASE: f32 = 13.0;
}

/// Icon sizes (in pixels)
pub mod icon_size {
    pub const MD: f32 = 14.0;
    pub const LG: f32 = 16.0;
    pub const XL: f32 = 18.0;
}
