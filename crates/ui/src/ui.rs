mod components;
mod theme;

pub use components::{PanelRow, RowIcon, h_flex, v_flex};

pub use theme::{
    AccentColors, ActiveTheme, BgColors, BorderColors, InteractiveColors, TextColors, Theme,
    font_size, icon_size, radius, spacing,
};
