//! Shared sizing and spacing helpers for bar items.

use ui::{font_size, icon_size, spacing};

/// Common gap used inside compact bar items.
pub const CHIP_GAP: f32 = spacing::XS;
/// Common vertical padding used inside compact bar items.
pub const CHIP_PADDING_Y: f32 = 3.0;

/// Horizontal padding for compact bar items.
#[inline(always)]
pub fn chip_padding_x(is_vertical: bool) -> f32 {
    if is_vertical {
        spacing::XS
    } else {
        spacing::SM
    }
}

/// Icon size tuned for bar density.
#[inline(always)]
pub fn icon(is_vertical: bool) -> f32 {
    if is_vertical {
        icon_size::MD
    } else {
        icon_size::LG
    }
}

/// Label text size tuned for bar density.
#[inline(always)]
pub fn label(is_vertical: bool) -> f32 {
    if is_vertical {
        font_size::XS
    } else {
        font_size::SM
    }
}

/// Shorten `text` to `max_chars` characters with a trailing ellipsis.
/// `0` disables truncation.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return text.to_string();
    }
    match text.char_indices().nth(max_chars) {
        Some((cutoff, _)) => format!("{}…", &text[..cutoff]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Übersicht", 4), "Über…");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("anything", 0), "anything");
    }
}
