use gpui::{Div, Styled, div};

/// Horizontal flex container with centered items.
pub fn h_flex() -> Div {
    div().flex().flex_row().items_center()
}

/// Vertical flex container.
pub fn v_flex() -> Div {
    div().flex().flex_col()
}
