mod panel_row;
mod stack;

pub use panel_row::{PanelRow, RowIcon};
pub use stack::{h_flex, v_flex};
