//! Items hosted by the panel bar.

mod menu;
mod registry;
pub(crate) mod style;
mod windows;

pub use menu::{Menu, MenuConfig};
pub use registry::Widget;
pub use windows::{Windows, WindowsConfig};
