//! The panel bar and the items it hosts.

#[allow(clippy::module_inception)]
mod bar;
pub mod config;
pub mod modules;

pub use bar::init;
