//! Compositor service for window tracking and window commands.
//!
//! The subscriber seeds a [`WindowTable`] from the running compositor, then a
//! listener thread keeps it in sync and republishes every window lifecycle
//! change on the shared [`EventBus`].

pub mod hyprland;
pub mod types;

use anyhow::Result;
use futures_signals::signal::Mutable;
use tracing::info;

use crate::events::EventBus;

pub use types::{CompositorBackend, CompositorCommand, WindowId, WindowInfo, WindowTable};

/// Event-driven compositor subscriber.
#[derive(Debug, Clone)]
pub struct CompositorSubscriber {
    table: Mutable<WindowTable>,
    backend: CompositorBackend,
}

impl CompositorSubscriber {
    /// Detect the running compositor, fetch its windows and start listening.
    ///
    /// Returns an error if no supported compositor is detected.
    pub fn new(bus: EventBus) -> Result<Self> {
        let backend = detect_backend()
            .ok_or_else(|| anyhow::anyhow!("No supported compositor detected (Hyprland)"))?;

        info!("Detected compositor backend: {}", backend.name());

        let initial = match backend {
            CompositorBackend::Hyprland => hyprland::fetch_windows()?,
        };
        info!("Tracking {} existing windows", initial.len());

        let table = Mutable::new(WindowTable::new(initial));

        match backend {
            CompositorBackend::Hyprland => hyprland::start_listener(table.clone(), bus),
        }

        Ok(Self { table, backend })
    }

    /// Snapshot of the currently known windows, in mapping order.
    pub fn windows(&self) -> Vec<WindowInfo> {
        self.table.lock_ref().windows().to_vec()
    }

    /// Execute a compositor command.
    pub fn dispatch(&self, command: CompositorCommand) -> Result<()> {
        match self.backend {
            CompositorBackend::Hyprland => hyprland::execute_command(command),
        }
    }
}

/// Detect which compositor backend is available.
fn detect_backend() -> Option<CompositorBackend> {
    if hyprland::is_available() {
        Some(CompositorBackend::Hyprland)
    } else {
        None
    }
}
