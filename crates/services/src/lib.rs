//! Services behind the panel items.
//!
//! This crate holds everything that does not touch rendering: the event bus,
//! the package registry, the locale service, compositor integration and the
//! window list view model.

pub mod applications;
pub mod compositor;
pub mod events;
pub mod locale;
pub mod watcher;
pub mod windows;

pub use applications::{
    ApplicationsService, Category, CategoryConfig, IconRef, MenuEntry, Package, PackageKind,
    build_tree, default_categories,
};
pub use compositor::{CompositorCommand, CompositorSubscriber, WindowId, WindowInfo};
pub use events::{EventBus, EventKind, ShellEvent, Subscription};
pub use locale::{Catalogs, Locale};
pub use watcher::FileWatcher;
pub use windows::{WindowList, WindowSummary, WindowsSubscriber};

use tracing::warn;

/// Shared services container.
///
/// Created once at startup and handed to the panel items, which subscribe to
/// what they need.
#[derive(Clone)]
pub struct Services {
    pub bus: EventBus,
    pub applications: ApplicationsService,
    /// `None` when no supported compositor is running.
    pub compositor: Option<CompositorSubscriber>,
}

impl Services {
    /// Scan applications, start watching desktop entries and connect to the
    /// compositor.
    pub fn new() -> Self {
        let bus = EventBus::new();

        let applications = ApplicationsService::new(bus.clone());
        applications.watch();

        let compositor = match CompositorSubscriber::new(bus.clone()) {
            Ok(compositor) => Some(compositor),
            Err(err) => {
                warn!("Window tracking disabled: {:#}", err);
                None
            }
        };

        Self {
            bus,
            applications,
            compositor,
        }
    }

    /// Windows known to the compositor right now.
    pub fn current_windows(&self) -> Vec<WindowInfo> {
        self.compositor
            .as_ref()
            .map(CompositorSubscriber::windows)
            .unwrap_or_default()
    }

    /// A new window list view model seeded from the compositor.
    pub fn window_list(&self) -> WindowsSubscriber {
        WindowsSubscriber::new(
            &self.bus,
            self.applications.clone(),
            &self.current_windows(),
        )
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new()
    }
}
