//! View model for the window list panel item.
//!
//! [`WindowList`] holds the active windows and pending launches.
//! [`WindowsSubscriber`] owns one, keeps it in sync with the event bus and
//! exposes it as a signal. Its bus subscriptions live exactly as long as the
//! subscriber (and its clones).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures_signals::signal::{Mutable, MutableSignalCloned};
use tracing::trace;

use crate::applications::{ApplicationsService, IconRef};
use crate::compositor::{CompositorCommand, WindowId, WindowInfo};
use crate::events::{EventBus, EventKind, ShellEvent, Subscription};

/// A row in the window list.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSummary {
    pub id: WindowId,
    pub icon: IconRef,
    pub title: String,
    pub focused: bool,
}

impl WindowSummary {
    pub fn new(info: &WindowInfo, icon: IconRef) -> Self {
        Self {
            id: info.id.clone(),
            icon,
            title: info.title.clone(),
            focused: info.focused,
        }
    }

    /// Command that raises and focuses this window.
    pub fn raise_command(&self) -> CompositorCommand {
        CompositorCommand::FocusWindow(self.id.clone())
    }
}

/// Active windows and pending launcher names, both in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowList {
    windows: Vec<WindowSummary>,
    launchers: Vec<String>,
}

impl WindowList {
    pub fn new(windows: impl IntoIterator<Item = WindowSummary>) -> Self {
        let mut list = Self::default();
        for window in windows {
            list.add(window);
        }
        list
    }

    pub fn windows(&self) -> &[WindowSummary] {
        &self.windows
    }

    pub fn launchers(&self) -> &[String] {
        &self.launchers
    }

    /// Append a window unless one with the same id is already listed.
    pub fn add(&mut self, window: WindowSummary) {
        if self.windows.iter().any(|w| w.id == window.id) {
            return;
        }
        self.windows.push(window);
    }

    /// Remove the window with this id, if listed.
    pub fn remove(&mut self, id: &WindowId) {
        if let Some(index) = self.windows.iter().position(|w| &w.id == id) {
            self.windows.remove(index);
        }
    }

    /// Replace the window with the same id in place, if listed.
    pub fn change(&mut self, window: WindowSummary) {
        if let Some(slot) = self.windows.iter_mut().find(|w| w.id == window.id) {
            *slot = window;
        }
    }

    pub fn add_launcher(&mut self, name: &str) {
        self.launchers.push(name.to_string());
    }

    /// Remove the first pending launch with this name.
    pub fn remove_launcher(&mut self, name: &str) {
        if let Some(index) = self.launchers.iter().position(|n| n == name) {
            self.launchers.remove(index);
        }
    }

    /// Apply a bus event, mapping compositor windows through `map`.
    pub fn apply(&mut self, event: &ShellEvent, map: impl Fn(&WindowInfo) -> WindowSummary) {
        match event {
            ShellEvent::LaunchRequested(name) => self.add_launcher(name),
            ShellEvent::Launched(name) => self.remove_launcher(name),
            ShellEvent::WindowCreated(info) => self.add(map(info)),
            ShellEvent::WindowDestroyed(id) => self.remove(id),
            ShellEvent::WindowChanged(info) => self.change(map(info)),
        }
    }
}

/// Resolves window icons through the package registry, caching per class.
struct IconMapper {
    applications: ApplicationsService,
    cache: Mutex<IconCache>,
}

/// Icons per window class, valid for one registry generation.
#[derive(Default)]
struct IconCache {
    generation: u64,
    icons: HashMap<String, IconRef>,
}

impl IconMapper {
    fn new(applications: ApplicationsService) -> Self {
        let cache = IconCache {
            generation: applications.generation(),
            icons: HashMap::new(),
        };
        Self {
            applications,
            cache: Mutex::new(cache),
        }
    }

    fn summary(&self, info: &WindowInfo) -> WindowSummary {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = self.applications.generation();
        if cache.generation != generation {
            cache.generation = generation;
            cache.icons.clear();
        }
        let icon = cache
            .icons
            .entry(info.class.clone())
            .or_insert_with(|| {
                IconRef::resolve(self.applications.icon_for_class(&info.class).as_deref())
            })
            .clone();
        WindowSummary::new(info, icon)
    }
}

/// Event-driven window list.
#[derive(Clone)]
pub struct WindowsSubscriber {
    data: Mutable<WindowList>,
    _subscriptions: Arc<Vec<Subscription>>,
}

impl WindowsSubscriber {
    /// Seed the list with `initial` windows and subscribe to the five
    /// lifecycle events.
    pub fn new(bus: &EventBus, applications: ApplicationsService, initial: &[WindowInfo]) -> Self {
        let mapper = Arc::new(IconMapper::new(applications));

        let data = Mutable::new(WindowList::new(initial.iter().map(|w| mapper.summary(w))));

        let subscriptions = [
            EventKind::LaunchRequested,
            EventKind::Launched,
            EventKind::WindowCreated,
            EventKind::WindowDestroyed,
            EventKind::WindowChanged,
        ]
        .into_iter()
        .map(|kind| {
            let data = data.clone();
            let mapper = mapper.clone();
            bus.subscribe(kind, move |event| {
                trace!("Window list applying {:?}", kind);
                data.lock_mut().apply(event, |info| mapper.summary(info));
            })
        })
        .collect();

        Self {
            data,
            _subscriptions: Arc::new(subscriptions),
        }
    }

    /// Get a signal that emits when the list changes.
    pub fn subscribe(&self) -> MutableSignalCloned<WindowList> {
        self.data.signal_cloned()
    }

    /// Get the current list snapshot.
    pub fn get(&self) -> WindowList {
        self.data.get_cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str, title: &str) -> WindowInfo {
        WindowInfo {
            id: WindowId::from(id),
            class: String::new(),
            title: title.to_string(),
            focused: false,
        }
    }

    fn summary(id: &str, title: &str) -> WindowSummary {
        WindowSummary::new(&info(id, title), IconRef::Fallback)
    }

    fn subscriber(bus: &EventBus, initial: &[WindowInfo]) -> WindowsSubscriber {
        let apps = ApplicationsService::with_packages(bus.clone(), Vec::new());
        WindowsSubscriber::new(bus, apps, initial)
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut list = WindowList::default();
        list.add(summary("0x1", "a"));
        list.add(summary("0x1", "a again"));
        assert_eq!(list.windows().len(), 1);
        assert_eq!(list.windows()[0].title, "a");
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut list = WindowList::new([summary("0x1", "a")]);
        let before = list.clone();
        list.remove(&WindowId::from("0x2"));
        assert_eq!(list, before);
    }

    #[test]
    fn test_change_replaces_in_place() {
        let mut list = WindowList::new([summary("0x1", "a"), summary("0x2", "b")]);
        let mut changed = summary("0x1", "renamed");
        changed.focused = true;
        list.change(changed);

        assert_eq!(list.windows()[0].title, "renamed");
        assert!(list.windows()[0].focused);
        assert_eq!(list.windows()[1].title, "b");

        list.change(summary("0x9", "ghost"));
        assert_eq!(list.windows().len(), 2);
    }

    #[test]
    fn test_launcher_round_trip_restores_state() {
        let mut list = WindowList::default();
        list.add_launcher("editor");
        let before = list.clone();

        list.add_launcher("calc");
        list.remove_launcher("calc");
        assert_eq!(list, before);
    }

    #[test]
    fn test_launchers_are_not_deduplicated() {
        let mut list = WindowList::default();
        list.add_launcher("calc");
        list.add_launcher("calc");
        list.remove_launcher("calc");
        assert_eq!(list.launchers(), ["calc"]);

        list.remove_launcher("unknown");
        assert_eq!(list.launchers().len(), 1);
    }

    #[test]
    fn test_raise_command_targets_window() {
        assert_eq!(
            summary("0xabc", "a").raise_command(),
            CompositorCommand::FocusWindow(WindowId::from("0xabc"))
        );
    }

    #[test]
    fn test_subscriber_follows_bus() {
        let bus = EventBus::new();
        let windows = subscriber(&bus, &[info("0x1", "seed")]);

        bus.emit(ShellEvent::LaunchRequested("term".into()));
        bus.emit(ShellEvent::WindowCreated(info("0x2", "term")));
        bus.emit(ShellEvent::WindowCreated(info("0x2", "term")));
        bus.emit(ShellEvent::Launched("term".into()));
        bus.emit(ShellEvent::WindowChanged(info("0x1", "seed renamed")));
        bus.emit(ShellEvent::WindowDestroyed(WindowId::from("0x404")));

        let list = windows.get();
        let titles: Vec<&str> = list.windows().iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["seed renamed", "term"]);
        assert!(list.launchers().is_empty());
    }

    #[test]
    fn test_icons_follow_registry_refresh() {
        let dir = std::env::temp_dir().join(format!("deskpanel-winicons-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let icon = dir.join("foot.png");
        std::fs::write(&icon, b"png").unwrap();

        let bus = EventBus::new();
        let apps = ApplicationsService::with_packages(bus.clone(), Vec::new());
        let mut window = info("0x1", "shell");
        window.class = "foot".into();
        let windows = WindowsSubscriber::new(&bus, apps.clone(), std::slice::from_ref(&window));
        assert!(windows.get().windows()[0].icon.is_fallback());

        let entry = format!(
            "[Desktop Entry]\nName=Foot\nExec=foot\nIcon={}\n",
            icon.display()
        );
        let package = crate::applications::desktop::parse_desktop_entry("foot", &entry).unwrap();
        apps.replace(vec![package]);

        window.title = "shell 2".into();
        bus.emit(ShellEvent::WindowChanged(window));
        assert_eq!(windows.get().windows()[0].icon, IconRef::File(icon));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_dropping_subscriber_unsubscribes() {
        let bus = EventBus::new();
        let windows = subscriber(&bus, &[]);
        let clone = windows.clone();
        assert_eq!(bus.handler_count(), 5);

        drop(windows);
        assert_eq!(bus.handler_count(), 5);
        drop(clone);
        assert_eq!(bus.handler_count(), 0);
    }
}
