//! Type definitions for compositor windows and commands.

use std::fmt;

use crate::events::ShellEvent;

/// Compositor-assigned window handle (a Hyprland address such as `0x55d0c3a1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct WindowId(String);

impl WindowId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WindowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Observable state of a toplevel window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowInfo {
    /// Window handle.
    pub id: WindowId,
    /// Window class (application identifier).
    pub class: String,
    /// Window title.
    pub title: String,
    /// Whether the window currently has keyboard focus.
    pub focused: bool,
}

/// Supported compositor backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositorBackend {
    #[default]
    Hyprland,
}

impl CompositorBackend {
    /// Get a human-readable name for this backend.
    pub fn name(&self) -> &'static str {
        match self {
            CompositorBackend::Hyprland => "Hyprland",
        }
    }
}

/// Commands that can be sent to the compositor.
#[derive(Debug, Clone, PartialEq)]
pub enum CompositorCommand {
    /// Raise and focus a window.
    FocusWindow(WindowId),
}

/// Known windows, used to turn raw compositor notifications into full
/// [`ShellEvent`] snapshots.
///
/// Compositor events carry partial data (a close only names the address, a
/// focus change only names the newly focused window), so the table keeps the
/// last known state of every window.
#[derive(Debug, Clone, Default)]
pub struct WindowTable {
    windows: Vec<WindowInfo>,
}

impl WindowTable {
    pub fn new(windows: Vec<WindowInfo>) -> Self {
        Self { windows }
    }

    pub fn windows(&self) -> &[WindowInfo] {
        &self.windows
    }

    /// A window was mapped.
    pub fn opened(&mut self, info: WindowInfo) -> Vec<ShellEvent> {
        if self.windows.iter().any(|w| w.id == info.id) {
            return Vec::new();
        }
        self.windows.push(info.clone());
        vec![ShellEvent::WindowCreated(info)]
    }

    /// A window was unmapped.
    pub fn closed(&mut self, id: &WindowId) -> Vec<ShellEvent> {
        let before = self.windows.len();
        self.windows.retain(|w| &w.id != id);
        if self.windows.len() == before {
            return Vec::new();
        }
        vec![ShellEvent::WindowDestroyed(id.clone())]
    }

    /// A window's title changed, focused or not.
    pub fn retitled(&mut self, id: &WindowId, title: &str) -> Vec<ShellEvent> {
        match self.windows.iter_mut().find(|w| &w.id == id) {
            Some(window) if window.title != title => {
                window.title = title.to_string();
                vec![ShellEvent::WindowChanged(window.clone())]
            }
            _ => Vec::new(),
        }
    }

    /// Focus moved, or the focused window's title changed.
    ///
    /// `None` means no window has focus. Returns one change per window whose
    /// observable state differs from before.
    pub fn focused(&mut self, active: Option<(&WindowId, &str)>) -> Vec<ShellEvent> {
        let mut events = Vec::new();

        for window in &mut self.windows {
            let (focused, title) = match active {
                Some((id, title)) if &window.id == id => (true, title),
                _ => (false, window.title.as_str()),
            };

            if window.focused != focused || window.title != title {
                window.title = title.to_string();
                window.focused = focused;
                events.push(ShellEvent::WindowChanged(window.clone()));
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(id: &str, title: &str) -> WindowInfo {
        WindowInfo {
            id: WindowId::from(id),
            class: "kitty".into(),
            title: title.into(),
            focused: false,
        }
    }

    #[test]
    fn test_open_twice_emits_once() {
        let mut table = WindowTable::default();
        assert_eq!(table.opened(window("0x1", "a")).len(), 1);
        assert!(table.opened(window("0x1", "a")).is_empty());
        assert_eq!(table.windows().len(), 1);
    }

    #[test]
    fn test_close_unknown_is_silent() {
        let mut table = WindowTable::new(vec![window("0x1", "a")]);
        assert!(table.closed(&WindowId::from("0x2")).is_empty());
        assert_eq!(
            table.closed(&WindowId::from("0x1")),
            vec![ShellEvent::WindowDestroyed(WindowId::from("0x1"))]
        );
    }

    #[test]
    fn test_focus_move_changes_both_windows() {
        let mut table = WindowTable::new(vec![window("0x1", "a"), window("0x2", "b")]);
        table.focused(Some((&WindowId::from("0x1"), "a")));

        let events = table.focused(Some((&WindowId::from("0x2"), "b")));
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| matches!(e, ShellEvent::WindowChanged(_))));
        assert!(!table.windows()[0].focused);
        assert!(table.windows()[1].focused);
    }

    #[test]
    fn test_title_change_on_focused_window() {
        let mut table = WindowTable::new(vec![window("0x1", "old")]);
        table.focused(Some((&WindowId::from("0x1"), "old")));

        let events = table.focused(Some((&WindowId::from("0x1"), "new")));
        let [ShellEvent::WindowChanged(info)] = events.as_slice() else {
            panic!("expected a single change, got {events:?}");
        };
        assert_eq!(info.title, "new");
        assert!(info.focused);
    }

    #[test]
    fn test_unfocused_window_retitled() {
        let mut table = WindowTable::new(vec![window("0x1", "a"), window("0x2", "build")]);
        table.focused(Some((&WindowId::from("0x1"), "a")));

        let events = table.retitled(&WindowId::from("0x2"), "build done");
        let [ShellEvent::WindowChanged(info)] = events.as_slice() else {
            panic!("expected a single change, got {events:?}");
        };
        assert_eq!(info.id, WindowId::from("0x2"));
        assert_eq!(info.title, "build done");
        assert!(!info.focused);
        assert!(table.windows()[0].focused);
    }

    #[test]
    fn test_retitle_same_or_unknown_is_silent() {
        let mut table = WindowTable::new(vec![window("0x1", "a")]);
        assert!(table.retitled(&WindowId::from("0x1"), "a").is_empty());
        assert!(table.retitled(&WindowId::from("0x9"), "x").is_empty());
        assert_eq!(table.windows()[0].title, "a");
    }

    #[test]
    fn test_focus_cleared() {
        let mut table = WindowTable::new(vec![window("0x1", "a")]);
        table.focused(Some((&WindowId::from("0x1"), "a")));
        assert_eq!(table.focused(None).len(), 1);
        assert!(table.focused(None).is_empty());
    }
}
