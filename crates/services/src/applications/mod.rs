//! Applications service: the package registry.
//!
//! Scans desktop entries from the standard XDG directories, answers package
//! queries for the menu, and launches applications by name. Launches are
//! announced on the [`EventBus`] so the window list can show a placeholder
//! while the process starts.

pub mod desktop;
pub mod icons;
pub mod menu;

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;

use tracing::{debug, error, info, warn};

use crate::events::{EventBus, ShellEvent};
use crate::watcher::FileWatcher;

pub use desktop::{Package, PackageKind};
pub use icons::IconRef;
pub use menu::{Category, CategoryConfig, MenuEntry, build_tree, default_categories};

/// Registry of installed applications.
#[derive(Debug, Clone)]
pub struct ApplicationsService {
    packages: Arc<RwLock<Vec<Package>>>,
    /// Bumped every time the package list is replaced.
    generation: Arc<AtomicU64>,
    bus: EventBus,
}

impl ApplicationsService {
    /// Create the registry by scanning for desktop entries.
    pub fn new(bus: EventBus) -> Self {
        let packages = scan_packages(&application_dirs());
        info!("Found {} desktop entries", packages.len());
        Self::with_packages(bus, packages)
    }

    /// Create a registry over a fixed package list.
    pub fn with_packages(bus: EventBus, packages: Vec<Package>) -> Self {
        Self {
            packages: Arc::new(RwLock::new(packages)),
            generation: Arc::new(AtomicU64::new(0)),
            bus,
        }
    }

    /// Packages matching `predicate`, in registry order.
    pub fn query(&self, predicate: impl Fn(&Package) -> bool) -> Vec<Package> {
        self.read().iter().filter(|p| predicate(p)).cloned().collect()
    }

    /// User-facing applications.
    pub fn applications(&self) -> Vec<Package> {
        self.query(Package::is_application)
    }

    /// Find a package by name (desktop id).
    pub fn find(&self, name: &str) -> Option<Package> {
        self.read().iter().find(|p| p.name == name).cloned()
    }

    /// Icon name of the package owning windows of `class`.
    pub fn icon_for_class(&self, class: &str) -> Option<String> {
        if class.is_empty() {
            return None;
        }
        self.read()
            .iter()
            .find(|p| p.matches_class(class))
            .and_then(|p| p.icon.clone())
    }

    /// Launch an application by name. Fire-and-forget.
    ///
    /// Emits [`ShellEvent::LaunchRequested`] immediately and
    /// [`ShellEvent::Launched`] once the process has been spawned (or failed
    /// to spawn).
    pub fn launch(&self, name: &str) {
        let Some(package) = self.find(name) else {
            warn!("Cannot launch unknown application: {}", name);
            return;
        };
        let Some(exec) = package.exec else {
            warn!("Application {} has no Exec line", name);
            return;
        };

        self.bus.emit(ShellEvent::LaunchRequested(name.to_string()));

        let bus = self.bus.clone();
        let name = name.to_string();
        thread::spawn(move || {
            let command = desktop::strip_field_codes(&exec);
            debug!("Launching application: {} ({})", name, command);

            match Command::new("sh").args(["-c", &command]).spawn() {
                Ok(_) => debug!("Application launched: {}", name),
                Err(e) => error!("Failed to launch {}: {}", name, e),
            }

            bus.emit(ShellEvent::Launched(name));
        });
    }

    /// Rescan desktop entries.
    pub fn refresh(&self) {
        let packages = scan_packages(&application_dirs());
        debug!("Refreshed applications, found {}", packages.len());
        self.replace(packages);
    }

    /// Swap in a new package list.
    pub fn replace(&self, packages: Vec<Package>) {
        *self.packages.write().unwrap_or_else(PoisonError::into_inner) = packages;
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// Changes whenever the package list is replaced. Lets callers drop
    /// anything derived from an older list.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Rescan whenever a desktop entry is added, changed or removed.
    pub fn watch(&self) {
        let mut rx = FileWatcher::watch_dirs(application_dirs(), "desktop");
        let this = self.clone();
        thread::spawn(move || {
            while rx.blocking_recv().is_some() {
                this.refresh();
            }
        });
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Package>> {
        self.packages.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Scan directories in priority order; earlier directories win on id clashes.
fn scan_packages(dirs: &[PathBuf]) -> Vec<Package> {
    let mut seen: HashMap<String, Package> = HashMap::new();

    for dir in dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_none_or(|e| e != "desktop") {
                continue;
            }
            if let Some(package) = desktop::parse_desktop_file(&path) {
                seen.entry(package.name.clone()).or_insert(package);
            }
        }
    }

    let mut packages: Vec<_> = seen.into_values().collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    packages
}

/// XDG application directories in priority order.
pub fn application_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(data_home) = std::env::var_os("XDG_DATA_HOME") {
        dirs.push(PathBuf::from(data_home).join("applications"));
    } else if let Some(home) = std::env::var_os("HOME") {
        dirs.push(PathBuf::from(home).join(".local/share/applications"));
    }

    if let Some(data_dirs) = std::env::var_os("XDG_DATA_DIRS") {
        for dir in std::env::split_paths(&data_dirs) {
            dirs.push(dir.join("applications"));
        }
    } else {
        dirs.push(PathBuf::from("/usr/local/share/applications"));
        dirs.push(PathBuf::from("/usr/share/applications"));
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::path::Path;
    use std::sync::Mutex;
    use std::sync::mpsc;
    use std::time::Duration;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "deskpanel-apps-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_entry(dir: &Path, id: &str, name: &str) {
        fs::write(
            dir.join(format!("{id}.desktop")),
            format!("[Desktop Entry]\nType=Application\nName={name}\nExec=true\n"),
        )
        .unwrap();
    }

    fn registry(bus: EventBus) -> ApplicationsService {
        let pkg = desktop::parse_desktop_entry(
            "calc",
            "[Desktop Entry]\nName=Calculator\nExec=true\nStartupWMClass=Gnome-calculator\nIcon=calc\n",
        )
        .unwrap();
        let link = desktop::parse_desktop_entry(
            "docs",
            "[Desktop Entry]\nType=Link\nName=Docs\n",
        )
        .unwrap();
        ApplicationsService::with_packages(bus, vec![pkg, link])
    }

    #[test]
    fn test_user_dir_overrides_system_dir() {
        let user = scratch_dir("user");
        let system = scratch_dir("system");
        write_entry(&user, "editor", "My Editor");
        write_entry(&system, "editor", "System Editor");
        write_entry(&system, "viewer", "Viewer");
        fs::write(system.join("README"), "not a desktop file").unwrap();

        let packages = scan_packages(&[user.clone(), system.clone()]);
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "editor");
        assert_eq!(packages[0].title, "My Editor");

        fs::remove_dir_all(user).unwrap();
        fs::remove_dir_all(system).unwrap();
    }

    #[test]
    fn test_applications_filters_links() {
        let apps = registry(EventBus::new()).applications();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "calc");
    }

    #[test]
    fn test_icon_for_class() {
        let registry = registry(EventBus::new());
        assert_eq!(registry.icon_for_class("gnome-calculator").as_deref(), Some("calc"));
        assert_eq!(registry.icon_for_class(""), None);
        assert_eq!(registry.icon_for_class("firefox"), None);
    }

    #[test]
    fn test_launch_emits_request_then_completion() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = mpsc::channel();
        let _sub = bus.subscribe_all({
            let seen = seen.clone();
            let tx = Mutex::new(tx);
            move |event| {
                seen.lock().unwrap().push(event.clone());
                if event.kind() == EventKind::Launched {
                    let _ = tx.lock().unwrap().send(());
                }
            }
        });

        registry(bus).launch("calc");
        rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ShellEvent::LaunchRequested("calc".into()),
                ShellEvent::Launched("calc".into()),
            ]
        );
    }

    #[test]
    fn test_launch_unknown_is_silent() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(0usize));
        let _sub = bus.subscribe_all({
            let seen = seen.clone();
            move |_| *seen.lock().unwrap() += 1
        });

        registry(bus.clone()).launch("nope");
        registry(bus).launch("docs");
        assert_eq!(*seen.lock().unwrap(), 0);
    }
}
