//! File watcher service using inotify.
//!
//! Watches either a single file (the config file) or every file with a given
//! extension in a set of directories (desktop entries). Bursts of events are
//! debounced into a single notification.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use inotify::{EventMask, Inotify, WatchMask};
use tokio::sync::mpsc;

const DEBOUNCE_MS: u64 = 200;

/// Which directory entries trigger a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    /// Exactly this file name.
    Name(OsString),
    /// Any file with this extension.
    Extension(OsString),
}

impl Filter {
    fn matches(&self, name: &OsStr) -> bool {
        match self {
            Filter::Name(expected) => name == expected.as_os_str(),
            Filter::Extension(ext) => Path::new(name).extension() == Some(ext.as_os_str()),
        }
    }
}

pub struct FileWatcher;

impl FileWatcher {
    /// Notify on changes to a single file.
    pub fn watch(path: PathBuf) -> mpsc::UnboundedReceiver<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        thread::spawn(move || {
            let result = watch_target(&path).and_then(|(dir, name)| {
                run(vec![dir.to_path_buf()], Filter::Name(name), true, tx)
            });
            if let Err(err) = result {
                tracing::warn!("File watcher stopped: {}", err);
            }
        });
        rx
    }

    /// Notify on changes to files with `extension` in any of `dirs`.
    ///
    /// Directories that do not exist are skipped.
    pub fn watch_dirs(dirs: Vec<PathBuf>, extension: &str) -> mpsc::UnboundedReceiver<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        let filter = Filter::Extension(OsString::from(extension));
        thread::spawn(move || {
            let dirs: Vec<PathBuf> = dirs.into_iter().filter(|d| d.is_dir()).collect();
            if dirs.is_empty() {
                tracing::debug!("No directories to watch");
                return;
            }
            if let Err(err) = run(dirs, filter, false, tx) {
                tracing::warn!("Directory watcher stopped: {}", err);
            }
        });
        rx
    }
}

fn run(
    dirs: Vec<PathBuf>,
    filter: Filter,
    watch_self: bool,
    tx: mpsc::UnboundedSender<()>,
) -> anyhow::Result<()> {
    let mut inotify = Inotify::init()?;

    let mut mask = WatchMask::MODIFY
        | WatchMask::CLOSE_WRITE
        | WatchMask::CREATE
        | WatchMask::DELETE
        | WatchMask::MOVED_TO
        | WatchMask::MOVED_FROM;
    if watch_self {
        mask |= WatchMask::MOVE_SELF | WatchMask::DELETE_SELF;
    }

    for dir in &dirs {
        inotify.watches().add(dir, mask)?;
    }

    let mut buffer = [0u8; 4096];
    let mut last_sent: Option<Instant> = None;

    loop {
        let events = inotify.read_events_blocking(&mut buffer)?;
        let mut changed = false;

        for event in events {
            let renamed_or_deleted = event.mask.contains(EventMask::MOVE_SELF)
                || event.mask.contains(EventMask::DELETE_SELF);
            let relevant = event.name.is_some_and(|name| filter.matches(name));
            if renamed_or_deleted || relevant {
                changed = true;
                break;
            }
        }

        if changed {
            let now = Instant::now();
            let debounce_elapsed = last_sent
                .map(|last| now.duration_since(last) >= Duration::from_millis(DEBOUNCE_MS))
                .unwrap_or(true);
            if debounce_elapsed {
                if tx.send(()).is_err() {
                    break;
                }
                last_sent = Some(now);
            }
        }
    }

    Ok(())
}

fn watch_target(path: &Path) -> anyhow::Result<(&Path, OsString)> {
    let parent = path.parent().ok_or_else(|| {
        anyhow::anyhow!("Watched path has no parent directory: {}", path.display())
    })?;
    let name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Watched path has no filename: {}", path.display()))?;
    Ok((parent, name.to_os_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_name() {
        let filter = Filter::Name(OsString::from("config.toml"));
        assert!(filter.matches(OsStr::new("config.toml")));
        assert!(!filter.matches(OsStr::new("config.toml.swp")));
    }

    #[test]
    fn test_filter_by_extension() {
        let filter = Filter::Extension(OsString::from("desktop"));
        assert!(filter.matches(OsStr::new("firefox.desktop")));
        assert!(!filter.matches(OsStr::new("mimeinfo.cache")));
        assert!(!filter.matches(OsStr::new("desktop")));
    }

    #[test]
    fn test_watch_target_splits_path() {
        let (dir, name) = watch_target(Path::new("/etc/deskpanel/config.toml")).unwrap();
        assert_eq!(dir, Path::new("/etc/deskpanel"));
        assert_eq!(name, OsString::from("config.toml"));
    }
}
