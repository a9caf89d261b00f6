//! Freedesktop icon theme lookup.
//!
//! Resolves icon names (e.g., "firefox", "applications-games") to filesystem
//! paths by searching XDG icon theme directories (hicolor, then Adwaita) and
//! `/usr/share/pixmaps`.

use std::path::{Path, PathBuf};

/// Size subdirectories to search, in priority order.
const SIZE_DIRS: &[&str] = &[
    "scalable", "48x48", "64x64", "32x32", "128x128", "24x24", "22x22", "16x16",
];

/// Icon contexts that hold application and category icons.
const CONTEXTS: &[&str] = &["apps", "categories", "places"];

/// Themes to search, in order.
const THEMES: &[&str] = &["hicolor", "Adwaita"];

/// File extensions to try, in priority order.
const EXTENSIONS: &[&str] = &["svg", "png"];

/// A resolved icon: a file on disk, or the panel's built-in fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IconRef {
    File(PathBuf),
    #[default]
    Fallback,
}

impl IconRef {
    /// Resolve an optional icon name or path.
    pub fn resolve(name: Option<&str>) -> Self {
        name.and_then(lookup_icon)
            .map(IconRef::File)
            .unwrap_or(IconRef::Fallback)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            IconRef::File(path) => Some(path),
            IconRef::Fallback => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, IconRef::Fallback)
    }
}

/// Resolve an icon name or path to an actual filesystem path.
pub fn lookup_icon(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    let path = Path::new(name);
    if path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }

    for base in icon_theme_base_dirs() {
        for theme in THEMES {
            if let Some(found) = search_theme_dir(&base.join(theme), name) {
                return Some(found);
            }
        }
    }

    EXTENSIONS
        .iter()
        .map(|ext| PathBuf::from(format!("/usr/share/pixmaps/{name}.{ext}")))
        .find(|p| p.exists())
}

fn search_theme_dir(theme_dir: &Path, name: &str) -> Option<PathBuf> {
    if !theme_dir.is_dir() {
        return None;
    }
    for size in SIZE_DIRS {
        for context in CONTEXTS {
            let dir = theme_dir.join(size).join(context);
            for ext in EXTENSIONS {
                let candidate = dir.join(format!("{name}.{ext}"));
                if candidate.exists() {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

fn icon_theme_base_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".icons"));
        dirs.push(home.join(".local/share/icons"));
    }

    if let Some(data_dirs) = std::env::var_os("XDG_DATA_DIRS") {
        for dir in std::env::split_paths(&data_dirs) {
            dirs.push(dir.join("icons"));
        }
    } else {
        dirs.push(PathBuf::from("/usr/local/share/icons"));
        dirs.push(PathBuf::from("/usr/share/icons"));
    }

    dirs
}
