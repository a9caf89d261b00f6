//! Desktop entry (`.desktop`) parsing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Desktop entry `Type` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageKind {
    Application,
    Link,
    Directory,
    Other(String),
}

impl PackageKind {
    fn parse(value: &str) -> Self {
        match value {
            "Application" => PackageKind::Application,
            "Link" => PackageKind::Link,
            "Directory" => PackageKind::Directory,
            other => PackageKind::Other(other.to_string()),
        }
    }
}

/// Metadata for an installed application, read from its desktop entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    /// Desktop id (file stem); this is the launch name.
    pub name: String,
    /// Untranslated `Name`.
    pub title: String,
    /// Localized `Name[lang]` values keyed by language tag.
    pub titles: HashMap<String, String>,
    /// `Exec` command line.
    pub exec: Option<String>,
    /// Icon name or absolute path.
    pub icon: Option<String>,
    /// Freedesktop categories, in file order.
    pub categories: Vec<String>,
    /// `Hidden=true` or `NoDisplay=true`.
    pub hidden: bool,
    /// `Type`, if present.
    pub kind: Option<PackageKind>,
    /// `StartupWMClass`, used to match windows to packages.
    pub wm_class: Option<String>,
}

impl Package {
    /// Whether this package is a user-facing application.
    pub fn is_application(&self) -> bool {
        matches!(self.kind, None | Some(PackageKind::Application))
    }

    /// Whether a window with this class belongs to this package.
    pub fn matches_class(&self, class: &str) -> bool {
        let class = class.to_lowercase();
        self.wm_class
            .as_deref()
            .is_some_and(|c| c.to_lowercase() == class)
            || self.name.to_lowercase() == class
    }
}

/// Read and parse a desktop file. The desktop id is the file stem.
pub fn parse_desktop_file(path: &Path) -> Option<Package> {
    let content = fs::read_to_string(path).ok()?;
    let id = path.file_stem()?.to_str()?;
    parse_desktop_entry(id, &content)
}

/// Parse the `[Desktop Entry]` group of a desktop file.
///
/// Returns `None` if the entry has no `Name`, or is an application without
/// an `Exec` line.
pub fn parse_desktop_entry(id: &str, content: &str) -> Option<Package> {
    let mut title = None;
    let mut titles = HashMap::new();
    let mut exec = None;
    let mut icon = None;
    let mut categories = Vec::new();
    let mut no_display = false;
    let mut hidden = false;
    let mut kind = None;
    let mut wm_class = None;
    let mut in_desktop_entry = false;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            in_desktop_entry = line == "[Desktop Entry]";
            continue;
        }

        if !in_desktop_entry {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if let Some(lang) = key
            .strip_prefix("Name[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            titles.insert(lang.to_string(), value.to_string());
            continue;
        }

        match key {
            "Name" => title = Some(value.to_string()),
            "Exec" => exec = Some(value.to_string()),
            "Icon" if !value.is_empty() => icon = Some(value.to_string()),
            "Categories" => {
                categories = value
                    .split(';')
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "NoDisplay" => no_display = value == "true",
            "Hidden" => hidden = value == "true",
            "Type" => kind = Some(PackageKind::parse(value)),
            "StartupWMClass" => wm_class = Some(value.to_string()),
            _ => {}
        }
    }

    let package = Package {
        name: id.to_string(),
        title: title?,
        titles,
        exec,
        icon,
        categories,
        hidden: hidden || no_display,
        kind,
        wm_class,
    };

    if package.is_application() && package.exec.is_none() {
        return None;
    }

    Some(package)
}

/// Remove desktop entry field codes (`%f`, `%U`, ...) from an `Exec` line.
pub fn strip_field_codes(exec: &str) -> String {
    let mut out = String::with_capacity(exec.len());
    let mut chars = exec.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some(_) | None => {}
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
