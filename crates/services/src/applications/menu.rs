//! Category tree for the application menu.
//!
//! Built fresh every time the menu opens from the current package list.

use serde::{Deserialize, Serialize};

use super::desktop::Package;
use super::icons::IconRef;
use crate::locale::Locale;

/// Key of the catch-all category.
pub const OTHER_CATEGORY: &str = "other";

/// A configured menu category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Category key, matched case-insensitively against package categories.
    pub key: String,
    /// Translation key for the label.
    pub label: String,
    /// Icon theme name.
    pub icon: Option<String>,
    /// Additional freedesktop categories that map to this one.
    pub aliases: Vec<String>,
}

impl CategoryConfig {
    fn new(key: &str, label: &str, icon: &str, aliases: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            icon: Some(icon.to_string()),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn matches(&self, category: &str) -> bool {
        self.key.eq_ignore_ascii_case(category)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(category))
    }
}

/// The built-in category map, keyed to freedesktop main categories.
pub fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig::new(
            "development",
            "LBL_APP_CAT_DEVELOPMENT",
            "applications-development",
            &["Development"],
        ),
        CategoryConfig::new(
            "science",
            "LBL_APP_CAT_SCIENCE",
            "applications-science",
            &["Science", "Education"],
        ),
        CategoryConfig::new("games", "LBL_APP_CAT_GAMES", "applications-games", &["Game"]),
        CategoryConfig::new(
            "graphics",
            "LBL_APP_CAT_GRAPHICS",
            "applications-graphics",
            &["Graphics"],
        ),
        CategoryConfig::new(
            "network",
            "LBL_APP_CAT_NETWORK",
            "applications-internet",
            &["Network"],
        ),
        CategoryConfig::new(
            "multimedia",
            "LBL_APP_CAT_MULTIMEDIA",
            "applications-multimedia",
            &["AudioVideo", "Audio", "Video"],
        ),
        CategoryConfig::new("office", "LBL_APP_CAT_OFFICE", "applications-office", &["Office"]),
        CategoryConfig::new(
            "system",
            "LBL_APP_CAT_SYSTEM",
            "applications-system",
            &["System", "Settings"],
        ),
        CategoryConfig::new(
            "utilities",
            "LBL_APP_CAT_UTILITIES",
            "applications-utilities",
            &["Utility"],
        ),
        CategoryConfig::new(OTHER_CATEGORY, "LBL_APP_CAT_OTHER", "applications-other", &[]),
    ]
}

/// A launchable leaf in the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub icon: IconRef,
    pub label: String,
    /// Package name passed to the launch request.
    pub name: String,
}

/// A top-level menu group.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub key: String,
    pub icon: IconRef,
    pub label: String,
    pub items: Vec<MenuEntry>,
}

/// Key of the configured category a package belongs to.
fn category_key<'c>(package: &Package, categories: &'c [CategoryConfig]) -> &'c str {
    categories
        .iter()
        .find(|c| package.categories.iter().any(|pc| c.matches(pc)))
        .map(|c| c.key.as_str())
        .unwrap_or(OTHER_CATEGORY)
}

/// Group visible packages into categories.
///
/// Categories keep configuration order and empty ones are dropped. Entries
/// are sorted case-insensitively by their translated label. Every visible
/// package lands in exactly one category; unmatched packages go to
/// [`OTHER_CATEGORY`], which exists even when it is not configured.
pub fn build_tree(
    packages: &[Package],
    categories: &[CategoryConfig],
    locale: &Locale,
) -> Vec<Category> {
    let mut configs: Vec<CategoryConfig> = categories.to_vec();
    if !configs.iter().any(|c| c.key == OTHER_CATEGORY) {
        configs.push(CategoryConfig {
            key: OTHER_CATEGORY.to_string(),
            label: "LBL_APP_CAT_OTHER".to_string(),
            ..Default::default()
        });
    }

    let mut tree: Vec<Category> = configs
        .iter()
        .map(|c| Category {
            key: c.key.clone(),
            icon: IconRef::resolve(c.icon.as_deref()),
            label: locale.translate(&c.label),
            items: Vec::new(),
        })
        .collect();

    for package in packages.iter().filter(|p| !p.hidden) {
        let key = category_key(package, &configs);
        let Some(category) = tree.iter_mut().find(|c| c.key == key) else {
            continue;
        };
        category.items.push(MenuEntry {
            icon: IconRef::resolve(package.icon.as_deref()),
            label: locale.translatable_flat(&package.titles, &package.title),
            name: package.name.clone(),
        });
    }

    tree.retain(|c| !c.items.is_empty());
    for category in &mut tree {
        category.items.sort_by_cached_key(|e| e.label.to_lowercase());
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn package(name: &str, title: &str, categories: &[&str]) -> Package {
        Package {
            name: name.to_string(),
            title: title.to_string(),
            titles: HashMap::new(),
            exec: Some(name.to_string()),
            icon: None,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            hidden: false,
            kind: None,
            wm_class: None,
        }
    }

    fn config(key: &str) -> CategoryConfig {
        CategoryConfig {
            key: key.to_string(),
            label: key.to_uppercase(),
            ..Default::default()
        }
    }

    #[test]
    fn test_two_packages_two_categories() {
        let packages = vec![package("a", "a", &["x"]), package("b", "b", &["y"])];
        let tree = build_tree(&packages, &[config("x"), config("y")], &Locale::default());

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].key, "x");
        assert_eq!(tree[0].items.len(), 1);
        assert_eq!(tree[0].items[0].name, "a");
        assert_eq!(tree[1].key, "y");
        assert_eq!(tree[1].items[0].name, "b");
    }

    #[test]
    fn test_unmatched_goes_to_other() {
        let packages = vec![package("a", "A", &["Nope"]), package("b", "B", &[])];
        let tree = build_tree(&packages, &[config("x")], &Locale::default());

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].key, OTHER_CATEGORY);
        assert_eq!(tree[0].label, "Other");
        assert_eq!(tree[0].items.len(), 2);
        assert!(tree[0].icon.is_fallback());
    }

    #[test]
    fn test_every_visible_package_in_exactly_one_bucket() {
        let mut packages = vec![
            package("gimp", "GIMP", &["Graphics", "2DGraphics"]),
            package("code", "Code", &["Development", "IDE"]),
            package("vlc", "VLC", &["AudioVideo", "Player"]),
            package("tool", "Tool", &["Utility", "Development"]),
            package("misc", "Misc", &["Whatever"]),
        ];
        let mut hidden = package("hidden", "Hidden", &["Development"]);
        hidden.hidden = true;
        packages.push(hidden);

        let tree = build_tree(&packages, &default_categories(), &Locale::default());
        let mut names: Vec<&str> = tree
            .iter()
            .flat_map(|c| c.items.iter().map(|e| e.name.as_str()))
            .collect();
        names.sort_unstable();

        assert_eq!(names, vec!["code", "gimp", "misc", "tool", "vlc"]);
    }

    #[test]
    fn test_first_configured_category_wins() {
        let locale = Locale::default();
        for categories in [["Utility", "Development"], ["Development", "Utility"]] {
            let packages = vec![package("tool", "Tool", &categories)];
            let tree = build_tree(&packages, &default_categories(), &locale);
            assert_eq!(tree.len(), 1);
            assert_eq!(tree[0].key, "development");
        }
    }

    #[test]
    fn test_items_sorted_case_insensitively() {
        let packages = vec![
            package("c", "charlie", &["x"]),
            package("a", "Bravo", &["x"]),
            package("b", "alpha", &["x"]),
        ];
        let tree = build_tree(&packages, &[config("x")], &Locale::default());
        let labels: Vec<&str> = tree[0].items.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["alpha", "Bravo", "charlie"]);
    }

    #[test]
    fn test_labels_are_translated() {
        let mut calc = package("calc", "Calculator", &["Utility"]);
        calc.titles.insert("de".into(), "Rechner".into());

        let tree = build_tree(&[calc], &default_categories(), &Locale::new("de_DE"));
        assert_eq!(tree[0].label, "Zubehör");
        assert_eq!(tree[0].items[0].label, "Rechner");
    }
}
