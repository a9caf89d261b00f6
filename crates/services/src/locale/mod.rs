//! Locale service: key translation and per-language title maps.
//!
//! Lookups fall back from the exact language tag (`de_DE`) to any tag with
//! the same base language (`de`, `de_AT`), then to [`DEFAULT_LANGUAGE`].

mod catalog;

use std::collections::HashMap;

use tracing::debug;

/// Language used when nothing else matches.
pub const DEFAULT_LANGUAGE: &str = "en_EN";

/// Translation tables keyed by language tag, then by message key.
pub type Catalogs = HashMap<String, HashMap<String, String>>;

/// Active language and translation helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    language: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl Locale {
    pub fn new(language: impl AsRef<str>) -> Self {
        Self {
            language: normalize(language.as_ref()),
        }
    }

    /// Use the configured language, or the process environment.
    pub fn resolve(configured: Option<&str>) -> Self {
        let locale = configured
            .filter(|l| !l.trim().is_empty())
            .map(Self::new)
            .unwrap_or_else(Self::from_env);
        debug!("Using locale {}", locale.language);
        locale
    }

    /// Read `LC_ALL`, `LC_MESSAGES` or `LANG`.
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translate a key from the built-in catalogs.
    pub fn translate(&self, key: &str) -> String {
        self.lookup_in(&catalog::BUILTIN, key)
            .unwrap_or_else(|| key.to_string())
    }

    /// Translate a key and substitute `{0}`, `{1}`, ... with `args`.
    pub fn translate_with(&self, key: &str, args: &[&str]) -> String {
        format_args_into(self.translate(key), args)
    }

    /// Build a lookup function over caller-supplied catalogs.
    ///
    /// Keys missing from `catalogs` fall back to the built-in catalogs, then
    /// to the key itself.
    pub fn translatable<'a>(&'a self, catalogs: &'a Catalogs) -> impl Fn(&str) -> String + 'a {
        move |key| {
            self.lookup_in(catalogs, key)
                .unwrap_or_else(|| self.translate(key))
        }
    }

    /// Pick the title for the active language from a title map.
    pub fn translatable_flat(&self, titles: &HashMap<String, String>, fallback: &str) -> String {
        pick(titles, &self.language)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }

    fn lookup_in(&self, catalogs: &Catalogs, key: &str) -> Option<String> {
        pick(catalogs, &self.language)
            .and_then(|table| table.get(key))
            .or_else(|| catalogs.get(DEFAULT_LANGUAGE).and_then(|t| t.get(key)))
            .cloned()
    }
}

/// Strip encoding and modifier from a POSIX locale (`de_DE.UTF-8@euro`).
fn normalize(raw: &str) -> String {
    let tag = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    match tag {
        "" | "C" | "POSIX" => DEFAULT_LANGUAGE.to_string(),
        other => other.replace('-', "_"),
    }
}

fn base_language(tag: &str) -> &str {
    tag.split('_').next().unwrap_or(tag)
}

/// Exact tag, then bare base language, then any tag sharing the base.
fn pick<'m, V>(map: &'m HashMap<String, V>, language: &str) -> Option<&'m V> {
    if let Some(value) = map.get(language) {
        return Some(value);
    }

    let base = base_language(language);
    if let Some(value) = map.get(base) {
        return Some(value);
    }

    let mut candidates: Vec<_> = map
        .iter()
        .filter(|(tag, _)| base_language(tag) == base)
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(b.0));
    candidates.first().map(|(_, value)| *value)
}

fn format_args_into(template: String, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(template, |acc, (i, arg)| acc.replace(&format!("{{{i}}}"), arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_posix_locale() {
        assert_eq!(Locale::new("de_DE.UTF-8").language(), "de_DE");
        assert_eq!(Locale::new("sr_RS@latin").language(), "sr_RS");
        assert_eq!(Locale::new("C").language(), DEFAULT_LANGUAGE);
        assert_eq!(Locale::new("nb-NO").language(), "nb_NO");
    }

    #[test]
    fn test_translate_fallback_chain() {
        assert_eq!(Locale::new("de_DE").translate("LBL_MENU"), "Menü");
        // Base language match.
        assert_eq!(Locale::new("de_AT").translate("LBL_MENU"), "Menü");
        // Unknown language falls back to English.
        assert_eq!(Locale::new("fi_FI").translate("LBL_MENU"), "Menu");
        // Unknown key is returned as-is.
        assert_eq!(Locale::new("de_DE").translate("LBL_NOPE"), "LBL_NOPE");
    }

    #[test]
    fn test_translate_with_arguments() {
        let locale = Locale::new("en_EN");
        assert_eq!(
            locale.translate_with("LBL_LAUNCHING", &["calculator"]),
            "Launching 'calculator'"
        );
    }

    #[test]
    fn test_translatable_custom_catalogs() {
        let mut catalogs = Catalogs::new();
        catalogs.insert(
            "nb_NO".into(),
            HashMap::from([("GREETING".to_string(), "Hei".to_string())]),
        );
        catalogs.insert(
            "en_EN".into(),
            HashMap::from([("GREETING".to_string(), "Hello".to_string())]),
        );

        let nb = Locale::new("nb_NO");
        let tr = nb.translatable(&catalogs);
        assert_eq!(tr("GREETING"), "Hei");
        assert_eq!(tr("LBL_MENU"), "Meny");

        let fr = Locale::new("fr_FR");
        assert_eq!(fr.translatable(&catalogs)("GREETING"), "Hello");
    }

    #[test]
    fn test_translatable_flat() {
        let titles = HashMap::from([
            ("de".to_string(), "Rechner".to_string()),
            ("nb_NO".to_string(), "Kalkulator".to_string()),
        ]);

        assert_eq!(Locale::new("de_DE").translatable_flat(&titles, "Calculator"), "Rechner");
        assert_eq!(Locale::new("nb_NO").translatable_flat(&titles, "Calculator"), "Kalkulator");
        assert_eq!(Locale::new("en_US").translatable_flat(&titles, "Calculator"), "Calculator");
    }
}
