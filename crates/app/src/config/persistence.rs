use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};

use super::Config;

const APP_DIR: &str = "deskpanel";
const CONFIG_FILE: &str = "config.toml";

fn default_config_path() -> anyhow::Result<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join(APP_DIR).join(CONFIG_FILE));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILE));
    }

    Err(anyhow!(
        "Unable to determine config path (XDG_CONFIG_HOME/HOME not set)"
    ))
}

pub fn config_path() -> anyhow::Result<PathBuf> {
    default_config_path()
}

/// Load the config, writing the defaults on first run.
pub fn load() -> anyhow::Result<Config> {
    load_from(&default_config_path()?)
}

fn load_from(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        let config = Config::default();
        save_to(&config, path)?;
        return Ok(config);
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse(&raw).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn parse(raw: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str::<Config>(raw)?)
}

fn save_to(config: &Config, path: &Path) -> anyhow::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        anyhow!(
            "Invalid config path has no parent directory: {}",
            path.display()
        )
    })?;
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;

    let encoded = toml::to_string_pretty(config).context("Failed to encode config as TOML")?;
    fs::write(path, encoded)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BarPosition;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse(
            r#"
            [bar]
            position = "bottom"

            [locale]
            language = "de_DE"
            "#,
        )
        .unwrap();

        assert_eq!(config.bar.position, BarPosition::Bottom);
        assert_eq!(config.locale.language.as_deref(), Some("de_DE"));
        assert_eq!(
            config.applications.categories,
            services::default_categories()
        );
        assert!(config.watch_config);
    }

    #[test]
    fn test_custom_categories_replace_builtin_map() {
        let config = parse(
            r#"
            [[applications.categories]]
            key = "x"
            label = "LBL_X"

            [[applications.categories]]
            key = "y"
            label = "LBL_Y"
            aliases = ["Office"]
            "#,
        )
        .unwrap();

        let keys: Vec<_> = config
            .applications
            .categories
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(keys, ["x", "y"]);
        assert_eq!(config.applications.categories[1].aliases, ["Office"]);
        assert_eq!(config.applications.categories[0].icon, None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(parse("bar = 3").is_err());
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("deskpanel-config-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE);
        let _ = fs::remove_dir_all(&dir);

        let config = load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.bar.position, Config::default().bar.position);

        let reloaded = load_from(&path).unwrap();
        assert_eq!(
            reloaded.applications.categories,
            config.applications.categories
        );

        let _ = fs::remove_dir_all(&dir);
    }
}
