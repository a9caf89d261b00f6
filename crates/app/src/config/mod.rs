//! Application configuration stored as a GPUI global.

mod persistence;

use gpui::{App, Global};
use serde::{Deserialize, Serialize};
use services::{CategoryConfig, FileWatcher, Locale, default_categories};

use crate::bar::config::BarConfig;
pub use crate::bar::config::BarPosition;
use crate::state::AppState;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bar: BarConfig,
    pub applications: ApplicationsConfig,
    pub locale: LocaleConfig,
    /// Watch config.toml for changes and hot-reload (requires restart to change).
    pub watch_config: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bar: BarConfig::default(),
            applications: ApplicationsConfig::default(),
            locale: LocaleConfig::default(),
            watch_config: true,
        }
    }
}

/// Application menu grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationsConfig {
    /// Menu categories in display order. Unmatched applications go to `other`.
    pub categories: Vec<CategoryConfig>,
}

impl Default for ApplicationsConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Language tag such as `de_DE`. Falls back to `LC_ALL`/`LC_MESSAGES`/`LANG`.
    pub language: Option<String>,
}

impl LocaleConfig {
    pub fn resolve(&self) -> Locale {
        Locale::resolve(self.language.as_deref())
    }
}

impl Global for Config {}

impl Config {
    /// Initialize the global config.
    pub fn init(cx: &mut App) {
        let config = match persistence::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", err);
                Config::default()
            }
        };

        cx.set_global(config);
        Self::start_hot_reload(cx);
    }

    /// Get the global config.
    #[inline(always)]
    pub fn global(cx: &App) -> &Config {
        cx.global::<Config>()
    }

    /// Replace the global config.
    fn replace(config: Config, cx: &mut App) {
        *cx.global_mut::<Config>() = config;
        AppState::refresh_locale(cx);
    }

    /// Reload config from disk and replace the global config.
    pub fn reload(cx: &mut App) {
        match persistence::load() {
            Ok(config) => Self::replace(config, cx),
            Err(err) => tracing::warn!("Failed to reload config from disk: {:#}", err),
        }
    }

    fn start_hot_reload(cx: &mut App) {
        if !cx.global::<Config>().watch_config {
            return;
        }

        let config_path = match persistence::config_path() {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!("Failed to determine config path for hot reload: {:#}", err);
                return;
            }
        };

        let mut rx = FileWatcher::watch(config_path);

        cx.spawn(async move |cx| {
            while rx.recv().await.is_some() {
                cx.update(|cx| {
                    tracing::info!("Config file changed, reloading");
                    Config::reload(cx);
                    cx.refresh_windows();
                });
            }
        })
        .detach();
    }
}

/// Trait for accessing active app configuration from `App`.
pub trait ActiveConfig {
    fn config(&self) -> &Config;
}

impl ActiveConfig for App {
    #[inline(always)]
    fn config(&self) -> &Config {
        Config::global(self)
    }
}
