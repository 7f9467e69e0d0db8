//! Configuration types for appfind.
//!
//! [`Config::load`] reads `~/.config/appfind/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::types::{Entity, Query};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[api]
base_url     = "https://itunes.apple.com"
timeout_secs = 15
limit        = 50

[search]
country = "us"
entity  = "software"

[ui]
detail_pane_width_pct = 45
show_prices           = true
theme                 = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/appfind/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[api]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of results requested per search (the API caps at 200).
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_base_url() -> String { "https://itunes.apple.com".to_string() }
fn default_timeout_secs() -> u64 { 15 }
fn default_limit() -> u32 { 50 }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            limit: default_limit(),
        }
    }
}

/// `[search]` section of `config.toml`: the filters a session starts with.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_entity")]
    pub entity: String,
}

fn default_country() -> String { "us".to_string() }
fn default_entity() -> String { "software".to_string() }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            entity: default_entity(),
        }
    }
}

impl SearchConfig {
    /// Starting query for a session. An unparseable entity falls back to the
    /// default with a warning rather than failing startup.
    pub fn initial_query(&self) -> Query {
        let entity = self.entity.parse::<Entity>().unwrap_or_else(|err| {
            tracing::warn!(%err, "config: ignoring [search].entity");
            Entity::default()
        });
        Query::new("", self.country.trim().to_ascii_lowercase(), entity)
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_detail_pane_width_pct")]
    pub detail_pane_width_pct: u16,
    #[serde(default = "default_show_prices")]
    pub show_prices: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_detail_pane_width_pct() -> u16 { 45 }
fn default_show_prices() -> bool { true }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            detail_pane_width_pct: default_detail_pane_width_pct(),
            show_prices: default_show_prices(),
            theme: default_theme(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/appfind/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit file layered on top of the built-in defaults. A
    /// missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("appfind")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.api.base_url, "https://itunes.apple.com");
        assert_eq!(cfg.api.limit, 50);
        assert_eq!(cfg.search.country, "us");
        assert_eq!(cfg.ui.detail_pane_width_pct, 45);
        assert!(cfg.ui.show_prices);
    }

    #[test]
    fn file_overrides_layer_on_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\ncountry = \"JP\"\nentity = \"mac\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.api.timeout_secs, 15);
        assert_eq!(
            cfg.search.initial_query(),
            Query::new("", "jp", Entity::MacSoftware)
        );
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.api.limit, 50);
    }

    #[test]
    fn bad_entity_falls_back_to_default() {
        let search = SearchConfig {
            country: "us".into(),
            entity: "ebook".into(),
        };
        assert_eq!(search.initial_query().entity, Entity::Software);
    }
}
