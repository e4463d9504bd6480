//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable that switches the search service to live data.
pub const USE_LIVE_DATA_ENV: &str = "HOTELMATCH_USE_LIVE_DATA";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Live search API settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Response cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Demo dataset location
    #[serde(default)]
    pub data: DataConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply environment overrides on top of file values.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable lookup.
    ///
    /// Live data is on only when the variable is exactly `"true"`. An unset
    /// variable leaves the file value alone.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(USE_LIVE_DATA_ENV) {
            self.search.use_live_data = value == "true";
        }
    }

    /// Resolve the demo dataset path against a base directory.
    pub fn demo_path(&self, base_path: &Path) -> PathBuf {
        base_path.join(&self.data.demo_file)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.search.hosts.is_empty() {
            return Err(AppError::validation("search.hosts is empty"));
        }
        if let Some(host) = self.search.hosts.iter().find(|h| url::Url::parse(h).is_err()) {
            return Err(AppError::validation(format!(
                "search.hosts contains an invalid URL: {host}"
            )));
        }
        if self.search.index_name.trim().is_empty() {
            return Err(AppError::validation("search.index_name is empty"));
        }
        if self.search.host_timeout_ms == 0 {
            return Err(AppError::validation("search.host_timeout_ms must be > 0"));
        }
        if self.search.hits_per_page == 0 {
            return Err(AppError::validation("search.hits_per_page must be > 0"));
        }
        if self.cache.max_entries == 0 {
            return Err(AppError::validation("cache.max_entries must be > 0"));
        }
        if self.data.demo_file.as_os_str().is_empty() {
            return Err(AppError::validation("data.demo_file is empty"));
        }
        Ok(())
    }
}

/// Hosted search API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Query endpoints, tried in order
    #[serde(default = "defaults::hosts")]
    pub hosts: Vec<String>,

    /// Index to query
    #[serde(default = "defaults::index_name")]
    pub index_name: String,

    /// Application id header value
    #[serde(default = "defaults::application_id")]
    pub application_id: String,

    /// Public search key header value
    #[serde(default = "defaults::api_key")]
    pub api_key: String,

    /// Agent header value
    #[serde(default = "defaults::agent")]
    pub agent: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-host timeout in milliseconds
    #[serde(default = "defaults::host_timeout_ms")]
    pub host_timeout_ms: u64,

    /// Query the live API instead of the demo dataset
    #[serde(default)]
    pub use_live_data: bool,

    /// Default page size
    #[serde(default = "defaults::hits_per_page")]
    pub hits_per_page: usize,
}

impl SearchConfig {
    pub fn host_timeout(&self) -> Duration {
        Duration::from_millis(self.host_timeout_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hosts: defaults::hosts(),
            index_name: defaults::index_name(),
            application_id: defaults::application_id(),
            api_key: defaults::api_key(),
            agent: defaults::agent(),
            user_agent: defaults::user_agent(),
            host_timeout_ms: defaults::host_timeout_ms(),
            use_live_data: false,
            hits_per_page: defaults::hits_per_page(),
        }
    }
}

/// Response cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry lifetime in seconds
    #[serde(default = "defaults::cache_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of cached responses
    #[serde(default = "defaults::cache_max_entries")]
    pub max_entries: usize,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::cache_ttl_secs(),
            max_entries: defaults::cache_max_entries(),
        }
    }
}

/// Demo dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path of the demo listings file, relative to the data directory
    #[serde(default = "defaults::demo_file")]
    pub demo_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            demo_file: defaults::demo_file(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Search defaults
    pub fn hosts() -> Vec<String> {
        vec![
            "https://ll8iz711cs-dsn.algolia.net/1/indexes/*/queries".into(),
            "https://5b970b39b22a4ff1b99e5167696eef3f-dsn.algolia.net/1/indexes/*/queries".into(),
        ]
    }
    pub fn index_name() -> String {
        "bayut-sa-production-ads-city-level-score-ar".into()
    }
    pub fn application_id() -> String {
        "LL8IZ711CS".into()
    }
    pub fn api_key() -> String {
        "5b970b39b22a4ff1b99e5167696eef3f".into()
    }
    pub fn agent() -> String {
        "Algolia for JavaScript (3.35.1); Browser (lite)".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; hotelmatch/0.1)".into()
    }
    pub fn host_timeout_ms() -> u64 {
        6_000
    }
    pub fn hits_per_page() -> usize {
        8
    }

    // Cache defaults
    pub fn cache_ttl_secs() -> u64 {
        10 * 60
    }
    pub fn cache_max_entries() -> usize {
        50
    }

    // Data defaults
    pub fn demo_file() -> PathBuf {
        PathBuf::from("hotels.demo.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_hosts() {
        let mut config = Config::default();
        config.search.hosts.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_invalid_host_url() {
        let mut config = Config::default();
        config.search.hosts.push("not a url".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.search.hits_per_page = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_cache_size() {
        let mut config = Config::default();
        config.cache.max_entries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [search]
            use_live_data = true
            host_timeout_ms = 2500

            [cache]
            max_entries = 5
            "#,
        )
        .unwrap();

        assert!(config.search.use_live_data);
        assert_eq!(config.search.host_timeout(), Duration::from_millis(2500));
        assert_eq!(config.search.hosts.len(), 2);
        assert_eq!(config.cache.max_entries, 5);
        assert_eq!(config.cache.ttl_secs, 600);
        assert_eq!(config.data.demo_file, PathBuf::from("hotels.demo.json"));
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("definitely/not/here.toml");
        assert_eq!(config.search.hits_per_page, 8);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[data]\ndemo_file = \"custom.json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.demo_path(Path::new("/srv")),
            PathBuf::from("/srv/custom.json")
        );
    }

    #[test]
    fn bundled_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/config.toml");
        let config = Config::load(path).unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.search.use_live_data);
    }

    #[test]
    fn live_data_override() {
        let only = |value: &'static str| {
            move |name: &str| (name == USE_LIVE_DATA_ENV).then(|| value.to_string())
        };

        let mut config = Config::default();
        config.apply_overrides(only("true"));
        assert!(config.search.use_live_data);

        config.apply_overrides(only("TRUE"));
        assert!(!config.search.use_live_data);

        config.search.use_live_data = true;
        config.apply_overrides(|_| None);
        assert!(config.search.use_live_data, "unset variable keeps file value");

        config.apply_overrides(only("1"));
        assert!(!config.search.use_live_data);
    }
}
