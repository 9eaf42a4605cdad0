//! Configuration management for kirkedata
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (KIRKE_*)
//! 3. Config file (~/.config/kirke/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default URL of the sogn.dk church directory feed
pub const DEFAULT_FEED_URL: &str = "http://sogn.dk/xmlfeeds/kirker.php";

/// Default path for the unattended post-scrape backup
pub const DEFAULT_BACKUP_PATH: &str = "kirker_backup.xlsx";

/// Feed-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    /// URL of the church directory XML feed
    pub url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
        }
    }
}

/// Staff-scraper configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Pacing delay between successive church pages
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Path used for the unattended post-scrape backup workbook
    pub backup_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            backup_path: PathBuf::from(DEFAULT_BACKUP_PATH),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Feed configuration
    pub feed: FeedConfig,
    /// Scraper configuration
    pub scrape: ScrapeConfig,
    /// Export configuration
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/kirke/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kirke").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - KIRKE_FEED_URL: URL of the church directory feed
    /// - KIRKE_SCRAPE_DELAY: pacing delay, humantime format (e.g. "500ms")
    /// - KIRKE_BACKUP_PATH: path of the unattended backup workbook
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("KIRKE_FEED_URL") {
            self.feed.url = url;
        }

        if let Ok(delay) = std::env::var("KIRKE_SCRAPE_DELAY") {
            self.scrape.delay = humantime::parse_duration(&delay)
                .map_err(|e| Error::Config(format!("Invalid KIRKE_SCRAPE_DELAY: {}", e)))?;
        }

        if let Ok(path) = std::env::var("KIRKE_BACKUP_PATH") {
            self.export.backup_path = PathBuf::from(path);
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, feed_url: Option<String>) -> Self {
        if let Some(url) = feed_url {
            self.feed.url = url;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(feed_url: Option<String>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()?
            .with_cli_overrides(feed_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.feed.url, DEFAULT_FEED_URL);
        assert_eq!(config.scrape.delay, Duration::from_millis(500));
        assert_eq!(config.export.backup_path, PathBuf::from(DEFAULT_BACKUP_PATH));
    }

    #[test]
    fn test_cli_overrides() {
        let config =
            Config::default().with_cli_overrides(Some("http://example.test/feed".to_string()));

        assert_eq!(config.feed.url, "http://example.test/feed");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[feed]
url = "http://localhost:8080/kirker.php"

[scrape]
delay = "2s"

[export]
backup_path = "/tmp/kirker.xlsx"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.feed.url, "http://localhost:8080/kirker.php");
        assert_eq!(config.scrape.delay, Duration::from_secs(2));
        assert_eq!(config.export.backup_path, PathBuf::from("/tmp/kirker.xlsx"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scrape]\ndelay = \"250ms\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.scrape.delay, Duration::from_millis(250));
        // Untouched sections fall back to defaults
        assert_eq!(config.feed.url, DEFAULT_FEED_URL);
    }

    #[test]
    fn test_invalid_toml() {
        let result: std::result::Result<Config, _> = toml::from_str("feed = 3");
        assert!(result.is_err());
    }
}
