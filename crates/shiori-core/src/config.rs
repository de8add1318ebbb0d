use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::AudioType;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub api: ApiConfig,
    pub home: HomeConfig,
    pub search: SearchConfig,
    pub player: PlayerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the backend serving `/api/...`.
    pub base_url: String,
    /// Origin of the artwork mappings service.
    pub artwork_url: String,
    /// Suggestion route; `{query}` is replaced by the encoded query, otherwise
    /// the query is appended as `?q=`.
    pub suggestions_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeConfig {
    pub hero_interval_secs: u64,
    pub recent_limit: usize,
    pub tab_limit: usize,
    pub sidebar_limit: usize,
    pub vertical_limit: usize,
    pub recently_aired_limit: usize,
}

impl HomeConfig {
    pub fn hero_interval(&self) -> Duration {
        Duration::from_secs(self.hero_interval_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub min_query_len: usize,
    pub skeleton_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub default_server: String,
    pub default_type: AudioType,
}

impl SiteConfig {
    /// Load config: explicit path, else user file (if it exists), else built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let config = match path {
            Some(path) => Self::read(path)?,
            None => {
                let user_path = Self::config_path();
                if user_path.exists() {
                    Self::read(&user_path)?
                } else {
                    Self::parse(DEFAULT_CONFIG)?
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, CoreError> {
        toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))
    }

    fn read(path: &Path) -> Result<Self, CoreError> {
        tracing::debug!(path = %path.display(), "Reading config file");
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn validate(&self) -> Result<(), CoreError> {
        if !(1..=60).contains(&self.home.hero_interval_secs) {
            return Err(CoreError::Config(format!(
                "home.hero_interval_secs must be between 1 and 60, got {}",
                self.home.hero_interval_secs
            )));
        }
        if self.search.min_query_len == 0 {
            return Err(CoreError::Config("search.min_query_len must be at least 1".into()));
        }
        url::Url::parse(&self.api.base_url)
            .map_err(|e| CoreError::Config(format!("api.base_url: {e}")))?;
        url::Url::parse(&self.api.artwork_url)
            .map_err(|e| CoreError::Config(format!("api.artwork_url: {e}")))?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "shiori")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = SiteConfig::default();
        assert_eq!(config.home.hero_interval_secs, 6);
        assert_eq!(config.home.recent_limit, 12);
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.player.default_server, "hd-1");
        assert_eq!(config.player.default_type, AudioType::Sub);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = SiteConfig::default();
        config.api.base_url = "https://anime.example".into();
        config.home.hero_interval_secs = 11;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = SiteConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.api.base_url, "https://anime.example");
        assert_eq!(loaded.home.hero_interval(), Duration::from_secs(11));
    }

    #[test]
    fn test_rejects_out_of_range_interval() {
        let mut config = SiteConfig::default();
        config.home.hero_interval_secs = 0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SiteConfig::load(Some(Path::new("/nonexistent/shiori.toml"))).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
