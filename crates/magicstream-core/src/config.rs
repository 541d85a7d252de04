//! Application configuration management.
//!
//! This module handles loading and saving the client configuration,
//! which includes the API base URL, the last signed-in email, and an
//! optional data directory override.
//!
//! Configuration is stored at `~/.config/magicstream/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "magicstream";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the configured API base URL
pub const API_URL_ENV: &str = "MAGICSTREAM_API_URL";

/// API origin used when neither the environment nor the config sets one
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_email: Option<String>,
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Resolve the API origin: environment variable, then config, then the
    /// local development default
    pub fn base_url(&self) -> String {
        self.resolve_base_url(std::env::var(API_URL_ENV).ok().as_deref())
    }

    fn resolve_base_url(&self, env_override: Option<&str>) -> String {
        if let Some(url) = env_override {
            if !url.is_empty() {
                return url.to_string();
            }
        }
        self.api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    /// Directory holding the session snapshot and logs
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_resolution() {
        // Overrides passed explicitly: the test must not touch the
        // process-global environment
        let config = Config::default();
        assert_eq!(config.resolve_base_url(None), "http://localhost:8080");

        let config = Config {
            api_base_url: Some("https://api.magicstream.example".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_base_url(None),
            "https://api.magicstream.example"
        );

        // Environment wins over config; an empty value is ignored
        assert_eq!(
            config.resolve_base_url(Some("http://staging.magicstream.example")),
            "http://staging.magicstream.example"
        );
        assert_eq!(
            config.resolve_base_url(Some("")),
            "https://api.magicstream.example"
        );
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/magicstream-test")),
            ..Config::default()
        };
        assert_eq!(
            config.data_dir().unwrap(),
            PathBuf::from("/tmp/magicstream-test")
        );
        assert_eq!(
            config.log_dir().unwrap(),
            PathBuf::from("/tmp/magicstream-test/logs")
        );
    }
}
