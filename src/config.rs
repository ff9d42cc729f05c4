//! Configuration
//!
//! Settings come from `<config_dir>/ball-scout/config.toml`, then the
//! `SCOUTING_APP_URL` environment variable, then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_FPS, DEFAULT_SEEK_STEP_SECONDS, DEFAULT_SERVER_ADDR,
    DEFAULT_USER_ID, SCOUTING_API_URL_ENV,
};
use crate::error::Result;

/// Default location of the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Default folder for saved sessions.
pub fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join("store")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Base URL of the remote scouting API
    pub scouting_api_url: Option<String>,
    /// Folder holding the JSON document store
    pub store_dir: PathBuf,
    /// Frame rate used for frame stepping
    pub fps: f64,
    pub seek_step_seconds: f64,
    /// Listen address for `serve`
    pub server_addr: String,
    /// Identifier stamped on saved metadata
    pub user_id: String,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            scouting_api_url: None,
            store_dir: default_store_dir(),
            fps: DEFAULT_FPS,
            seek_step_seconds: DEFAULT_SEEK_STEP_SECONDS,
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl ScoutConfig {
    /// Read a config file; a missing file yields defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let config: ScoutConfig = toml::from_str(&text)?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// File (explicit path or the default location) plus environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_file(&config_path())?,
        };
        Ok(config.with_api_url_override(std::env::var(SCOUTING_API_URL_ENV).ok()))
    }

    /// Replace the API URL when `url` is a non-empty value.
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|url| !url.trim().is_empty()) {
            self.scouting_api_url = Some(url);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = ScoutConfig::from_file(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ScoutConfig::default());
        assert_eq!(config.fps, 30.0);
        assert_eq!(config.user_id, "local");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "scouting_api_url = \"https://scout.example.com\"\nfps = 60.0\nstore_dir = \"/tmp/scout\"\n",
        )
        .unwrap();
        let config = ScoutConfig::from_file(&path).unwrap();
        assert_eq!(config.scouting_api_url.as_deref(), Some("https://scout.example.com"));
        assert_eq!(config.fps, 60.0);
        assert_eq!(config.store_dir, PathBuf::from("/tmp/scout"));
        assert_eq!(config.seek_step_seconds, 5.0);
        assert_eq!(config.server_addr, "127.0.0.1:8787");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "fps = \"fast\"").unwrap();
        let err = ScoutConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, crate::error::ScoutError::Config(_)));
    }

    #[test]
    fn test_env_override() {
        let config = ScoutConfig::default().with_api_url_override(Some("https://env.example".to_string()));
        assert_eq!(config.scouting_api_url.as_deref(), Some("https://env.example"));
        let config = config.with_api_url_override(Some("  ".to_string()));
        assert_eq!(config.scouting_api_url.as_deref(), Some("https://env.example"));
        let config = config.with_api_url_override(None);
        assert_eq!(config.scouting_api_url.as_deref(), Some("https://env.example"));
    }
}
