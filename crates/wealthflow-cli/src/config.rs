//! Front-end configuration.
//!
//! Holds the API base URL and the last email used to sign in, stored at
//! `~/.config/wealthflow/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wealthflow_core::config::API_URL_ENV;
use wealthflow_core::ClientConfig;

/// Application name used for config directory paths
const APP_NAME: &str = "wealthflow";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
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

    /// Client settings, in priority order: command line, environment, config file.
    pub fn client_config(&self, api_url: Option<&str>) -> ClientConfig {
        let env_url = std::env::var(API_URL_ENV).ok();
        self.resolve_client_config(api_url, env_url.as_deref())
    }

    /// Blank values at any level fall through to the next one.
    fn resolve_client_config(&self, api_url: Option<&str>, env_url: Option<&str>) -> ClientConfig {
        [api_url, env_url, self.api_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .map(ClientConfig::new)
            .unwrap_or_default()
    }
}
