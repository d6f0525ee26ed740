//! Configuration management for ccloud
//!
//! Handles config file loading/saving and environment overrides.
//! Config is stored at ~/.config/ccloud/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::ccloud::DEFAULT_BASE_URL;
use crate::api::CcloudClient;
use crate::eligibility::{TitleEligibility, TitlePolicy};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API root (defaults to the public endpoint)
    pub base_url: Option<String>,
    /// Catalog API key
    pub api_key: Option<String>,
    /// Which titles are shown
    pub title_filter: TitlePolicy,
    /// HTTP timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Get config file path (~/.config/ccloud/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ccloud").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| Self::load_from(&p).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to an explicit file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// API root with fallback chain:
    /// 1. Environment variable CCLOUD_BASE_URL
    /// 2. Config file
    /// 3. Public endpoint
    pub fn base_url(&self) -> String {
        std::env::var("CCLOUD_BASE_URL")
            .ok()
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// API key from CCLOUD_API_KEY, then the config file
    pub fn api_key(&self) -> Option<String> {
        std::env::var("CCLOUD_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(30))
    }

    /// Catalog client built from this config
    pub fn client(&self) -> Result<CcloudClient> {
        let api_key = self
            .api_key()
            .context("No API key configured (set CCLOUD_API_KEY or api_key in config.toml)")?;
        Ok(CcloudClient::with_timeout(
            api_key,
            self.base_url(),
            self.timeout(),
        ))
    }

    pub fn eligibility(&self) -> Arc<dyn TitleEligibility> {
        Arc::from(self.title_filter.build())
    }
}
