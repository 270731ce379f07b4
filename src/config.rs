//! Configuration management for FlixTUI
//!
//! Handles config file loading/saving and API key lookup.
//! Config is stored at ~/.config/flixtui/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::TmdbClient;
use crate::store::FileStorage;

/// Environment variable consulted before the config file
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v3 API key
    pub tmdb_api_key: Option<String>,
    /// Where watchlist, profiles and logs are kept
    pub data_dir: Option<PathBuf>,
    /// Response language, e.g. "en-US"
    pub language: Option<String>,
    /// Region for release-date listings, e.g. "US"
    pub region: Option<String>,
    /// Include adult titles in search and discover
    pub include_adult: bool,
}

impl Config {
    /// Get config file path (~/.config/flixtui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("flixtui").join("config.toml"))
    }

    /// Load config from a file; missing or unreadable files give the default
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Write the config, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Get TMDB API key with fallback chain:
    /// 1. Environment variable TMDB_API_KEY
    /// 2. Key from config file
    pub fn tmdb_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.tmdb_api_key.clone().filter(|k| !k.trim().is_empty()))
    }

    /// Data directory: explicit override, then config, then the platform default
    pub fn data_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .or_else(FileStorage::default_dir)
            .unwrap_or_else(|| PathBuf::from(".flixtui"))
    }

    /// Apply language, region and adult settings to a client
    pub fn configure(&self, client: TmdbClient) -> TmdbClient {
        client
            .with_language(self.language.clone())
            .with_region(self.region.clone())
            .with_include_adult(self.include_adult)
    }
}
