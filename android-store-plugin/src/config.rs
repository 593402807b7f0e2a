//! Configuration loading for the store adapter.
//!
//! The adapter works with built-in defaults; a TOML file can override the
//! bus address of the store daemon and the adapter name used as the
//! management tag. Lookup order: explicit path, the
//! `ANDROID_STORE_CONFIG` environment variable, then the XDG config
//! directory. A missing file is not an error.

use std::path::{Path, PathBuf};

use android_store_client::BusAddress;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Bus address overrides for the store daemon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusConfig {
    /// Well-known peer name of the store daemon.
    #[serde(default = "default_service")]
    pub service: String,

    /// Object path of the store interface.
    #[serde(default = "default_object_path")]
    pub path: String,
}

fn default_service() -> String {
    "io.FuriOS.AndroidStore".to_string()
}

fn default_object_path() -> String {
    "/fdroid".to_string()
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            path: default_object_path(),
        }
    }
}

/// Adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Adapter name, used as the management ownership tag on records.
    #[serde(default = "default_adapter_name")]
    pub adapter_name: String,

    /// Bus address of the store daemon.
    #[serde(default)]
    pub bus: BusConfig,
}

fn default_adapter_name() -> String {
    "android-store".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            adapter_name: default_adapter_name(),
            bus: BusConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Resolve configuration from the default locations.
    ///
    /// Checks `ANDROID_STORE_CONFIG`, then the XDG config directory.
    /// Falls back to built-in defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error only if a config file was found but could not be
    /// read or parsed.
    pub fn resolve() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("ANDROID_STORE_CONFIG") {
            return Self::load(&PathBuf::from(path));
        }

        if let Some(dirs) = directories::ProjectDirs::from("io", "furios", "android-store") {
            let config_path = dirs.config_dir().join("config.toml");
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Bus address derived from this configuration.
    #[must_use]
    pub fn bus_address(&self) -> BusAddress {
        BusAddress {
            service: self.bus.service.clone(),
            path: self.bus.path.clone(),
        }
    }
}
