//! Wire-shape types for replies from the Android store service.
//!
//! `GetInstalledApps` and `GetUpgradable` both reply with arrays of
//! loosely-typed dictionaries; [`PackageEntry`] carries the fields this
//! client reads from them, each optional because the daemon omits what it
//! does not know. `Search` replies with a JSON string; [`SearchEntry`] is
//! its per-result shape.

use std::collections::HashMap;

use serde::Deserialize;
use zbus::zvariant::OwnedValue;

/// One entry from an installed or upgradable listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageEntry {
    /// Store identifier of the app.
    pub id: Option<String>,
    /// Human-readable display name.
    pub name: Option<String>,
    /// Package name understood by the package manager.
    pub package_name: Option<String>,
    /// Version currently installed.
    pub current_version: Option<String>,
    /// Version available for update.
    pub available_version: Option<String>,
    /// Repository the package came from.
    pub repository: Option<String>,
}

impl PackageEntry {
    /// Extract the known fields from a reply dictionary. Unknown keys are
    /// ignored; non-string values for known keys are treated as absent.
    #[must_use]
    pub fn from_dict(dict: &HashMap<String, OwnedValue>) -> Self {
        Self {
            id: dict_string(dict, "id"),
            name: dict_string(dict, "name"),
            package_name: dict_string(dict, "packageName"),
            current_version: dict_string(dict, "currentVersion"),
            available_version: dict_string(dict, "availableVersion"),
            repository: dict_string(dict, "repository"),
        }
    }
}

/// One entry from a search reply.
///
/// `id` is mandatory; an entry without it fails the whole search payload.
/// Every other field degrades to `None` when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub package: Option<SearchPackage>,
}

/// Packaging details nested inside a search entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPackage {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

fn dict_string(dict: &HashMap<String, OwnedValue>, key: &str) -> Option<String> {
    dict.get(key)
        .and_then(|v| v.downcast_ref::<str>())
        .map(ToOwned::to_owned)
}
