//! Launch delegation for installed apps.
//!
//! The adapter does not spawn processes itself; it hands the record to the
//! host's generic launcher together with an eligibility predicate over
//! desktop entries. The predicate keeps the launcher away from entries
//! owned by other packaging systems.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::record::AppHandle;

/// A parsed desktop entry as handed over by the host.
#[derive(Debug, Clone)]
pub struct DesktopEntry {
    path: PathBuf,
    groups: HashMap<String, HashMap<String, String>>,
}

impl DesktopEntry {
    /// Build an entry view from its file path and parsed groups.
    #[must_use]
    pub fn new(path: PathBuf, groups: HashMap<String, HashMap<String, String>>) -> Self {
        Self { path, groups }
    }

    /// File path of the desktop entry.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the entry contains the named group.
    #[must_use]
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Whether the named group contains the named key.
    #[must_use]
    pub fn has_key(&self, group: &str, key: &str) -> bool {
        self.groups
            .get(group)
            .is_some_and(|keys| keys.contains_key(key))
    }
}

/// Whether a desktop entry may be launched on behalf of this adapter.
///
/// Rejects entries living under snap or flatpak directories, entries
/// without a `Desktop Entry` group, and entries carrying foreign
/// packaging markers.
#[must_use]
pub fn desktop_entry_eligible(entry: &DesktopEntry) -> bool {
    let path = entry.path().to_string_lossy();
    !path.contains("/snapd/")
        && !path.contains("/snap/")
        && !path.contains("/flatpak/")
        && entry.has_group("Desktop Entry")
        && !entry.has_key("Desktop Entry", "X-Flatpak")
        && !entry.has_key("Desktop Entry", "X-SnapInstanceName")
}

/// Host-provided launcher for desktop applications.
///
/// The host resolves candidate desktop entries for the record and launches
/// the first one accepted by `filter`.
#[async_trait]
pub trait AppLauncher: Send + Sync {
    /// Launch `app`, considering only desktop entries accepted by `filter`.
    async fn launch_filtered(
        &self,
        app: &AppHandle,
        filter: &(dyn for<'a> Fn(&'a DesktopEntry) -> bool + Send + Sync),
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, groups: &[(&str, &[(&str, &str)])]) -> DesktopEntry {
        let groups = groups
            .iter()
            .map(|(group, keys)| {
                (
                    (*group).to_string(),
                    keys.iter()
                        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                        .collect(),
                )
            })
            .collect();
        DesktopEntry::new(PathBuf::from(path), groups)
    }

    #[test]
    fn test_plain_desktop_entry_is_eligible() {
        let entry = entry(
            "/usr/share/applications/camera.desktop",
            &[("Desktop Entry", &[("Name", "Camera")])],
        );
        assert!(desktop_entry_eligible(&entry));
    }

    #[test]
    fn test_snap_and_flatpak_paths_are_rejected() {
        for path in [
            "/var/lib/snapd/desktop/applications/camera.desktop",
            "/snap/camera/current/camera.desktop",
            "/var/lib/flatpak/exports/share/applications/camera.desktop",
        ] {
            let entry = entry(path, &[("Desktop Entry", &[])]);
            assert!(!desktop_entry_eligible(&entry), "{path} should be rejected");
        }
    }

    #[test]
    fn test_missing_desktop_entry_group_is_rejected() {
        let entry = entry("/usr/share/applications/camera.desktop", &[]);
        assert!(!desktop_entry_eligible(&entry));
    }

    #[test]
    fn test_foreign_packaging_markers_are_rejected() {
        let flatpak = entry(
            "/usr/share/applications/camera.desktop",
            &[("Desktop Entry", &[("X-Flatpak", "org.example.camera")])],
        );
        assert!(!desktop_entry_eligible(&flatpak));

        let snap = entry(
            "/usr/share/applications/camera.desktop",
            &[("Desktop Entry", &[("X-SnapInstanceName", "camera")])],
        );
        assert!(!desktop_entry_eligible(&snap));
    }
}
