//! In-memory record caches.
//!
//! Two app caches (installed, updatable) plus a repository lookup keyed by
//! URL. All three are populated as a side effect of listing verbs; there
//! is no background refresh, so staleness is bounded by how often the host
//! asks for a listing.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::record::{AppHandle, METADATA_PACKAGE_NAME};

/// Caches owned by one adapter instance.
#[derive(Debug, Default)]
pub struct AppCaches {
    installed: Mutex<Vec<AppHandle>>,
    updatable: Mutex<Vec<AppHandle>>,
    repositories: Mutex<HashMap<String, AppHandle>>,
}

impl AppCaches {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the installed set wholesale with a new snapshot.
    pub fn replace_installed(&self, apps: Vec<AppHandle>) {
        *self.installed.lock() = apps;
    }

    /// Current installed snapshot.
    #[must_use]
    pub fn installed(&self) -> Vec<AppHandle> {
        self.installed.lock().clone()
    }

    /// Whether an installed record carries the given package identifier.
    #[must_use]
    pub fn installed_contains_package(&self, package: &str) -> bool {
        self.installed
            .lock()
            .iter()
            .any(|app| app.metadata(METADATA_PACKAGE_NAME).as_deref() == Some(package))
    }

    /// Append records to the updatable set.
    pub fn extend_updatable(&self, apps: impl IntoIterator<Item = AppHandle>) {
        self.updatable.lock().extend(apps);
    }

    /// Current updatable snapshot.
    #[must_use]
    pub fn updatable(&self) -> Vec<AppHandle> {
        self.updatable.lock().clone()
    }

    /// Register a repository record under its URL, replacing any previous
    /// record cached for the same URL.
    pub fn upsert_repository(&self, url: &str, app: AppHandle) {
        self.repositories.lock().insert(url.to_string(), app);
    }

    /// Look up a repository record by URL.
    #[must_use]
    pub fn repository(&self, url: &str) -> Option<AppHandle> {
        self.repositories.lock().get(url).cloned()
    }

    /// Number of distinct repository URLs cached.
    #[must_use]
    pub fn repository_count(&self) -> usize {
        self.repositories.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AppKind, AppRecord, AppScope};
    use std::sync::Arc;

    fn app(id: &str, package: &str) -> AppHandle {
        let app = AppRecord::new(id, AppKind::DesktopApp, AppScope::System, "test");
        app.set_metadata(METADATA_PACKAGE_NAME, package);
        app
    }

    #[test]
    fn test_installed_replace_is_wholesale() {
        let caches = AppCaches::new();
        caches.replace_installed(vec![app("a", "pkg.a"), app("b", "pkg.b")]);
        assert_eq!(caches.installed().len(), 2);

        caches.replace_installed(vec![app("c", "pkg.c")]);
        let installed = caches.installed();
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].id(), "c");
    }

    #[test]
    fn test_installed_lookup_by_package_name() {
        let caches = AppCaches::new();
        caches.replace_installed(vec![app("a", "pkg.a")]);
        assert!(caches.installed_contains_package("pkg.a"));
        assert!(!caches.installed_contains_package("pkg.b"));
    }

    #[test]
    fn test_updatable_appends() {
        let caches = AppCaches::new();
        caches.extend_updatable(vec![app("a", "pkg.a")]);
        caches.extend_updatable(vec![app("b", "pkg.b")]);
        assert_eq!(caches.updatable().len(), 2);
    }

    #[test]
    fn test_repository_upsert_replaces_same_url() {
        let caches = AppCaches::new();
        let first = AppRecord::new("F-Droid", AppKind::Repository, AppScope::System, "test");
        let second = AppRecord::new("F-Droid", AppKind::Repository, AppScope::System, "test");

        caches.upsert_repository("https://f-droid.org/repo", first);
        caches.upsert_repository("https://f-droid.org/repo", Arc::clone(&second));

        assert_eq!(caches.repository_count(), 1);
        let cached = caches.repository("https://f-droid.org/repo").unwrap();
        assert!(Arc::ptr_eq(&cached, &second));
    }
}
