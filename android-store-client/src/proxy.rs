//! Generated D-Bus proxy for the Android store service.

use std::collections::HashMap;

use zbus::dbus_proxy;
use zbus::zvariant::OwnedValue;

/// Remote method surface of the Android app store daemon.
///
/// Method names map to the wire names by PascalCase convention
/// (`update_cache` calls `UpdateCache` and so on).
#[dbus_proxy(
    interface = "io.FuriOS.AndroidStore.fdroid",
    default_service = "io.FuriOS.AndroidStore",
    default_path = "/fdroid",
    gen_blocking = false
)]
pub trait AndroidStore {
    /// Refresh the daemon's repository caches. Returns overall success.
    fn update_cache(&self) -> zbus::Result<bool>;

    /// List configured repositories as `(name, url)` pairs.
    fn get_repositories(&self) -> zbus::Result<Vec<(String, String)>>;

    /// List installed apps as loosely-typed dictionaries.
    fn get_installed_apps(&self) -> zbus::Result<Vec<HashMap<String, OwnedValue>>>;

    /// List apps with pending updates, including version information.
    fn get_upgradable(&self) -> zbus::Result<Vec<HashMap<String, OwnedValue>>>;

    /// Full-text search. The reply is a JSON array of app objects.
    fn search(&self, query: &str) -> zbus::Result<String>;

    /// Install a package by its package name.
    fn install(&self, package_name: &str) -> zbus::Result<()>;

    /// Uninstall a package by its package name.
    fn uninstall_app(&self, package_name: &str) -> zbus::Result<()>;

    /// Remove a repository by its identifier.
    fn remove_repository(&self, repo_id: &str) -> zbus::Result<()>;

    /// Apply updates for the named packages in one batch. Returns overall
    /// success.
    fn upgrade_packages(&self, packages: &[String]) -> zbus::Result<bool>;
}
