//! Conversion of remote replies into application records.
//!
//! One function per listing shape. Each builds fresh records in the
//! remote's delivery order, tags them with this adapter's management tag,
//! and updates the relevant cache as a side effect. Installed status on
//! search results is inferred locally from the installed cache, never
//! trusted from the remote.

use android_store_client::{PackageEntry, SearchEntry};
use tracing::debug;

use crate::cache::AppCaches;
use crate::record::{
    AppHandle, AppKind, AppRecord, AppScope, AppState, NameQuality, METADATA_CREATOR,
    METADATA_PACKAGE_NAME, METADATA_PACKAGING_FORMAT, METADATA_REPOSITORY, METADATA_REPO_URL,
    METADATA_SORT_KEY,
};

/// Fixed sort priority attached to repository records.
const REPOSITORY_SORT_KEY: &str = "300";
/// Origin label shown by the host next to store records.
const ORIGIN_LABEL: &str = "F-Droid (Android)";
/// Packaging format tag for app records.
const PACKAGING_FORMAT: &str = "apk";

/// Build repository records from `(name, url)` pairs.
///
/// Each record is registered in the URL-keyed repository cache so a later
/// listing with the same URL replaces the cached entry instead of
/// accumulating duplicates.
pub fn repositories_to_records(
    adapter: &str,
    repos: &[(String, String)],
    caches: &AppCaches,
) -> Vec<AppHandle> {
    let mut list = Vec::with_capacity(repos.len());

    for (name, url) in repos {
        debug!("Processing F-Droid repository: {name} ({url})");

        let app = AppRecord::new(name, AppKind::Repository, AppScope::System, adapter);
        app.set_state(AppState::Installed);
        app.set_not_launchable();
        app.set_name(NameQuality::Normal, name);
        app.set_homepage(url);
        app.set_metadata(METADATA_REPO_URL, url);
        app.set_metadata(METADATA_SORT_KEY, REPOSITORY_SORT_KEY);
        app.set_origin_label(ORIGIN_LABEL);

        caches.upsert_repository(url, AppHandle::clone(&app));
        list.push(app);
    }

    list
}

/// Build installed-app records and replace the installed cache wholesale.
///
/// Entries without a package name are skipped silently; consumers must
/// tolerate full replacement, not deltas.
pub fn installed_to_records(
    adapter: &str,
    entries: &[PackageEntry],
    caches: &AppCaches,
) -> Vec<AppHandle> {
    let mut list = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(package_name) = entry.package_name.as_deref() else {
            continue;
        };
        let id = entry.id.as_deref().unwrap_or(package_name);

        let app = AppRecord::new(id, AppKind::DesktopApp, AppScope::System, adapter);
        app.set_has_source();
        app.set_allow_cancel(false);
        app.set_sandboxed();
        set_name_with_fallback(&app, entry.name.as_deref(), package_name);
        app.set_metadata(METADATA_PACKAGE_NAME, package_name);
        app.add_source(id);
        app.set_state(AppState::Installed);

        debug!(
            "Added installed Android app: {} (package: {package_name})",
            app.name().unwrap_or_default()
        );
        list.push(app);
    }

    caches.replace_installed(list.clone());
    list
}

/// Build updatable-app records and append them to the updatable cache.
///
/// Entries without a package name are skipped silently. Missing version
/// strings degrade to a literal `unknown` in diagnostics.
pub fn upgradable_to_records(
    adapter: &str,
    entries: &[PackageEntry],
    caches: &AppCaches,
) -> Vec<AppHandle> {
    let mut list = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(package_name) = entry.package_name.as_deref() else {
            continue;
        };
        let id = entry.id.as_deref().unwrap_or(package_name);

        let app = AppRecord::new(id, AppKind::DesktopApp, AppScope::System, adapter);
        app.set_allow_cancel(false);
        app.set_sandboxed();
        set_name_with_fallback(&app, entry.name.as_deref(), package_name);
        app.set_metadata(METADATA_PACKAGE_NAME, id);
        if let Some(repository) = entry.repository.as_deref() {
            app.set_metadata(METADATA_REPOSITORY, repository);
        }
        app.add_source(id);
        app.set_metadata(METADATA_PACKAGING_FORMAT, PACKAGING_FORMAT);
        app.set_state(AppState::Updatable);

        if let Some(version) = entry.current_version.as_deref() {
            app.set_version(version);
        }
        if let Some(version) = entry.available_version.as_deref() {
            app.set_update_version(version);
        }

        debug!(
            "Found upgrade for {package_name}: {} -> {}",
            entry.current_version.as_deref().unwrap_or("unknown"),
            entry.available_version.as_deref().unwrap_or("unknown"),
        );
        list.push(app);
    }

    if list.is_empty() {
        debug!("No upgradable Android apps found");
    } else {
        debug!("Found {} upgradable Android apps", list.len());
    }

    caches.extend_updatable(list.iter().cloned());
    list
}

/// Build records from search results.
///
/// Installed status is inferred by matching the result identifier against
/// the installed cache's package-name metadata. Icon URLs are attached
/// only when they carry an `http`/`https` scheme.
pub fn search_to_records(
    adapter: &str,
    entries: &[SearchEntry],
    caches: &AppCaches,
) -> Vec<AppHandle> {
    let mut list = Vec::with_capacity(entries.len());

    for entry in entries {
        let is_installed = caches.installed_contains_package(&entry.id);

        let app = AppRecord::new(&entry.id, AppKind::DesktopApp, AppScope::System, adapter);
        app.set_has_source();
        app.set_sandboxed();
        app.set_metadata(METADATA_CREATOR, adapter);
        app.set_metadata(METADATA_PACKAGE_NAME, &entry.id);
        if let Some(repository) = entry.repository.as_deref() {
            app.set_metadata(METADATA_REPOSITORY, repository);
        }
        app.add_source(&entry.id);

        if let Some(name) = entry.name.as_deref() {
            app.set_name(NameQuality::Normal, name);
        }
        if let Some(summary) = entry.summary.as_deref() {
            app.set_summary(summary);
        }
        if let Some(description) = entry.description.as_deref() {
            app.set_description(description);
        }
        if let Some(license) = entry.license.as_deref() {
            app.set_license(license);
        }
        if let Some(author) = entry.author.as_deref() {
            app.set_developer(author);
        }
        if let Some(web_url) = entry.web_url.as_deref() {
            app.set_homepage(web_url);
        }

        if let Some(package) = &entry.package {
            if let Some(version) = package.version.as_deref() {
                app.set_version(version);
            }
            if let Some(icon_url) = package.icon_url.as_deref() {
                if icon_url.starts_with("http://") || icon_url.starts_with("https://") {
                    app.set_icon_url(icon_url);
                } else {
                    debug!(
                        "App '{}' has invalid icon URL: {icon_url}",
                        entry.name.as_deref().unwrap_or(&entry.id)
                    );
                }
            }
        }

        app.set_state(if is_installed {
            AppState::Installed
        } else {
            AppState::Available
        });
        list.push(app);
    }

    list
}

fn set_name_with_fallback(app: &AppHandle, name: Option<&str>, package_name: &str) {
    match name {
        Some(name) if !name.is_empty() => app.set_name(NameQuality::Normal, name),
        _ => app.set_name(NameQuality::Lowest, package_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use android_store_client::SearchPackage;

    fn entry(id: &str, package_name: Option<&str>) -> PackageEntry {
        PackageEntry {
            id: Some(id.to_string()),
            name: Some(format!("App {id}")),
            package_name: package_name.map(ToOwned::to_owned),
            ..PackageEntry::default()
        }
    }

    #[test]
    fn test_repository_record_fields() {
        let caches = AppCaches::new();
        let repos = vec![("F-Droid".to_string(), "https://f-droid.org/repo".to_string())];
        let list = repositories_to_records("android-store", &repos, &caches);

        assert_eq!(list.len(), 1);
        let repo = &list[0];
        assert_eq!(repo.kind(), AppKind::Repository);
        assert_eq!(repo.state(), AppState::Installed);
        assert!(!repo.is_launchable());
        assert_eq!(repo.metadata(METADATA_SORT_KEY).as_deref(), Some("300"));
        assert_eq!(repo.origin_label().as_deref(), Some("F-Droid (Android)"));
        assert_eq!(
            repo.metadata(METADATA_REPO_URL).as_deref(),
            Some("https://f-droid.org/repo")
        );
        assert_eq!(repo.homepage().as_deref(), Some("https://f-droid.org/repo"));
    }

    #[test]
    fn test_repository_listing_twice_reuses_cache_key() {
        let caches = AppCaches::new();
        let repos = vec![("F-Droid".to_string(), "https://f-droid.org/repo".to_string())];
        repositories_to_records("android-store", &repos, &caches);
        repositories_to_records("android-store", &repos, &caches);
        assert_eq!(caches.repository_count(), 1);
    }

    #[test]
    fn test_installed_replaces_cache_and_skips_nameless_packages() {
        let caches = AppCaches::new();
        caches.replace_installed(vec![AppRecord::new(
            "stale",
            AppKind::DesktopApp,
            AppScope::System,
            "android-store",
        )]);

        let entries = vec![
            entry("org.example.camera", Some("org.example.camera")),
            entry("org.example.broken", None),
        ];
        let list = installed_to_records("android-store", &entries, &caches);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].state(), AppState::Installed);
        assert!(list[0].has_source());

        let installed = caches.installed();
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].id(), "org.example.camera");
    }

    #[test]
    fn test_installed_name_falls_back_to_package_name() {
        let caches = AppCaches::new();
        let mut bare = entry("org.example.camera", Some("org.example.camera"));
        bare.name = None;
        let list = installed_to_records("android-store", &[bare], &caches);
        assert_eq!(list[0].name().as_deref(), Some("org.example.camera"));
    }

    #[test]
    fn test_upgradable_appends_and_carries_versions() {
        let caches = AppCaches::new();
        let mut first = entry("org.example.camera", Some("org.example.camera"));
        first.current_version = Some("1.0".to_string());
        first.available_version = Some("2.0".to_string());
        let second = entry("org.example.editor", Some("org.example.editor"));

        upgradable_to_records("android-store", &[first], &caches);
        let list = upgradable_to_records("android-store", &[second], &caches);

        assert_eq!(list.len(), 1);
        assert_eq!(caches.updatable().len(), 2);

        let camera = &caches.updatable()[0];
        assert_eq!(camera.state(), AppState::Updatable);
        assert_eq!(camera.version().as_deref(), Some("1.0"));
        assert_eq!(camera.update_version().as_deref(), Some("2.0"));
        assert_eq!(
            camera.metadata(METADATA_PACKAGING_FORMAT).as_deref(),
            Some("apk")
        );
    }

    #[test]
    fn test_upgradable_missing_versions_do_not_crash() {
        let caches = AppCaches::new();
        let list =
            upgradable_to_records("android-store", &[entry("a", Some("pkg.a"))], &caches);
        assert_eq!(list.len(), 1);
        assert!(list[0].version().is_none());
        assert!(list[0].update_version().is_none());
    }

    #[test]
    fn test_search_installed_inference_against_cache() {
        let caches = AppCaches::new();
        installed_to_records(
            "android-store",
            &[entry("org.example.camera", Some("org.example.camera"))],
            &caches,
        );

        let results = vec![
            SearchEntry {
                id: "org.example.camera".to_string(),
                package: Some(SearchPackage::default()),
                ..SearchEntry::default()
            },
            SearchEntry {
                id: "org.example.editor".to_string(),
                package: Some(SearchPackage::default()),
                ..SearchEntry::default()
            },
        ];
        let list = search_to_records("android-store", &results, &caches);

        assert_eq!(list[0].state(), AppState::Installed);
        assert_eq!(list[1].state(), AppState::Available);
    }

    #[test]
    fn test_search_with_empty_installed_cache_marks_nothing_installed() {
        let caches = AppCaches::new();
        let results = vec![SearchEntry {
            id: "org.example.camera".to_string(),
            ..SearchEntry::default()
        }];
        let list = search_to_records("android-store", &results, &caches);
        assert_eq!(list[0].state(), AppState::Available);
    }

    #[test]
    fn test_search_entry_without_package_still_appended() {
        let caches = AppCaches::new();
        let results = vec![SearchEntry {
            id: "org.example.camera".to_string(),
            name: Some("Camera".to_string()),
            ..SearchEntry::default()
        }];
        let list = search_to_records("android-store", &results, &caches);

        assert_eq!(list.len(), 1);
        assert!(list[0].version().is_none());
        assert!(list[0].icon_url().is_none());
    }

    #[test]
    fn test_search_icon_requires_http_scheme() {
        let caches = AppCaches::new();
        let results = vec![
            SearchEntry {
                id: "a".to_string(),
                package: Some(SearchPackage {
                    icon_url: Some("https://example.org/icon.png".to_string()),
                    version: None,
                }),
                ..SearchEntry::default()
            },
            SearchEntry {
                id: "b".to_string(),
                package: Some(SearchPackage {
                    icon_url: Some("file:///tmp/icon.png".to_string()),
                    version: None,
                }),
                ..SearchEntry::default()
            },
        ];
        let list = search_to_records("android-store", &results, &caches);

        assert_eq!(
            list[0].icon_url().as_deref(),
            Some("https://example.org/icon.png")
        );
        assert!(list[1].icon_url().is_none());
    }

    #[test]
    fn test_search_sets_creator_and_package_metadata() {
        let caches = AppCaches::new();
        let results = vec![SearchEntry {
            id: "org.example.camera".to_string(),
            repository: Some("F-Droid".to_string()),
            ..SearchEntry::default()
        }];
        let list = search_to_records("android-store", &results, &caches);

        assert_eq!(
            list[0].metadata(METADATA_CREATOR).as_deref(),
            Some("android-store")
        );
        assert_eq!(
            list[0].metadata(METADATA_PACKAGE_NAME).as_deref(),
            Some("org.example.camera")
        );
        assert_eq!(list[0].metadata(METADATA_REPOSITORY).as_deref(), Some("F-Droid"));
    }
}
