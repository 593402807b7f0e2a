//! Application records shared between lists and caches.
//!
//! A record represents one installable app or one repository as the
//! software-center host understands it. Records are handed out as
//! [`AppHandle`]s (shared ownership); the same record can sit in a listing
//! result, the installed cache, and the updatable cache at once, and a
//! state change is visible through every holder.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Metadata key carrying the remote package identifier.
pub const METADATA_PACKAGE_NAME: &str = "android::package-name";
/// Metadata key naming the repository a package came from.
pub const METADATA_REPOSITORY: &str = "android-store::repository";
/// Metadata key tagging the packaging format for host display.
pub const METADATA_PACKAGING_FORMAT: &str = "GnomeSoftware::PackagingFormat";
/// Metadata key carrying the host-side sort priority of a record.
pub const METADATA_SORT_KEY: &str = "GnomeSoftware::SortKey";
/// Metadata key naming the adapter that created a record.
pub const METADATA_CREATOR: &str = "GnomeSoftware::Creator";
/// Metadata key carrying a repository record's URL.
pub const METADATA_REPO_URL: &str = "fdroid::repo-url";

/// Shared handle to an application record.
pub type AppHandle = Arc<AppRecord>;

/// The kind of component a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKind {
    /// A desktop application.
    DesktopApp,
    /// A package repository.
    Repository,
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DesktopApp => write!(f, "desktop-app"),
            Self::Repository => write!(f, "repository"),
        }
    }
}

/// Installation scope of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppScope {
    /// Installed for the current user only.
    User,
    /// Installed system-wide.
    System,
}

/// Lifecycle state of a record.
///
/// `Installing` and `Removing` are transitional: entering one remembers
/// the previous state as a recover point, and [`AppRecord::recover`]
/// restores it when the operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppState {
    /// Nothing is known about the record yet.
    Unknown,
    /// Available for installation.
    Available,
    /// Installed on the system.
    Installed,
    /// An install or update is in progress.
    Installing,
    /// A removal is in progress.
    Removing,
    /// Installed with an update available.
    Updatable,
}

impl AppState {
    /// Whether this state marks an operation in progress.
    #[must_use]
    pub fn is_transitional(self) -> bool {
        matches!(self, Self::Installing | Self::Removing)
    }
}

impl std::fmt::Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Available => write!(f, "available"),
            Self::Installed => write!(f, "installed"),
            Self::Installing => write!(f, "installing"),
            Self::Removing => write!(f, "removing"),
            Self::Updatable => write!(f, "updatable"),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Confidence attached to a display name.
///
/// A name is only replaced by one of equal or higher quality, so a proper
/// title from search metadata is never clobbered by a package-name
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NameQuality {
    Unknown,
    Lowest,
    Normal,
    Highest,
}

#[derive(Debug, Default)]
struct RecordInner {
    name: Option<String>,
    name_quality: Option<NameQuality>,
    summary: Option<String>,
    description: Option<String>,
    version: Option<String>,
    update_version: Option<String>,
    license: Option<String>,
    developer: Option<String>,
    homepage: Option<String>,
    icon_url: Option<String>,
    origin_label: Option<String>,
    sources: Vec<String>,
    metadata: HashMap<String, String>,
    state: AppState,
    recover_state: Option<AppState>,
    not_launchable: bool,
    has_source: bool,
    sandboxed: bool,
    allow_cancel: bool,
}

/// One installable unit or repository.
///
/// Identifier, kind, scope, and the management ownership tag are fixed at
/// construction; everything else lives behind a lock and may be updated
/// through any shared handle.
#[derive(Debug)]
pub struct AppRecord {
    id: String,
    kind: AppKind,
    scope: AppScope,
    managed_by: String,
    inner: Mutex<RecordInner>,
}

impl AppRecord {
    /// Create a new record owned by the named adapter.
    #[must_use]
    pub fn new(id: &str, kind: AppKind, scope: AppScope, managed_by: &str) -> AppHandle {
        Arc::new(Self {
            id: id.to_string(),
            kind,
            scope,
            managed_by: managed_by.to_string(),
            inner: Mutex::new(RecordInner {
                allow_cancel: true,
                ..RecordInner::default()
            }),
        })
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> AppKind {
        self.kind
    }

    #[must_use]
    pub fn scope(&self) -> AppScope {
        self.scope
    }

    /// Whether the named adapter is responsible for acting on this record.
    #[must_use]
    pub fn is_managed_by(&self, adapter: &str) -> bool {
        self.managed_by == adapter
    }

    // ------------------------------------------------------------------
    // Lifecycle state
    // ------------------------------------------------------------------

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AppState {
        self.inner.lock().state
    }

    /// Transition to a new state.
    ///
    /// Entering a transitional state records the current state as the
    /// recover point; entering a settled state clears it.
    pub fn set_state(&self, state: AppState) {
        let mut inner = self.inner.lock();
        if inner.state == state {
            return;
        }
        if state.is_transitional() {
            inner.recover_state = Some(inner.state);
        } else {
            inner.recover_state = None;
        }
        inner.state = state;
    }

    /// Roll back to the state held before the current transitional state.
    ///
    /// No-op when the record is not mid-operation.
    pub fn recover(&self) {
        let mut inner = self.inner.lock();
        if let Some(prev) = inner.recover_state.take() {
            inner.state = prev;
        }
    }

    // ------------------------------------------------------------------
    // Display fields
    // ------------------------------------------------------------------

    /// Set the display name if `quality` is at least as good as what the
    /// record already has.
    pub fn set_name(&self, quality: NameQuality, name: &str) {
        let mut inner = self.inner.lock();
        if inner.name_quality.is_some_and(|q| q > quality) {
            return;
        }
        inner.name = Some(name.to_string());
        inner.name_quality = Some(quality);
    }

    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.inner.lock().name.clone()
    }

    pub fn set_summary(&self, summary: &str) {
        self.inner.lock().summary = Some(summary.to_string());
    }

    #[must_use]
    pub fn summary(&self) -> Option<String> {
        self.inner.lock().summary.clone()
    }

    pub fn set_description(&self, description: &str) {
        self.inner.lock().description = Some(description.to_string());
    }

    #[must_use]
    pub fn description(&self) -> Option<String> {
        self.inner.lock().description.clone()
    }

    pub fn set_version(&self, version: &str) {
        self.inner.lock().version = Some(version.to_string());
    }

    #[must_use]
    pub fn version(&self) -> Option<String> {
        self.inner.lock().version.clone()
    }

    pub fn set_update_version(&self, version: &str) {
        self.inner.lock().update_version = Some(version.to_string());
    }

    #[must_use]
    pub fn update_version(&self) -> Option<String> {
        self.inner.lock().update_version.clone()
    }

    pub fn set_license(&self, license: &str) {
        self.inner.lock().license = Some(license.to_string());
    }

    #[must_use]
    pub fn license(&self) -> Option<String> {
        self.inner.lock().license.clone()
    }

    pub fn set_developer(&self, developer: &str) {
        self.inner.lock().developer = Some(developer.to_string());
    }

    #[must_use]
    pub fn developer(&self) -> Option<String> {
        self.inner.lock().developer.clone()
    }

    pub fn set_homepage(&self, url: &str) {
        self.inner.lock().homepage = Some(url.to_string());
    }

    #[must_use]
    pub fn homepage(&self) -> Option<String> {
        self.inner.lock().homepage.clone()
    }

    pub fn set_icon_url(&self, url: &str) {
        self.inner.lock().icon_url = Some(url.to_string());
    }

    #[must_use]
    pub fn icon_url(&self) -> Option<String> {
        self.inner.lock().icon_url.clone()
    }

    /// Set the human-readable origin label shown next to the record.
    pub fn set_origin_label(&self, label: &str) {
        self.inner.lock().origin_label = Some(label.to_string());
    }

    #[must_use]
    pub fn origin_label(&self) -> Option<String> {
        self.inner.lock().origin_label.clone()
    }

    /// Append a package source identifier to the record.
    pub fn add_source(&self, source: &str) {
        self.inner.lock().sources.push(source.to_string());
    }

    #[must_use]
    pub fn sources(&self) -> Vec<String> {
        self.inner.lock().sources.clone()
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    /// Attach a metadata key/value pair.
    pub fn set_metadata(&self, key: &str, value: &str) {
        self.inner
            .lock()
            .metadata
            .insert(key.to_string(), value.to_string());
    }

    /// Look up a metadata value.
    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<String> {
        self.inner.lock().metadata.get(key).cloned()
    }

    // ------------------------------------------------------------------
    // Quirks and flags
    // ------------------------------------------------------------------

    /// Mark the record as not launchable (repositories, system components).
    pub fn set_not_launchable(&self) {
        self.inner.lock().not_launchable = true;
    }

    #[must_use]
    pub fn is_launchable(&self) -> bool {
        !self.inner.lock().not_launchable
    }

    /// Mark the record as having a known package source.
    pub fn set_has_source(&self) {
        self.inner.lock().has_source = true;
    }

    #[must_use]
    pub fn has_source(&self) -> bool {
        self.inner.lock().has_source
    }

    /// Mark the record as running sandboxed.
    pub fn set_sandboxed(&self) {
        self.inner.lock().sandboxed = true;
    }

    #[must_use]
    pub fn is_sandboxed(&self) -> bool {
        self.inner.lock().sandboxed
    }

    /// Control whether in-progress operations on this record may be
    /// cancelled from the host UI.
    pub fn set_allow_cancel(&self, allow: bool) {
        self.inner.lock().allow_cancel = allow;
    }

    #[must_use]
    pub fn allow_cancel(&self) -> bool {
        self.inner.lock().allow_cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(AppState::Installing.to_string(), "installing");
        assert_eq!(AppKind::Repository.to_string(), "repository");
    }

    #[test]
    fn test_transitional_state_records_recover_point() {
        let app = AppRecord::new("org.example.app", AppKind::DesktopApp, AppScope::System, "test");
        app.set_state(AppState::Available);
        app.set_state(AppState::Installing);
        assert_eq!(app.state(), AppState::Installing);

        app.recover();
        assert_eq!(app.state(), AppState::Available);
    }

    #[test]
    fn test_recover_without_transition_is_noop() {
        let app = AppRecord::new("org.example.app", AppKind::DesktopApp, AppScope::System, "test");
        app.set_state(AppState::Installed);
        app.recover();
        assert_eq!(app.state(), AppState::Installed);
    }

    #[test]
    fn test_settled_state_clears_recover_point() {
        let app = AppRecord::new("org.example.app", AppKind::DesktopApp, AppScope::System, "test");
        app.set_state(AppState::Available);
        app.set_state(AppState::Installing);
        app.set_state(AppState::Installed);

        // The install completed; a later recover must not rewind it.
        app.recover();
        assert_eq!(app.state(), AppState::Installed);
    }

    #[test]
    fn test_name_quality_never_downgrades() {
        let app = AppRecord::new("org.example.app", AppKind::DesktopApp, AppScope::System, "test");
        app.set_name(NameQuality::Normal, "Camera");
        app.set_name(NameQuality::Lowest, "org.example.app");
        assert_eq!(app.name().as_deref(), Some("Camera"));

        app.set_name(NameQuality::Highest, "Better Camera");
        assert_eq!(app.name().as_deref(), Some("Better Camera"));
    }

    #[test]
    fn test_shared_mutation_visible_through_all_handles() {
        let app = AppRecord::new("org.example.app", AppKind::DesktopApp, AppScope::System, "test");
        let other = Arc::clone(&app);
        app.set_state(AppState::Updatable);
        assert_eq!(other.state(), AppState::Updatable);
    }

    #[test]
    fn test_management_tag() {
        let app = AppRecord::new("org.example.app", AppKind::DesktopApp, AppScope::System, "android-store");
        assert!(app.is_managed_by("android-store"));
        assert!(!app.is_managed_by("flatpak"));
    }
}
