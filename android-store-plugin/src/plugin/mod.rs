//! Host-facing plugin surface.
//!
//! The software-center host drives adapters through a fixed verb table:
//! setup, metadata refresh, listing, install, uninstall, update,
//! repository removal, and launch. Every verb is asynchronous, takes a
//! cancellation token, and completes with a single `Result`. Out-of-band
//! notifications (updates changed, coarse status) flow through a
//! [`PluginEvent`] channel handed out at construction.

pub mod android;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::query::AppQuery;
use crate::record::{AppHandle, AppKind};

pub use android::AndroidStorePlugin;

/// Flags for metadata refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshFlags {
    /// The refresh was triggered by direct user interaction.
    pub interactive: bool,
}

/// Flags for listing calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFlags {
    pub interactive: bool,
}

/// Flags for install calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallFlags {
    pub interactive: bool,
    /// Download only, do not apply. Not supported by this adapter.
    pub no_download: bool,
    /// Prepare only, do not apply. Not supported by this adapter.
    pub no_apply: bool,
}

/// Flags for uninstall calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UninstallFlags {
    pub interactive: bool,
}

/// Flags for update calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateFlags {
    pub interactive: bool,
    pub no_download: bool,
    /// Prepare only; the whole call becomes a silent no-op.
    pub no_apply: bool,
}

/// Flags for repository management calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryFlags {
    pub interactive: bool,
}

/// Flags for launch calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchFlags {
    pub interactive: bool,
}

/// Ordering constraint relative to another plugin, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginRule {
    /// This plugin must run before the named one.
    RunBefore(&'static str),
    /// This plugin must run after the named one.
    RunAfter(&'static str),
}

/// Static descriptor published for host discovery.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    /// Adapter name, also used as the management tag on records.
    pub name: String,
    /// Adapter version.
    pub version: &'static str,
    /// Kind of component this adapter manages.
    pub component_kind: AppKind,
    /// Ordering constraints relative to other plugins.
    pub rules: Vec<PluginRule>,
}

/// Coarse progress status reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// The store daemon is downloading metadata.
    Downloading,
    /// Waiting for the store daemon to apply changes.
    Waiting,
}

/// Out-of-band notification to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginEvent {
    /// Installed or updatable apps changed; dependent views should
    /// refresh.
    UpdatesChanged,
    /// Coarse progress status for the current operation.
    Status(StoreStatus),
}

/// Verb table a software-center host drives an app-store adapter through.
///
/// Verbs are independent; the host may invoke them concurrently on one
/// adapter instance, but always from a single logical executor. Each verb
/// issues at most one remote call and surfaces every failure exactly once.
#[async_trait]
pub trait StorePlugin: Send + Sync {
    /// Descriptor for host discovery.
    fn descriptor(&self) -> PluginDescriptor;

    /// Establish the connection to the backing store service. Calling it
    /// again replaces the connection handle atomically.
    async fn setup(&self, cancel: &CancellationToken) -> Result<()>;

    /// Ask the store service to refresh its metadata caches.
    async fn refresh_metadata(
        &self,
        cache_age_secs: u64,
        flags: RefreshFlags,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// List apps matching a single-property query.
    async fn list_apps(
        &self,
        query: &AppQuery,
        flags: ListFlags,
        cancel: &CancellationToken,
    ) -> Result<Vec<AppHandle>>;

    /// Install exactly one eligible app.
    async fn install_apps(
        &self,
        apps: &[AppHandle],
        flags: InstallFlags,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// Uninstall exactly one eligible app.
    async fn uninstall_apps(
        &self,
        apps: &[AppHandle],
        flags: UninstallFlags,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// Apply updates for the given apps in one batch.
    async fn update_apps(
        &self,
        apps: &[AppHandle],
        flags: UpdateFlags,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// Remove one repository.
    async fn remove_repository(
        &self,
        repo: &AppHandle,
        flags: RepositoryFlags,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// Launch an installed app through the host's launcher.
    async fn launch(
        &self,
        app: &AppHandle,
        flags: LaunchFlags,
        cancel: &CancellationToken,
    ) -> Result<()>;
}
