//! The Android store adapter.
//!
//! Bridges the host verb table to the store daemon: validates admission
//! rules, drives record lifecycle states around exactly one remote call
//! per verb, and rolls state back when a call fails.

use std::sync::Arc;

use android_store_client::{cancellable, StoreBackend, StoreClient};
use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::AppCaches;
use crate::config::StoreConfig;
use crate::error::{PluginError, Result};
use crate::launch::{desktop_entry_eligible, AppLauncher};
use crate::plugin::{
    InstallFlags, LaunchFlags, ListFlags, PluginDescriptor, PluginEvent, PluginRule,
    RefreshFlags, RepositoryFlags, StorePlugin, StoreStatus, UninstallFlags, UpdateFlags,
};
use crate::query::{AppQuery, Tristate};
use crate::record::{AppHandle, AppKind, AppState, METADATA_PACKAGE_NAME};
use crate::reconcile;

/// Race a backend call against the verb's cancellation token and lift the
/// result into the adapter's error type.
async fn call<T>(
    cancel: &CancellationToken,
    fut: impl std::future::Future<Output = android_store_client::Result<T>>,
) -> Result<T> {
    cancellable(cancel, fut).await.map_err(PluginError::from)
}

/// Software-center adapter for the Android app store daemon.
///
/// Holds one backend handle (replaced atomically by `setup`), the local
/// record caches, and the host's event channel. Verb implementations
/// snapshot the handle at admission time, so a verb racing a re-setup
/// keeps talking to the superseded handle and observes that handle's own
/// failure.
pub struct AndroidStorePlugin {
    config: StoreConfig,
    backend: RwLock<Option<Arc<dyn StoreBackend>>>,
    caches: AppCaches,
    launcher: Arc<dyn AppLauncher>,
    events: mpsc::UnboundedSender<PluginEvent>,
}

impl AndroidStorePlugin {
    /// Create an adapter that connects during `setup`.
    ///
    /// Returns the adapter and the receiving end of its event channel.
    #[must_use]
    pub fn new(
        config: StoreConfig,
        launcher: Arc<dyn AppLauncher>,
    ) -> (Self, mpsc::UnboundedReceiver<PluginEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (
            Self {
                config,
                backend: RwLock::new(None),
                caches: AppCaches::new(),
                launcher,
                events,
            },
            receiver,
        )
    }

    /// Create an adapter with a pre-wired backend, skipping `setup`.
    #[must_use]
    pub fn with_backend(
        config: StoreConfig,
        launcher: Arc<dyn AppLauncher>,
        backend: Arc<dyn StoreBackend>,
    ) -> (Self, mpsc::UnboundedReceiver<PluginEvent>) {
        let (plugin, receiver) = Self::new(config, launcher);
        *plugin.backend.write() = Some(backend);
        (plugin, receiver)
    }

    pub(crate) fn caches(&self) -> &AppCaches {
        &self.caches
    }

    /// Snapshot the current backend handle.
    fn backend(&self) -> Result<Arc<dyn StoreBackend>> {
        self.backend.read().clone().ok_or(PluginError::NotSetUp)
    }

    fn emit(&self, event: PluginEvent) {
        // Notifications are best-effort; the host may have dropped the
        // receiver during teardown.
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl StorePlugin for AndroidStorePlugin {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor {
            name: self.config.adapter_name.clone(),
            version: env!("CARGO_PKG_VERSION"),
            component_kind: AppKind::DesktopApp,
            rules: vec![
                PluginRule::RunBefore("icons"),
                PluginRule::RunBefore("generic-updates"),
            ],
        }
    }

    async fn setup(&self, cancel: &CancellationToken) -> Result<()> {
        debug!("Android store adapter version: {}", env!("CARGO_PKG_VERSION"));

        let address = self.config.bus_address();
        let client = call(cancel, StoreClient::connect_with(&address)).await?;
        *self.backend.write() = Some(Arc::new(client));
        Ok(())
    }

    async fn refresh_metadata(
        &self,
        _cache_age_secs: u64,
        _flags: RefreshFlags,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let backend = self.backend()?;

        debug!("Refreshing repositories");
        self.emit(PluginEvent::Status(StoreStatus::Downloading));

        let success = call(cancel, backend.update_cache()).await?;
        self.emit(PluginEvent::UpdatesChanged);

        if success {
            Ok(())
        } else {
            Err(PluginError::Failed(
                "Failed to refresh the store cache".to_string(),
            ))
        }
    }

    async fn list_apps(
        &self,
        query: &AppQuery,
        _flags: ListFlags,
        cancel: &CancellationToken,
    ) -> Result<Vec<AppHandle>> {
        // Only one query property at a time, and only affirmative ones.
        if query.properties_set() != 1 || query.has_negation() {
            return Err(PluginError::NotSupported("Unsupported query".to_string()));
        }

        let backend = self.backend()?;
        let adapter = self.config.adapter_name.as_str();

        if query.is_source == Tristate::True {
            debug!("Listing repositories");
            let repos = call(cancel, backend.repositories()).await?;
            Ok(reconcile::repositories_to_records(adapter, &repos, &self.caches))
        } else if query.is_installed == Tristate::True {
            debug!("Listing installed apps");
            let entries = call(cancel, backend.installed_apps()).await?;
            Ok(reconcile::installed_to_records(adapter, &entries, &self.caches))
        } else if query.is_for_updates == Tristate::True {
            debug!("Listing updates");
            let entries = call(cancel, backend.upgradable_apps()).await?;
            Ok(reconcile::upgradable_to_records(adapter, &entries, &self.caches))
        } else if let Some(keywords) = &query.keywords {
            let query_str = keywords.join(" ");
            debug!("Searching for apps: {query_str}");
            let entries = call(cancel, backend.search(&query_str)).await?;
            Ok(reconcile::search_to_records(adapter, &entries, &self.caches))
        } else {
            Err(PluginError::NotSupported(
                "Unsupported query type".to_string(),
            ))
        }
    }

    async fn install_apps(
        &self,
        apps: &[AppHandle],
        flags: InstallFlags,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if flags.no_download || flags.no_apply {
            return Err(PluginError::NotSupported("Unsupported flags".to_string()));
        }

        let backend = self.backend()?;

        let mut install_list = Vec::new();
        for app in apps {
            // Repositories are enabled through the dedicated repository
            // verbs.
            debug_assert!(app.kind() != AppKind::Repository);

            if !app.is_managed_by(&self.config.adapter_name) {
                debug!("App is not managed by us, not installing");
                continue;
            }

            let Some(package_name) = app.metadata(METADATA_PACKAGE_NAME) else {
                debug!("No package name found for app, skipping installation");
                continue;
            };

            debug!("Considering app {package_name} for installation");
            install_list.push((Arc::clone(app), package_name));
        }

        let (app, package_name) = match install_list.as_slice() {
            [(app, package_name)] => (Arc::clone(app), package_name.clone()),
            _ => {
                return Err(PluginError::NotSupported(
                    "Can only install one app at a time".to_string(),
                ))
            }
        };

        app.set_state(AppState::Installing);
        match call(cancel, backend.install(&package_name)).await {
            Ok(()) => {
                debug!("Installed F-Droid app: {package_name}");
                app.set_state(AppState::Installed);
                self.emit(PluginEvent::UpdatesChanged);
                Ok(())
            }
            Err(err) => {
                app.recover();
                Err(err)
            }
        }
    }

    async fn uninstall_apps(
        &self,
        apps: &[AppHandle],
        _flags: UninstallFlags,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let backend = self.backend()?;

        let mut uninstall_list = Vec::new();
        for app in apps {
            debug_assert!(app.kind() != AppKind::Repository);
            debug!("Considering app {} for uninstallation", app.id());

            if !app.is_managed_by(&self.config.adapter_name) {
                debug!("App {} is not managed by us, not uninstalling", app.id());
                continue;
            }

            uninstall_list.push(Arc::clone(app));
        }

        let app = match uninstall_list.as_slice() {
            [app] => Arc::clone(app),
            _ => {
                return Err(PluginError::NotSupported(
                    "Can only uninstall one app at a time".to_string(),
                ))
            }
        };

        let Some(package_name) = app.metadata(METADATA_PACKAGE_NAME) else {
            return Err(PluginError::Failed(
                "No package name found for app".to_string(),
            ));
        };

        app.set_state(AppState::Removing);
        match call(cancel, backend.uninstall(&package_name)).await {
            Ok(()) => {
                app.set_state(AppState::Available);
                self.emit(PluginEvent::UpdatesChanged);
                Ok(())
            }
            Err(err) => {
                app.recover();
                Err(err)
            }
        }
    }

    async fn update_apps(
        &self,
        apps: &[AppHandle],
        flags: UpdateFlags,
        cancel: &CancellationToken,
    ) -> Result<()> {
        // Prepare-only requests are a silent success with no remote call.
        if flags.no_apply {
            return Ok(());
        }

        let backend = self.backend()?;
        self.emit(PluginEvent::Status(StoreStatus::Waiting));

        let mut targets = Vec::new();
        for app in apps {
            if let Some(package_name) = app.metadata(METADATA_PACKAGE_NAME) {
                debug!("Adding package to upgrade: {package_name}");
                targets.push((Arc::clone(app), package_name));
            }
        }

        let packages: Vec<String> = targets.iter().map(|(_, name)| name.clone()).collect();
        for (app, _) in &targets {
            app.set_state(AppState::Installing);
        }

        match call(cancel, backend.upgrade_packages(&packages)).await {
            Ok(true) => {
                for (app, _) in &targets {
                    app.set_state(AppState::Installed);
                    debug!("Updated app: {}", app.id());
                }
                self.emit(PluginEvent::UpdatesChanged);
                Ok(())
            }
            Ok(false) => {
                for (app, _) in &targets {
                    app.recover();
                }
                Err(PluginError::Failed(
                    "Failed to upgrade packages".to_string(),
                ))
            }
            Err(err) => {
                for (app, _) in &targets {
                    app.recover();
                }
                Err(err)
            }
        }
    }

    async fn remove_repository(
        &self,
        repo: &AppHandle,
        _flags: RepositoryFlags,
        cancel: &CancellationToken,
    ) -> Result<()> {
        debug_assert!(repo.kind() == AppKind::Repository);

        let backend = self.backend()?;
        debug!("Removing F-Droid repository: {}", repo.id());

        repo.set_state(AppState::Removing);
        match call(cancel, backend.remove_repository(repo.id())).await {
            Ok(()) => {
                repo.set_state(AppState::Available);
                Ok(())
            }
            Err(err) => {
                repo.recover();
                Err(err)
            }
        }
    }

    async fn launch(
        &self,
        app: &AppHandle,
        _flags: LaunchFlags,
        cancel: &CancellationToken,
    ) -> Result<()> {
        debug_assert!(app.kind() != AppKind::Repository);

        tokio::select! {
            _ = cancel.cancelled() => Err(PluginError::Cancelled),
            res = self.launcher.launch_filtered(app, &desktop_entry_eligible) => res,
        }
    }
}
