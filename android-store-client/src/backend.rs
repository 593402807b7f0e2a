//! Typed backend trait for the remote store service.
//!
//! The adapter talks to the store through this trait rather than a
//! concrete proxy, so the production D-Bus client and scripted test
//! doubles are interchangeable.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, Result};
use crate::types::{PackageEntry, SearchEntry};

/// Asynchronous call surface of the remote store.
///
/// One method per remote operation, with replies already lifted into typed
/// values. Implementations do not retry and do not add timeouts; every
/// failure is surfaced once.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Refresh the daemon's repository caches.
    async fn update_cache(&self) -> Result<bool>;

    /// List configured repositories as `(name, url)` pairs.
    async fn repositories(&self) -> Result<Vec<(String, String)>>;

    /// Snapshot of currently installed apps.
    async fn installed_apps(&self) -> Result<Vec<PackageEntry>>;

    /// Apps with an update available.
    async fn upgradable_apps(&self) -> Result<Vec<PackageEntry>>;

    /// Full-text search over the store's index.
    async fn search(&self, query: &str) -> Result<Vec<SearchEntry>>;

    /// Install one package by name.
    async fn install(&self, package_name: &str) -> Result<()>;

    /// Uninstall one package by name.
    async fn uninstall(&self, package_name: &str) -> Result<()>;

    /// Remove one repository by identifier.
    async fn remove_repository(&self, repo_id: &str) -> Result<()>;

    /// Apply updates for the named packages in one batch.
    async fn upgrade_packages(&self, packages: &[String]) -> Result<bool>;
}

/// Race a remote call against a cancellation token.
///
/// On cancellation the pending call future is dropped, which abandons the
/// local wait immediately; whatever the remote service already started is
/// not affected.
pub async fn cancellable<T>(
    cancel: &CancellationToken,
    call: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        res = call => res,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let cancel = CancellationToken::new();
        let res = cancellable(&cancel, async { Ok(7u32) }).await;
        assert_eq!(res.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_cancellable_aborts_pending_call() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let res = cancellable(&cancel, std::future::pending::<Result<()>>()).await;
        assert!(matches!(res, Err(ClientError::Cancelled)));
    }
}
