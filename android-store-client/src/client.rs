//! D-Bus backed store client.

use async_trait::async_trait;
use tracing::debug;
use zbus::Connection;

use crate::backend::StoreBackend;
use crate::error::{ClientError, Result};
use crate::proxy::AndroidStoreProxy;
use crate::types::{PackageEntry, SearchEntry};

/// Bus address of the store service.
///
/// The interface name is fixed; only the peer name and object path can be
/// overridden, for daemons installed under a different well-known name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusAddress {
    /// Well-known peer name of the store daemon.
    pub service: String,
    /// Object path of the store interface.
    pub path: String,
}

impl Default for BusAddress {
    fn default() -> Self {
        Self {
            service: "io.FuriOS.AndroidStore".to_string(),
            path: "/fdroid".to_string(),
        }
    }
}

/// A connection to the Android store daemon on the session bus.
///
/// One client owns one connection. Reconnecting means building a new
/// `StoreClient` and replacing the old handle; calls still in flight on the
/// old handle keep talking to the old connection and observe its failure
/// rather than silently switching targets.
pub struct StoreClient {
    proxy: AndroidStoreProxy<'static>,
}

impl StoreClient {
    /// Connect to the store daemon at its default address.
    ///
    /// # Errors
    ///
    /// Returns an error if the session bus is unreachable.
    pub async fn connect() -> Result<Self> {
        Self::connect_with(&BusAddress::default()).await
    }

    /// Connect to the store daemon at an explicit bus address.
    ///
    /// # Errors
    ///
    /// Returns an error if the session bus is unreachable or the address
    /// is not a valid bus name/object path.
    pub async fn connect_with(address: &BusAddress) -> Result<Self> {
        let connection = Connection::session()
            .await
            .map_err(|e| ClientError::ConnectionFailed(e.to_string()))?;
        Self::with_connection(connection, address).await
    }

    /// Build a client over an existing bus connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not a valid bus name/object path.
    pub async fn with_connection(connection: Connection, address: &BusAddress) -> Result<Self> {
        debug!(
            service = %address.service,
            path = %address.path,
            "Connecting to Android store daemon"
        );
        let proxy = AndroidStoreProxy::builder(&connection)
            .destination(address.service.clone())
            .map_err(|e| ClientError::ConnectionFailed(e.to_string()))?
            .path(address.path.clone())
            .map_err(|e| ClientError::ConnectionFailed(e.to_string()))?
            .build()
            .await
            .map_err(|e| ClientError::ConnectionFailed(e.to_string()))?;

        Ok(Self { proxy })
    }
}

#[async_trait]
impl StoreBackend for StoreClient {
    async fn update_cache(&self) -> Result<bool> {
        Ok(self.proxy.update_cache().await?)
    }

    async fn repositories(&self) -> Result<Vec<(String, String)>> {
        Ok(self.proxy.get_repositories().await?)
    }

    async fn installed_apps(&self) -> Result<Vec<PackageEntry>> {
        let dicts = self.proxy.get_installed_apps().await?;
        Ok(dicts.iter().map(PackageEntry::from_dict).collect())
    }

    async fn upgradable_apps(&self) -> Result<Vec<PackageEntry>> {
        let dicts = self.proxy.get_upgradable().await?;
        Ok(dicts.iter().map(PackageEntry::from_dict).collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchEntry>> {
        let payload = self.proxy.search(query).await?;
        Ok(serde_json::from_str(&payload)?)
    }

    async fn install(&self, package_name: &str) -> Result<()> {
        Ok(self.proxy.install(package_name).await?)
    }

    async fn uninstall(&self, package_name: &str) -> Result<()> {
        Ok(self.proxy.uninstall_app(package_name).await?)
    }

    async fn remove_repository(&self, repo_id: &str) -> Result<()> {
        Ok(self.proxy.remove_repository(repo_id).await?)
    }

    async fn upgrade_packages(&self, packages: &[String]) -> Result<bool> {
        Ok(self.proxy.upgrade_packages(packages).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_address() {
        let address = BusAddress::default();
        assert_eq!(address.service, "io.FuriOS.AndroidStore");
        assert_eq!(address.path, "/fdroid");
    }
}
