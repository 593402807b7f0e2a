//! Error types for the store adapter.

use android_store_client::ClientError;
use thiserror::Error;

/// Adapter errors surfaced to the host's verb completion.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The request shape is not implemented by this adapter.
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// No backend handle exists; `setup` has not run or failed.
    #[error("Adapter has not been set up")]
    NotSetUp,

    /// The operation was cancelled by the host.
    #[error("Operation cancelled")]
    Cancelled,

    /// The remote call ran but the store reported a failure.
    #[error("{0}")]
    Failed(String),

    /// Failure from the store client layer.
    #[error(transparent)]
    Store(ClientError),
}

impl From<ClientError> for PluginError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Cancelled => Self::Cancelled,
            other => Self::Store(other),
        }
    }
}

/// Result type for adapter operations.
pub type Result<T> = std::result::Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_cancellation_maps_to_cancelled() {
        let err: PluginError = ClientError::Cancelled.into();
        assert!(matches!(err, PluginError::Cancelled));
    }

    #[test]
    fn test_client_failure_keeps_message() {
        let err: PluginError = ClientError::Remote("pm failure".to_string()).into();
        assert_eq!(err.to_string(), "Store call failed: pm failure");
    }
}
