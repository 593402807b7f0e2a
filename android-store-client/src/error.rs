//! Error types for the Android store client library.

use thiserror::Error;

/// Client errors.
///
/// Remote failures arrive wrapped in the transport's error envelope (a
/// D-Bus error name plus an optional message). The envelope is stripped
/// here: callers see the domain-meaningful kind and the remote's own
/// message text, never the transport naming scheme.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection to the store service failed or was lost.
    #[error("Failed to reach the store service: {0}")]
    ConnectionFailed(String),

    /// The store service is not present on the bus.
    #[error("Store service is not available: {0}")]
    ServiceUnavailable(String),

    /// The remote store reported that a target does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The method or request shape is not implemented by the peer.
    #[error("Not supported by the store service: {0}")]
    NotSupported(String),

    /// The store service ran the call and reported a failure.
    #[error("Store call failed: {0}")]
    Remote(String),

    /// A reply did not have the expected shape.
    #[error("Unexpected reply from the store service: {0}")]
    MalformedResponse(String),

    /// The call was cancelled locally before completion.
    #[error("Operation cancelled")]
    Cancelled,
}

impl ClientError {
    /// Map a remote error envelope (D-Bus error name plus optional message)
    /// to a domain error, keeping the message and dropping the envelope.
    pub(crate) fn from_remote(name: &str, message: Option<&str>) -> Self {
        let detail = message
            .filter(|m| !m.is_empty())
            .unwrap_or(name)
            .to_string();

        match name {
            "org.freedesktop.DBus.Error.ServiceUnknown"
            | "org.freedesktop.DBus.Error.NameHasNoOwner" => Self::ServiceUnavailable(detail),
            "org.freedesktop.DBus.Error.UnknownMethod"
            | "org.freedesktop.DBus.Error.UnknownInterface"
            | "org.freedesktop.DBus.Error.UnknownObject"
            | "org.freedesktop.DBus.Error.NotSupported" => Self::NotSupported(detail),
            "org.freedesktop.DBus.Error.Disconnected"
            | "org.freedesktop.DBus.Error.NoReply"
            | "org.freedesktop.DBus.Error.Timeout" => Self::ConnectionFailed(detail),
            _ if name.ends_with(".NotFound") => Self::NotFound(detail),
            _ => Self::Remote(detail),
        }
    }
}

impl From<zbus::Error> for ClientError {
    fn from(err: zbus::Error) -> Self {
        match err {
            zbus::Error::MethodError(name, message, _) => {
                Self::from_remote(name.as_str(), message.as_deref())
            }
            zbus::Error::InputOutput(e) => Self::ConnectionFailed(e.to_string()),
            zbus::Error::Variant(e) => Self::MalformedResponse(e.to_string()),
            other => Self::ConnectionFailed(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedResponse(e.to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
