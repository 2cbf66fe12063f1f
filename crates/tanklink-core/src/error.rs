//! Error types for tanklink core.

use std::time::Duration;

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Connect error: {0}")]
    Connect(#[from] ConnectError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to establish a link.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Invalid device address: {0}")]
    InvalidAddress(String),

    #[error("Connection to {address} failed: {source}")]
    Transport {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection to {address} timed out after {timeout:?}")]
    Timeout { address: String, timeout: Duration },
}

/// Failure to deliver a command over an established link.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Not connected")]
    NotConnected,

    #[error("Transport failure: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Write timed out after {0:?}")]
    Timeout(Duration),
}

/// Discovery scan errors.
///
/// These never escape [`crate::discovery::discover_by_name`]; they surface
/// only from direct [`crate::discovery::Scanner::scan`] calls.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[cfg(feature = "bluetooth")]
    #[error("Bluetooth error: {0}")]
    Bluetooth(#[from] bluer::Error),

    #[error("No Bluetooth adapter available: {0}")]
    NoAdapter(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_error_display() {
        assert_eq!(SendError::NotConnected.to_string(), "Not connected");
    }

    #[test]
    fn test_connect_timeout_display() {
        let err = ConnectError::Timeout {
            address: "AA:BB:CC:DD:EE:FF".to_string(),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(
            err.to_string(),
            "Connection to AA:BB:CC:DD:EE:FF timed out after 10s"
        );
    }

    #[test]
    fn test_core_error_from_connect_error() {
        let err: CoreError = ConnectError::InvalidAddress("nope".to_string()).into();
        assert!(err.to_string().contains("Invalid device address: nope"));
    }

    #[test]
    fn test_core_error_from_io_error() {
        let err: CoreError = std::io::Error::from(std::io::ErrorKind::BrokenPipe).into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
