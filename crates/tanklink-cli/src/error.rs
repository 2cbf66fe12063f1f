//! Error types for tanklink CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use tanklink_core::error::CoreError;
use thiserror::Error;

pub use tanklink_core::error::{ConnectError, DiscoveryError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// Link could not be established, or nothing was found
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_ARGS: i32 = 2;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Could not find a device named '{name}'")]
    DeviceNotFound { name: String },

    #[error("No devices found")]
    NoDevicesFound,
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
            CliError::Core(_)
            | CliError::DeviceNotFound { .. }
            | CliError::NoDevicesFound => exit_codes::GENERAL_ERROR,
        }
    }

    /// Whether this error means the link never came up, in which case the
    /// operator gets troubleshooting steps.
    pub fn is_link_failure(&self) -> bool {
        matches!(
            self,
            CliError::DeviceNotFound { .. } | CliError::Core(CoreError::Connect(_))
        )
    }
}

impl From<ConnectError> for CliError {
    fn from(e: ConnectError) -> Self {
        CliError::Core(CoreError::Connect(e))
    }
}

impl From<DiscoveryError> for CliError {
    fn from(e: DiscoveryError) -> Self {
        CliError::Core(CoreError::Discovery(e))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_link_failures_exit_one() {
        let err: CliError = ConnectError::Timeout {
            address: "24:A1:62:00:11:22".to_string(),
            timeout: Duration::from_secs(10),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::GENERAL_ERROR);
        assert!(err.is_link_failure());

        let err = CliError::DeviceNotFound {
            name: "ESP32TankRobot".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.is_link_failure());
    }

    #[test]
    fn test_invalid_argument_exit_code() {
        let err = CliError::InvalidArgument("channel".to_string());
        assert_eq!(err.exit_code(), exit_codes::INVALID_ARGS);
        assert!(!err.is_link_failure());
    }

    #[test]
    fn test_discovery_error_is_not_link_failure() {
        let err: CliError = DiscoveryError::NoAdapter("hci0".to_string()).into();
        assert_eq!(err.exit_code(), exit_codes::GENERAL_ERROR);
        assert!(!err.is_link_failure());
    }
}
