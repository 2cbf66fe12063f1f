//! Bluetooth discovery with a progress spinner.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use tanklink_core::discovery::{discover_by_name, Scanner};
use tanklink_core::types::{DeviceAddress, ScannedDevice};

use crate::error::{CliError, Result};

/// Discovery options
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Name fragment to match
    pub name: String,
    /// Scan duration
    pub duration: Duration,
}

/// Resolve `options.name` to an address by scanning.
pub async fn resolve_address<S: Scanner>(
    scanner: &S,
    options: &DiscoveryOptions,
) -> Result<DeviceAddress> {
    println!("Scanning for device '{}'...", options.name);

    let spinner = scan_spinner(options.duration);
    let found = discover_by_name(scanner, &options.name, options.duration).await;
    spinner.finish_and_clear();

    match found {
        Some(address) => {
            println!("Found: {}", address);
            Ok(address)
        }
        None => Err(CliError::DeviceNotFound {
            name: options.name.clone(),
        }),
    }
}

/// Scan for `duration` and return everything seen.
pub async fn scan_devices<S: Scanner>(scanner: &S, duration: Duration) -> Result<Vec<ScannedDevice>> {
    let spinner = scan_spinner(duration);
    let result = scanner.scan(duration).await;
    spinner.finish_and_clear();
    Ok(result?)
}

fn scan_spinner(duration: Duration) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Scanning for {}s", duration.as_secs()));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use tanklink_core::error::DiscoveryError;

    use super::*;

    struct FixedScanner(Vec<ScannedDevice>);

    impl Scanner for FixedScanner {
        async fn scan(&self, _duration: Duration) -> std::result::Result<Vec<ScannedDevice>, DiscoveryError> {
            Ok(self.0.clone())
        }
    }

    fn options() -> DiscoveryOptions {
        DiscoveryOptions {
            name: "ESP32TankRobot".to_string(),
            duration: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn test_resolve_address_found() {
        let scanner = FixedScanner(vec![ScannedDevice::new(
            "AA:BB:CC:DD:EE:FF",
            "ESP32TankRobot-42",
        )]);

        let address = resolve_address(&scanner, &options()).await.unwrap();
        assert_eq!(address.as_str(), "AA:BB:CC:DD:EE:FF");
    }

    #[tokio::test]
    async fn test_resolve_address_not_found_exits_one() {
        let err = resolve_address(&FixedScanner(Vec::new()), &options())
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::DeviceNotFound { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
