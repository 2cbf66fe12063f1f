//! Name-based device discovery.
//!
//! A [`Scanner`] reports nearby devices; [`discover_by_name`] turns a name
//! fragment into a connectable address.

#[cfg(feature = "bluetooth")]
pub mod bluez;

#[cfg(feature = "bluetooth")]
pub use bluez::BluezScanner;

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::DiscoveryError;
use crate::types::{DeviceAddress, ScannedDevice};

/// Advertised name fragment of the tank robot firmware
pub const DEFAULT_DEVICE_NAME: &str = "ESP32TankRobot";

/// Default scan duration
pub const DEFAULT_SCAN_DURATION: Duration = Duration::from_secs(5);

/// Reports `(address, name)` pairs for devices seen within a duration.
pub trait Scanner {
    fn scan(
        &self,
        duration: Duration,
    ) -> impl Future<Output = Result<Vec<ScannedDevice>, DiscoveryError>>;
}

/// First device whose name contains `name` (case-sensitive).
///
/// Several devices sharing the fragment are not disambiguated; scan order
/// decides.
pub fn find_by_name<'a>(devices: &'a [ScannedDevice], name: &str) -> Option<&'a ScannedDevice> {
    devices.iter().find(|d| d.name.contains(name))
}

/// Scan for `duration` and return the address of the first device whose
/// name contains `name`.
///
/// Scan failures are logged and reported as `None`.
pub async fn discover_by_name<S: Scanner>(
    scanner: &S,
    name: &str,
    duration: Duration,
) -> Option<DeviceAddress> {
    let devices = match scanner.scan(duration).await {
        Ok(devices) => devices,
        Err(e) => {
            warn!(error = %e, "discovery scan failed");
            return None;
        }
    };

    match find_by_name(&devices, name) {
        Some(device) => {
            info!(name = %device.name, address = %device.address, "found device");
            Some(device.address.clone())
        }
        None => {
            info!(name, seen = devices.len(), "no matching device");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScanner(Vec<ScannedDevice>);

    impl Scanner for FixedScanner {
        async fn scan(&self, _duration: Duration) -> Result<Vec<ScannedDevice>, DiscoveryError> {
            Ok(self.0.clone())
        }
    }

    struct FailingScanner;

    impl Scanner for FailingScanner {
        async fn scan(&self, _duration: Duration) -> Result<Vec<ScannedDevice>, DiscoveryError> {
            Err(DiscoveryError::NoAdapter("hci0 missing".to_string()))
        }
    }

    #[tokio::test]
    async fn test_discover_by_name_substring() {
        let scanner = FixedScanner(vec![ScannedDevice::new(
            "AA:BB:CC:DD:EE:FF",
            "ESP32TankRobot-42",
        )]);

        let found = discover_by_name(&scanner, DEFAULT_DEVICE_NAME, DEFAULT_SCAN_DURATION).await;
        assert_eq!(found, Some(DeviceAddress::new("AA:BB:CC:DD:EE:FF")));
    }

    #[tokio::test]
    async fn test_discover_by_name_empty_scan() {
        let scanner = FixedScanner(Vec::new());
        assert_eq!(
            discover_by_name(&scanner, DEFAULT_DEVICE_NAME, DEFAULT_SCAN_DURATION).await,
            None
        );
    }

    #[tokio::test]
    async fn test_discover_by_name_swallows_scan_errors() {
        assert_eq!(
            discover_by_name(&FailingScanner, DEFAULT_DEVICE_NAME, DEFAULT_SCAN_DURATION).await,
            None
        );
    }

    #[test]
    fn test_find_by_name_first_match_wins() {
        let devices = vec![
            ScannedDevice::new("00:00:00:00:00:01", "Headphones"),
            ScannedDevice::new("00:00:00:00:00:02", "ESP32TankRobot-A"),
            ScannedDevice::new("00:00:00:00:00:03", "ESP32TankRobot-B"),
        ];

        let found = find_by_name(&devices, "ESP32TankRobot").unwrap();
        assert_eq!(found.address.as_str(), "00:00:00:00:00:02");
    }

    #[test]
    fn test_find_by_name_is_case_sensitive() {
        let devices = vec![ScannedDevice::new("00:00:00:00:00:01", "esp32tankrobot")];
        assert!(find_by_name(&devices, "ESP32TankRobot").is_none());
    }
}
