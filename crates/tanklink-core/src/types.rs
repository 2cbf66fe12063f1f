//! Shared value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a connectable remote device.
///
/// For the Bluetooth transport this is a MAC address such as
/// `24:A1:62:00:11:22`, but nothing outside the connector interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceAddress(String);

impl DeviceAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DeviceAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A device seen during a discovery scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedDevice {
    pub address: DeviceAddress,
    pub name: String,
}

impl ScannedDevice {
    pub fn new(address: impl Into<DeviceAddress>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display() {
        let addr = DeviceAddress::new("AA:BB:CC:DD:EE:FF");
        assert_eq!(addr.to_string(), "AA:BB:CC:DD:EE:FF");
        assert_eq!(addr.as_str(), "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn test_scanned_device_serializes_flat_address() {
        let device = ScannedDevice::new("AA:BB:CC:DD:EE:FF", "ESP32TankRobot-42");
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["address"], "AA:BB:CC:DD:EE:FF");
        assert_eq!(json["name"], "ESP32TankRobot-42");
    }
}
