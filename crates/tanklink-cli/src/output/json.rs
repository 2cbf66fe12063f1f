//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::{json, Value};

use super::OutputFormatter;
use tanklink_core::types::ScannedDevice;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &[ScannedDevice], name: &str) -> String {
        let items: Vec<Value> = devices
            .iter()
            .map(|device| {
                json!({
                    "address": device.address,
                    "name": device.name,
                    "matches": device.name.contains(name),
                })
            })
            .collect();

        Self::to_json(&json!({
            "devices": items,
            "count": devices.len()
        }))
    }
}
