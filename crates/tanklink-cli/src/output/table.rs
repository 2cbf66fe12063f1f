//! Table-formatted output for CLI.

use comfy_table::{Cell, ContentArrangement, Table};

use super::OutputFormatter;
use tanklink_core::types::ScannedDevice;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_devices(&self, devices: &[ScannedDevice], name: &str) -> String {
        if devices.is_empty() {
            return "No devices found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Address", "Name", "Match"]);

        for device in devices {
            let matched = if device.name.contains(name) { "*" } else { "" };
            table.add_row(vec![
                Cell::new(device.address.as_str()),
                Cell::new(&device.name),
                Cell::new(matched),
            ]);
        }

        format!("{}\n\nFound {} device(s)", table, devices.len())
    }
}
