//! Output formatting for CLI results.

pub mod json;
pub mod table;
pub mod telemetry;

pub use json::JsonOutput;
pub use table::TableOutput;
pub use telemetry::make_sink;

use tanklink_core::types::ScannedDevice;

/// Output formatter trait
pub trait OutputFormatter {
    /// Format a scan result, marking devices whose name contains `name`
    fn format_devices(&self, devices: &[ScannedDevice], name: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}
