//! Device listing (`--list`).

use tanklink_core::discovery::BluezScanner;

use crate::cli::OutputFormat;
use crate::config::RunConfig;
use crate::device::discovery::scan_devices;
use crate::error::{CliError, Result};
use crate::output::get_formatter;

/// Scan once and print every named device, marking those matching `--name`.
pub async fn run_list(config: RunConfig) -> Result<()> {
    let json = config.format == OutputFormat::Json;
    let formatter = get_formatter(json);

    if !json {
        println!(
            "Discovering devices for {} seconds...",
            config.scan_duration.as_secs()
        );
    }

    let devices = scan_devices(&BluezScanner::new(), config.scan_duration).await?;

    println!("{}", formatter.format_devices(&devices, &config.name));

    if devices.is_empty() {
        return Err(CliError::NoDevicesFound);
    }

    Ok(())
}
