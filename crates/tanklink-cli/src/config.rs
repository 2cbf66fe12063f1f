//! Run configuration assembled from command-line arguments and environment.

use std::time::Duration;

use tanklink_core::link::LinkOptions;
use tanklink_core::session::SessionOptions;
use tanklink_core::types::DeviceAddress;

use crate::cli::{Cli, OutputFormat};
use crate::error::CliError;

/// Highest valid RFCOMM channel number
const MAX_RFCOMM_CHANNEL: u8 = 30;

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Explicit address; `None` means discover by `name`
    pub mac: Option<DeviceAddress>,
    pub name: String,
    pub scan_duration: Duration,
    pub channel: u8,
    pub link: LinkOptions,
    pub session: SessionOptions,
    pub format: OutputFormat,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mac = match cli.mac.as_deref().map(str::trim) {
            Some("") => {
                return Err(CliError::InvalidArgument("--mac must not be empty".to_string()))
            }
            Some(mac) => Some(DeviceAddress::new(mac)),
            None => None,
        };

        if mac.is_none() && cli.name.is_empty() {
            return Err(CliError::InvalidArgument(
                "--name must not be empty when --mac is not given".to_string(),
            ));
        }

        if !(1..=MAX_RFCOMM_CHANNEL).contains(&cli.channel) {
            return Err(CliError::InvalidArgument(format!(
                "--channel must be between 1 and {}, got {}",
                MAX_RFCOMM_CHANNEL, cli.channel
            )));
        }

        let link = LinkOptions {
            connect_timeout: non_zero_millis("--connect-timeout-ms", cli.connect_timeout_ms)?,
            receive_timeout: non_zero_millis("--receive-timeout-ms", cli.receive_timeout_ms)?,
            ..LinkOptions::default()
        };

        let session = SessionOptions {
            input_poll: non_zero_millis("--input-poll-ms", cli.input_poll_ms)?,
            ..SessionOptions::default()
        };

        if cli.scan_duration == 0 {
            return Err(CliError::InvalidArgument(
                "--scan-duration must be at least 1 second".to_string(),
            ));
        }

        Ok(Self {
            mac,
            name: cli.name.clone(),
            scan_duration: Duration::from_secs(cli.scan_duration),
            channel: cli.channel,
            link,
            session,
            format: cli.format,
        })
    }
}

fn non_zero_millis(flag: &str, value: u64) -> Result<Duration, CliError> {
    if value == 0 {
        return Err(CliError::InvalidArgument(format!("{} must be greater than 0", flag)));
    }
    Ok(Duration::from_millis(value))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Result<RunConfig, CliError> {
        let mut argv = vec!["tanklink"];
        argv.extend_from_slice(args);
        RunConfig::from_cli(&Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert!(config.mac.is_none());
        assert_eq!(config.name, "ESP32TankRobot");
        assert_eq!(config.scan_duration, Duration::from_secs(5));
        assert_eq!(config.link.receive_timeout, Duration::from_millis(500));
        assert_eq!(config.link.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.session.input_poll, Duration::from_millis(100));
    }

    #[test]
    fn test_mac_is_trimmed() {
        let config = parse(&["--mac", " 24:A1:62:00:11:22 "]).unwrap();
        assert_eq!(config.mac, Some(DeviceAddress::new("24:A1:62:00:11:22")));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(parse(&["--mac", ""]), Err(CliError::InvalidArgument(_))));
        assert!(matches!(parse(&["--name", ""]), Err(CliError::InvalidArgument(_))));
        assert!(matches!(parse(&["--channel", "0"]), Err(CliError::InvalidArgument(_))));
        assert!(matches!(parse(&["--channel", "31"]), Err(CliError::InvalidArgument(_))));
        assert!(matches!(
            parse(&["--receive-timeout-ms", "0"]),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse(&["--scan-duration", "0"]),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_name_allowed_with_mac() {
        assert!(parse(&["--mac", "24:A1:62:00:11:22", "--name", ""]).is_ok());
    }
}
