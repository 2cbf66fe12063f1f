//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, ValueEnum};

use tanklink_core::discovery::DEFAULT_DEVICE_NAME;

/// tanklink - drive an ESP32 tank robot over Bluetooth serial
#[derive(Parser, Debug)]
#[command(name = "tanklink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Bluetooth MAC address of the robot, skips discovery (e.g. 24:A1:62:XX:XX:XX)
    #[arg(long, env = "TANKLINK_MAC")]
    pub mac: Option<String>,

    /// Advertised device name to look for during discovery
    #[arg(long, default_value = DEFAULT_DEVICE_NAME, env = "TANKLINK_NAME")]
    pub name: String,

    /// Discovery scan duration in seconds
    #[arg(long, default_value = "5", env = "TANKLINK_SCAN_DURATION")]
    pub scan_duration: u64,

    /// RFCOMM channel of the serial port service
    #[arg(long, default_value = "1", env = "TANKLINK_CHANNEL")]
    pub channel: u8,

    /// Connection attempt timeout in milliseconds
    #[arg(long, default_value = "10000")]
    pub connect_timeout_ms: u64,

    /// Link read deadline in milliseconds
    #[arg(long, default_value = "500")]
    pub receive_timeout_ms: u64,

    /// Keyboard poll interval in milliseconds
    #[arg(long, default_value = "100")]
    pub input_poll_ms: u64,

    /// How to print telemetry from the robot
    #[arg(long, value_enum, default_value_t = OutputFormat::Raw)]
    pub format: OutputFormat,

    /// Scan and list nearby devices instead of connecting
    #[arg(long, conflicts_with = "mac")]
    pub list: bool,

    /// Verbose logging to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Print bytes as they arrive
    Raw,
    /// Print complete lines with a local timestamp
    Lines,
    /// One JSON object per line
    Json,
}
