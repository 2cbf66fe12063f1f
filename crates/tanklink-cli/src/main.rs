//! tanklink - terminal client for an ESP32 tank robot.
//!
//! Connects to the robot's Bluetooth serial port, forwards typed commands
//! and prints whatever telemetry the robot sends back.

mod cli;
mod commands;
mod config;
mod device;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::*;

use cli::Cli;
use config::RunConfig;
use error::{exit_codes, CliError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            if e.is_link_failure() {
                eprintln!("\n{}", commands::TROUBLESHOOTING);
            }
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = RunConfig::from_cli(&cli)?;

    if cli.list {
        commands::run_list(config).await
    } else {
        commands::run_connect(config).await
    }
}
