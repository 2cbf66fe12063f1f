//! Interactive session: resolve, connect, multiplex, disconnect.

use std::io::{self, Write};

use colored::*;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::warn;

use tanklink_core::discovery::BluezScanner;
use tanklink_core::link::{Connector, Link, RfcommConnector};
use tanklink_core::session::{usage, ExitReason, Session, SessionSummary};

use crate::config::RunConfig;
use crate::device::discovery::{resolve_address, DiscoveryOptions};
use crate::error::Result;
use crate::output::make_sink;

/// Printed when the link could not be established.
pub const TROUBLESHOOTING: &str = "\
Troubleshooting:
1. Make sure the ESP32 is powered and running
2. The ESP32 serial console should show: 'Bluetooth started...'
3. Pair the ESP32 in the system Bluetooth settings first (bluetoothctl pair <MAC>)
4. Use the --mac option with the device's MAC address
   Find the MAC with: tanklink --list";

/// Run the interactive session
pub async fn run_connect(config: RunConfig) -> Result<()> {
    let address = match &config.mac {
        Some(mac) => mac.clone(),
        None => {
            let options = DiscoveryOptions {
                name: config.name.clone(),
                duration: config.scan_duration,
            };
            resolve_address(&BluezScanner::new(), &options).await?
        }
    };

    let mut link = Link::new(RfcommConnector::new(config.channel), address, config.link);
    let stdin = BufReader::new(tokio::io::stdin());

    let outcome = drive(&mut link, &config, stdin).await;
    release(&mut link, &mut io::stdout()).await;

    outcome.map(|_| ())
}

/// Close the link and report it, whatever the session outcome.
async fn release<C: Connector, W: Write>(link: &mut Link<C>, out: &mut W) {
    link.disconnect().await;
    if let Err(e) = writeln!(out, "Disconnected") {
        warn!(error = %e, "cannot write to stdout");
    }
}

async fn drive<C, I>(link: &mut Link<C>, config: &RunConfig, input: I) -> Result<SessionSummary>
where
    C: Connector,
    I: AsyncBufRead + Unpin,
{
    println!("Connecting to {}...", link.address());
    link.connect().await?;
    println!("{}", "✓ Connected!".green());
    println!("{}", usage());

    let sink = make_sink(config.format, link.address());
    let mut session = Session::new(sink, config.session);
    let summary = session.run(link, input, interrupt()).await?;

    match summary.reason {
        ExitReason::Interrupt => println!("\nExiting..."),
        ExitReason::Operator | ExitReason::InputClosed => println!("Exiting..."),
    }
    if summary.send_failures > 0 {
        println!(
            "{}",
            format!("{} command(s) not delivered", summary.send_failures).yellow()
        );
    }

    Ok(summary)
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
