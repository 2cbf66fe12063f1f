//! Diagnostic logging setup.
//!
//! Operator-facing output goes through `println!`; `tracing` events go to
//! stderr and stay quiet unless `-v` or `RUST_LOG` asks for them.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
