//! tanklink core - shared library for talking to an ESP32 tank robot over
//! a Bluetooth serial link.
//!
//! The [`link::Link`] owns the connection, [`discovery`] resolves a device
//! name to an address, and [`session::Session`] multiplexes operator input
//! and inbound telemetry over a single link.

pub mod discovery;
pub mod error;
pub mod link;
pub mod protocol;
pub mod session;
pub mod types;

pub use error::{ConnectError, CoreError, DiscoveryError, SendError};
pub use link::{Connector, Link, LinkOptions, LinkState};
pub use session::{ExitReason, RawSink, Session, SessionOptions, SessionSummary, TelemetrySink};
pub use types::{DeviceAddress, ScannedDevice};
