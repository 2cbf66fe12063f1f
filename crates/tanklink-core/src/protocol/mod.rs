//! Wire protocol helpers for the tank controller.
//!
//! The wire format is newline-terminated plain text in both directions, with
//! no length prefix, checksum or acknowledgement.

pub mod commands;
pub mod line;

pub use commands::Commands;
pub use line::{encode_line, LineAssembler, Utf8Decoder};
