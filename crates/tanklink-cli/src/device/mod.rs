//! Device lookup layer.
//!
//! Scanning and name matching live in tanklink-core; this module adds the
//! operator-facing progress and messages.

pub mod discovery;
