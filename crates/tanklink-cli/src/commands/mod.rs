//! Command implementations.

pub mod connect;
pub mod list;

pub use connect::{run_connect, TROUBLESHOOTING};
pub use list::run_list;
