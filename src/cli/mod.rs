//! CLI command handlers
//!
//! The only layer that prints user notices; core modules just return errors.

pub mod commands;

pub use commands::{export, import, merge};
