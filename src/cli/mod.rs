//! CLI module
//!
//! Command-line interface of the tap.
//!
//! # Commands
//!
//! - `discover` - Print the catalog of report streams
//! - `sync` - Emit SCHEMA, RECORD and STATE messages for the selected streams

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
