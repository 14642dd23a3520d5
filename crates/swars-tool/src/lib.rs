//! Command-line tooling for Syndicate Wars map and vehicle files.
//!
//! The `swars-tool` binary is a thin wrapper around this library:
//!
//! - [`ToolConfig`] parses CLI arguments and environment variables
//! - [`commands::run`] executes one subcommand and returns a [`Report`]
//!
//! Commands only use the public `swars-formats` API, so everything the tool
//! does can also be done from code.

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{Report, run};
pub use config::{Command, ToolConfig};
pub use error::{ConfigError, ToolError};
