//! swars-tool binary entry point.
//!
//! This is a thin wrapper around the swars-tool library that:
//! 1. Parses command-line arguments
//! 2. Initializes logging
//! 3. Runs the selected command and prints its report
//!
//! For library usage, see the swars-tool crate documentation.

use anyhow::{Context, Result};
use swars_tool::{ToolConfig, run};

fn main() -> Result<()> {
    let config = ToolConfig::from_args();

    // Initialize tracing subscriber for logging
    let filter = config.env_filter()?;
    if config.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!("Configuration loaded: {:?}", config);

    let report = run(&config).with_context(|| format!("{:?} failed", config.command))?;
    println!("{report}");

    Ok(())
}
