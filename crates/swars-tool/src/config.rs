//! Tool configuration management.
//!
//! Configuration comes from CLI arguments, with environment variable
//! fallbacks for the options shared by every subcommand:
//!
//! - `--map-dir` / `SWARS_TOOL_MAP_DIR`: directory relative file names are
//!   resolved against
//! - `--log-level` / `SWARS_TOOL_LOG`: `tracing` filter directive
//!
//! # Example
//!
//! ```no_run
//! use swars_tool::ToolConfig;
//!
//! let config = ToolConfig::from_args();
//! config.validate().expect("Invalid configuration");
//! println!("Resolved: {}", config.resolve("MAP001.MAD").display());
//! ```

use crate::error::ConfigError;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Tool configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "swars-tool",
    about = "Inspect, check and copy Syndicate Wars map and vehicle files",
    version
)]
pub struct ToolConfig {
    /// Directory that relative file names are resolved against
    #[arg(long, global = true, env = "SWARS_TOOL_MAP_DIR")]
    pub map_dir: Option<PathBuf>,

    /// Log filter, e.g. `info` or `swars_formats=debug`
    #[arg(long, global = true, env = "SWARS_TOOL_LOG", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Tool subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print header counts, sprite list lengths and tail size
    MapInfo {
        /// Map file
        map: PathBuf,
    },
    /// Check a map's header counts, tags, padding and sentinel lists against its bytes
    MapCheck {
        /// Map file
        map: PathBuf,
    },
    /// Parse and rebuild a map, comparing the bytes
    MapVerify {
        /// Map file
        map: PathBuf,
    },
    /// Load a map and save it to a new path
    MapCopy {
        /// Source map file
        src: PathBuf,
        /// Destination path
        dst: PathBuf,
    },
    /// Print vehicle mesh counts
    VehicleInfo {
        /// Vehicle mesh file
        file: PathBuf,
    },
    /// Parse and rebuild a vehicle mesh, comparing the bytes
    VehicleVerify {
        /// Vehicle mesh file
        file: PathBuf,
    },
}

impl ToolConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Resolve a file name against the map directory
    ///
    /// Absolute paths, and every path when no map directory is configured,
    /// are returned unchanged.
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        match &self.map_dir {
            Some(dir) => dir.join(name),
            None => name.as_ref().to_path_buf(),
        }
    }

    /// Build the log filter, letting `RUST_LOG` override `--log-level`
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.log_level).map_err(|e| ConfigError::InvalidLogLevel {
            level: self.log_level.clone(),
            reason: e.to_string(),
        })
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The map directory is set but does not exist
    /// - The log level is not a valid filter directive
    /// - `map-copy` would overwrite its own source
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.map_dir
            && !dir.is_dir()
        {
            return Err(ConfigError::MapDirNotFound(dir.clone()));
        }

        EnvFilter::try_new(&self.log_level).map_err(|e| ConfigError::InvalidLogLevel {
            level: self.log_level.clone(),
            reason: e.to_string(),
        })?;

        if let Command::MapCopy { src, dst } = &self.command {
            let (src, dst) = (self.resolve(src), self.resolve(dst));
            if src == dst {
                return Err(ConfigError::SameFile(src));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(args: &[&str]) -> ToolConfig {
        ToolConfig::try_parse_from(std::iter::once("swars-tool").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_subcommands() {
        assert_eq!(
            config(&["map-info", "MAP001.MAD"]).command,
            Command::MapInfo {
                map: PathBuf::from("MAP001.MAD")
            }
        );
        assert_eq!(
            config(&["map-copy", "a.MAD", "b.MAD"]).command,
            Command::MapCopy {
                src: PathBuf::from("a.MAD"),
                dst: PathBuf::from("b.MAD")
            }
        );
        assert!(ToolConfig::try_parse_from(["swars-tool", "map-info"]).is_err());
    }

    #[test]
    fn test_resolve_against_map_dir() {
        let config = config(&["--map-dir", "/games/swars/MAPS", "map-check", "MAP002.MAD"]);
        assert_eq!(
            config.resolve("MAP002.MAD"),
            PathBuf::from("/games/swars/MAPS/MAP002.MAD")
        );
        assert_eq!(config.resolve("/tmp/x.MAD"), PathBuf::from("/tmp/x.MAD"));
    }

    #[test]
    fn test_resolve_without_map_dir() {
        let mut config = config(&["vehicle-info", "CAR.MSH"]);
        config.map_dir = None;
        assert_eq!(config.resolve("CAR.MSH"), PathBuf::from("CAR.MSH"));
    }

    #[test]
    fn test_validate_missing_map_dir() {
        let config = config(&["--map-dir", "/nonexistent/swars", "map-info", "MAP001.MAD"]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MapDirNotFound(_))
        ));
    }

    #[test]
    fn test_validate_copy_onto_itself() {
        let mut config = config(&["map-copy", "MAP001.MAD", "MAP001.MAD"]);
        config.map_dir = None;
        assert!(matches!(config.validate(), Err(ConfigError::SameFile(_))));
    }

    #[test]
    fn test_validate_bad_log_level() {
        let mut config = config(&["map-info", "MAP001.MAD"]);
        config.map_dir = None;
        config.log_level = "swars_formats=loud".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel { .. })
        ));
    }
}
