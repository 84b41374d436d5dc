//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Sample configuration shipped at the repository root.
pub const EXAMPLE_CONFIG_FILE: &str = "config.example.yaml";

/// Errors that can occur while loading the jump configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error(
        "Failed to read {}. Please have a look at {} for syntax. The error: {source}",
        .path.display(),
        EXAMPLE_CONFIG_FILE
    )]
    Read {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the YAML document into jump records.
    #[error(
        "Failed to parse {}. Please have a look at {} for syntax. The error: {source}",
        .path.display(),
        EXAMPLE_CONFIG_FILE
    )]
    Parse {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying YAML error.
        source: serde_yaml::Error,
    },

    /// Two records share the same jump name.
    #[error(
        "Failed to parse {}: jump '{name}' is defined more than once. Please have a look at {} for syntax.",
        .path.display(),
        EXAMPLE_CONFIG_FILE
    )]
    DuplicateJump {
        /// Path to the offending file.
        path: PathBuf,
        /// The duplicated name.
        name: String,
    },

    /// A field holds a value that parses but cannot be used.
    #[error(
        "Invalid value in {} for {field}: {message}. Please have a look at {} for syntax.",
        .path.display(),
        EXAMPLE_CONFIG_FILE
    )]
    InvalidValue {
        /// Path to the offending file.
        path: PathBuf,
        /// Dotted field name, e.g. `jumps[2].local_port`.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}
