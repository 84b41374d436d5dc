//! Jump configuration loading.
//!
//! The configuration lives in `config.yaml` in the current working directory
//! unless another path is given with `--config`. Loading is all-or-nothing:
//! a missing file, malformed YAML, an unknown key, a duplicate jump name or an
//! unusable value fails the whole load.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::ConfigError;
use super::schema::{Jump, JumpFile, JumpRecord, JumpSet};

/// Default configuration filename, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Source of jump definitions.
///
/// The dispatcher depends on this trait rather than on [`ConfigLoader`] so that
/// tests can hand it an in-memory set.
pub trait JumpSource {
    /// Load every jump definition.
    fn load(&self) -> Result<JumpSet, ConfigError>;
}

/// Loads jump definitions from a YAML file.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for `config.yaml` in the current working directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    /// Create a loader for an explicit path.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse and validate a YAML document.
    ///
    /// `origin` is only used for error messages and recorded on the set.
    pub fn parse(contents: &str, origin: &Path) -> Result<JumpSet, ConfigError> {
        let file: JumpFile = serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            source: e,
        })?;

        let mut seen = HashSet::new();
        let mut jumps = Vec::with_capacity(file.jumps.len());

        for (index, record) in file.jumps.into_iter().enumerate() {
            validate_record(&record, index, origin)?;

            if !seen.insert(record.name.clone()) {
                return Err(ConfigError::DuplicateJump {
                    path: origin.to_path_buf(),
                    name: record.name,
                });
            }

            jumps.push(Jump::from(record));
        }

        Ok(JumpSet::new(jumps, origin))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpSource for ConfigLoader {
    fn load(&self) -> Result<JumpSet, ConfigError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| ConfigError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        let jumps = Self::parse(&contents, &self.path)?;
        debug!("Loaded {} jumps from {:?}", jumps.len(), self.path);
        Ok(jumps)
    }
}

fn validate_record(record: &JumpRecord, index: usize, origin: &Path) -> Result<(), ConfigError> {
    let invalid = |field: &str, message: &str| ConfigError::InvalidValue {
        path: origin.to_path_buf(),
        field: format!("jumps[{}].{}", index, field),
        message: message.to_string(),
    };

    let required = [
        ("name", &record.name),
        ("target_instance_name", &record.target_instance_name),
        ("remote_host", &record.remote_host),
        ("aws_profile", &record.aws_profile),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(invalid(field, "must not be empty"));
        }
    }

    // u16 already bounds the upper end.
    if record.remote_port == 0 {
        return Err(invalid("remote_port", "port must be between 1 and 65535"));
    }
    if record.local_port == 0 {
        return Err(invalid("local_port", "port must be between 1 and 65535"));
    }

    Ok(())
}
