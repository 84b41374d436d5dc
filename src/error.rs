//! Errors surfaced by the jump pipeline.
//!
//! Each component has its own error type. [`JumpError`] wraps them at the
//! dispatcher boundary, and [`ErrorKind`] classifies them for reporting.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::resolver::ResolveError;
use crate::tunnel::TunnelError;

/// Any terminal failure of a jump invocation.
#[derive(Debug, Error)]
pub enum JumpError {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The requested jump is not in the configuration.
    #[error("Jump {name} not specified in {}", .source_path.display())]
    UnknownJump {
        /// Requested name.
        name: String,
        /// Configuration file that was searched.
        source_path: PathBuf,
    },

    /// The target could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The tunnel could not be started or failed.
    #[error(transparent)]
    Tunnel(#[from] TunnelError),
}

/// Classification of [`JumpError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or malformed configuration.
    Config,
    /// Requested name not present in the configuration.
    UnknownJump,
    /// A directory lookup returned nothing.
    NotFound,
    /// The instance lookup returned more than one instance.
    AmbiguousResult,
    /// A directory lookup failed at the transport level.
    Lookup,
    /// The session transport failed.
    TunnelLaunch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config => "config",
            ErrorKind::UnknownJump => "unknown_jump",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AmbiguousResult => "ambiguous_result",
            ErrorKind::Lookup => "lookup",
            ErrorKind::TunnelLaunch => "tunnel_launch",
        };
        f.write_str(name)
    }
}

impl JumpError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            JumpError::Config(_) => ErrorKind::Config,
            JumpError::UnknownJump { .. } => ErrorKind::UnknownJump,
            JumpError::Resolve(ResolveError::InstanceNotFound { .. })
            | JumpError::Resolve(ResolveError::EndpointNotFound { .. }) => ErrorKind::NotFound,
            JumpError::Resolve(ResolveError::AmbiguousInstance { .. }) => {
                ErrorKind::AmbiguousResult
            }
            JumpError::Resolve(ResolveError::Lookup { .. }) => ErrorKind::Lookup,
            JumpError::Tunnel(_) => ErrorKind::TunnelLaunch,
        }
    }
}
