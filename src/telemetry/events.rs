//! Audit event types for structured logging.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dispatcher::Stage;
use crate::error::ErrorKind;

/// Audit events for tunnel activity.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    /// Tunnel about to be opened.
    TunnelStart {
        /// Username of the operator.
        user: String,
        /// Jump name.
        jump: String,
        /// Instance the session runs on.
        instance_id: String,
        /// Host the tunnel forwards to.
        remote_host: String,
        /// Port on the remote host.
        remote_port: u16,
        /// Port on the operator's machine.
        local_port: u16,
        /// AWS profile the session runs under.
        aws_profile: String,
        /// Process ID of ssm-jump.
        pid: u32,
    },

    /// Tunnel closed.
    TunnelEnd {
        /// Username of the operator.
        user: String,
        /// Jump name.
        jump: String,
        /// How the session ended.
        outcome: TunnelOutcome,
        /// How long the session was open, in seconds.
        duration_sec: u64,
    },

    /// A jump did not reach an open tunnel.
    JumpFailed {
        /// Username of the operator.
        user: String,
        /// Requested jump name.
        jump: String,
        /// Last stage the pipeline reached.
        stage: Stage,
        /// Classification of the failure.
        kind: ErrorKind,
        /// Rendered error message.
        message: String,
    },
}

/// How a tunnel session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TunnelOutcome {
    /// Transport exited cleanly.
    Closed,
    /// Transport was terminated by a signal.
    Interrupted,
    /// Transport failed or could not be started.
    Failed,
}

/// Wrapper for serializing events with timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct TimestampedEvent<'a> {
    /// ISO8601 timestamp.
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,

    /// The event, flattened into this struct.
    #[serde(flatten)]
    pub event: &'a AuditEvent,
}

impl AuditEvent {
    /// Wrap this event with a timestamp for serialization.
    pub fn with_timestamp(&self) -> TimestampedEvent<'_> {
        TimestampedEvent {
            timestamp: Utc::now(),
            event: self,
        }
    }
}
