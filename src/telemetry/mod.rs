//! Audit telemetry for ssm-jump.
//!
//! Tunnel lifecycle events go to syslog with the `SSM_JUMP` tag so that
//! port-forwarding into production networks leaves an audit trail.
//!
//! # Architecture
//!
//! - **Audit logging** (syslog): tunnel start/end and failures, never stdout/stderr
//! - **Debug logging** (tracing): development logs go to stderr via `tracing`
//!
//! When no syslog daemon is reachable the binary installs a null logger and
//! carries on; auditing is never a reason to refuse a jump.
//!
//! # Event Format
//!
//! ```json
//! {"ts":"2026-01-07T14:32:01Z","event":"tunnel_start","user":"ops","jump":"db-jump","instance_id":"i-0abc","remote_host":"10.0.1.5","remote_port":5432,"local_port":15432,"aws_profile":"prod","pid":4242}
//! ```

mod error;
mod events;
mod syslog;

pub use error::TelemetryError;
pub use events::{AuditEvent, TunnelOutcome};
pub use syslog::{
    AuditLogger, SYSLOG_TAG, current_user, init_logger, init_null_logger, record, try_audit,
};
