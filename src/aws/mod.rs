//! AWS collaborators used by the jump pipeline.
//!
//! The resolver and launcher only see three narrow traits:
//!
//! - [`InstanceDirectory`]: running instances by `Name` tag (EC2)
//! - [`EndpointDirectory`]: VPC endpoint DNS names by `Name` tag (EC2)
//! - [`SessionTransport`]: interactive port-forwarding sessions (SSM)
//!
//! [`AwsCliClient`] implements all three by running the `aws` CLI with an
//! explicit argument vector. Tests substitute in-memory fakes.

pub mod builder;
pub mod client;
pub mod error;
pub mod session;

use std::process::ExitStatus;

pub use builder::{AwsCommandBuilder, Filter};
pub use client::{AwsCliClient, DEFAULT_AWS_PROGRAM};
pub use error::AwsCliError;
pub use session::{PORT_FORWARDING_DOCUMENT, PortForwardingSession, SessionParameters};

/// JMESPath projection yielding one instance id per line in text output.
pub const INSTANCE_ID_QUERY: &str = "Reservations[*].Instances[*].[InstanceId]";

/// JMESPath projection yielding the first DNS name of the first endpoint.
pub const VPC_ENDPOINT_DNS_QUERY: &str = "VpcEndpoints[0].DnsEntries[0].DnsName";

/// Instance state the directory lookup is restricted to.
pub const RUNNING_STATE: &str = "running";

/// Compute-instance directory.
pub trait InstanceDirectory {
    /// Ids of running instances whose `Name` tag equals `name`.
    ///
    /// Returns the raw newline-separated text; interpreting the number of
    /// results is left to the caller.
    fn running_instance_ids(&self, profile: &str, name: &str) -> Result<String, AwsCliError>;
}

/// VPC endpoint directory.
pub trait EndpointDirectory {
    /// First DNS name of the first endpoint whose `Name` tag equals `name`.
    ///
    /// Returns the raw text, which may be empty or `None` when nothing matched.
    fn vpc_endpoint_dns_name(&self, profile: &str, name: &str) -> Result<String, AwsCliError>;
}

/// Interactive session transport.
pub trait SessionTransport {
    /// Start a port-forwarding session and block until it ends.
    fn start_session(
        &self,
        profile: &str,
        session: &PortForwardingSession,
    ) -> Result<SessionExit, AwsCliError>;
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// The transport exited cleanly.
    Closed,
    /// The transport exited with a non-zero code.
    Failed {
        /// Exit code reported by the transport.
        code: i32,
    },
    /// The transport was terminated by a signal (e.g. Ctrl-C).
    Interrupted,
}

impl SessionExit {
    /// Classify how the transport exited.
    ///
    /// Transports that trap Ctrl-C exit with a code rather than dying from
    /// the signal, so a non-zero exit after an interrupt is still an
    /// interrupt.
    pub fn from_status(status: ExitStatus, interrupted: bool) -> Self {
        if status.success() {
            return SessionExit::Closed;
        }
        match status.code() {
            Some(_) if interrupted => SessionExit::Interrupted,
            Some(code) => SessionExit::Failed { code },
            None => SessionExit::Interrupted,
        }
    }
}
