//! Tunnel launching.
//!
//! Builds the port-forwarding session for a resolved target and hands it to
//! the session transport. The call blocks for as long as the tunnel is open.

use thiserror::Error;
use tracing::{debug, info};

use crate::aws::{AwsCliError, PortForwardingSession, SessionExit, SessionTransport};
use crate::config::Jump;
use crate::report::Reporter;
use crate::resolver::ResolvedTarget;

/// Errors raised while starting or running the tunnel.
#[derive(Debug, Error)]
pub enum TunnelError {
    /// The transport could not be invoked.
    #[error("Failed to establish an SSM session: {0}")]
    Transport(#[source] AwsCliError),

    /// The transport ran and reported failure.
    #[error("Failed to establish an SSM session: session exited with code {code}")]
    SessionFailed {
        /// Exit code reported by the transport.
        code: i32,
    },
}

/// Opens port-forwarding sessions through a [`SessionTransport`].
pub struct TunnelLauncher<'a> {
    transport: &'a dyn SessionTransport,
    reporter: Reporter,
}

impl<'a> TunnelLauncher<'a> {
    /// Create a launcher over the given transport.
    pub fn new(transport: &'a dyn SessionTransport, reporter: Reporter) -> Self {
        Self {
            transport,
            reporter,
        }
    }

    /// Build the session request for a resolved target.
    pub fn session_for(target: ResolvedTarget, remote_port: u16, local_port: u16) -> PortForwardingSession {
        PortForwardingSession {
            target: target.instance_id,
            host: target.remote_host,
            port_number: remote_port,
            local_port_number: local_port,
        }
    }

    /// Open the tunnel and block until it closes.
    ///
    /// Returns the session exit so callers can tell a clean close from an
    /// interrupt.
    pub fn launch(&self, target: ResolvedTarget, jump: &Jump) -> Result<SessionExit, TunnelError> {
        self.reporter.step("Establishing an SSM session");

        let session = Self::session_for(target, jump.remote_port, jump.local_port);
        info!(
            "Forwarding localhost:{} to {}:{} through {}",
            session.local_port_number, session.host, session.port_number, session.target
        );

        let exit = self
            .transport
            .start_session(&jump.aws_profile, &session)
            .map_err(TunnelError::Transport)?;

        match exit {
            SessionExit::Closed => {
                debug!("Session for '{}' closed", jump.name);
                Ok(exit)
            }
            SessionExit::Interrupted => {
                debug!("Session for '{}' interrupted", jump.name);
                Ok(exit)
            }
            SessionExit::Failed { code } => Err(TunnelError::SessionFailed { code }),
        }
    }
}
