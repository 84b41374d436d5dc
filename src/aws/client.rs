//! `aws` CLI backed implementation of the directory and session traits.

use std::ffi::OsString;
use std::process::Stdio;

use tracing::{debug, info};

use super::builder::{AwsCommandBuilder, Filter};
use super::error::AwsCliError;
use super::session::PortForwardingSession;
use super::{
    EndpointDirectory, INSTANCE_ID_QUERY, InstanceDirectory, RUNNING_STATE, SessionExit,
    SessionTransport, VPC_ENDPOINT_DNS_QUERY,
};
use crate::report::Reporter;
use crate::signal;

/// Program run when no override is given.
pub const DEFAULT_AWS_PROGRAM: &str = "aws";

/// Drives the `aws` CLI as a subprocess.
///
/// Lookups capture stdout and stderr. Sessions inherit the terminal so the
/// Session Manager plugin can talk to the operator.
#[derive(Debug, Clone)]
pub struct AwsCliClient {
    program: OsString,
    reporter: Reporter,
}

impl AwsCliClient {
    /// Create a client running `aws` from `PATH`.
    #[must_use]
    pub fn new(reporter: Reporter) -> Self {
        Self::with_program(DEFAULT_AWS_PROGRAM, reporter)
    }

    /// Create a client running a specific program.
    #[must_use]
    pub fn with_program(program: impl Into<OsString>, reporter: Reporter) -> Self {
        Self {
            program: program.into(),
            reporter,
        }
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// `ec2 describe-instances` restricted to running instances tagged `name`.
    pub fn describe_instances_command(&self, profile: &str, name: &str) -> AwsCommandBuilder {
        AwsCommandBuilder::new(&self.program)
            .profile(profile)
            .operation("ec2", "describe-instances")
            .query(INSTANCE_ID_QUERY)
            .filters(&[
                Filter::tag("Name", name),
                Filter::attribute("instance-state-name", RUNNING_STATE),
            ])
            .output_text()
    }

    /// `ec2 describe-vpc-endpoints` for endpoints tagged `name`.
    pub fn describe_vpc_endpoints_command(&self, profile: &str, name: &str) -> AwsCommandBuilder {
        AwsCommandBuilder::new(&self.program)
            .profile(profile)
            .operation("ec2", "describe-vpc-endpoints")
            .query(VPC_ENDPOINT_DNS_QUERY)
            .filters(&[Filter::tag("Name", name)])
            .output_text()
    }

    /// `ssm start-session` for a port-forwarding session.
    pub fn start_session_command(
        &self,
        profile: &str,
        session: &PortForwardingSession,
    ) -> Result<AwsCommandBuilder, AwsCliError> {
        Ok(AwsCommandBuilder::new(&self.program)
            .profile(profile)
            .operation("ssm", "start-session")
            .option("--target", &session.target)
            .option("--document-name", session.document_name())
            .option("--parameters", session.parameters_json()?))
    }

    /// Run a command to completion and return its trimmed stdout.
    fn capture(&self, builder: &AwsCommandBuilder) -> Result<String, AwsCliError> {
        self.reporter.detail(builder.to_command_line());
        debug!("Running {}", builder.to_command_line());

        let output = builder
            .build()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| AwsCliError::SpawnFailed {
                program: self.program_name(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!("{} failed with {:?}: {}", self.program_name(), output.status, stderr);
            return Err(AwsCliError::ExitError {
                program: self.program_name(),
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl InstanceDirectory for AwsCliClient {
    fn running_instance_ids(&self, profile: &str, name: &str) -> Result<String, AwsCliError> {
        self.capture(&self.describe_instances_command(profile, name))
    }
}

impl EndpointDirectory for AwsCliClient {
    fn vpc_endpoint_dns_name(&self, profile: &str, name: &str) -> Result<String, AwsCliError> {
        self.capture(&self.describe_vpc_endpoints_command(profile, name))
    }
}

impl SessionTransport for AwsCliClient {
    fn start_session(
        &self,
        profile: &str,
        session: &PortForwardingSession,
    ) -> Result<SessionExit, AwsCliError> {
        let builder = self.start_session_command(profile, session)?;
        self.reporter.detail(builder.to_command_line());
        info!(
            "Starting session on {} forwarding localhost:{} to {}:{}",
            session.target, session.local_port_number, session.host, session.port_number
        );

        // The transport shares our process group; an interrupt is only recorded here.
        signal::reset_interrupt();
        let status = builder
            .build()
            .status()
            .map_err(|e| AwsCliError::SpawnFailed {
                program: self.program_name(),
                source: e,
            })?;

        let interrupted = signal::is_interrupted();
        debug!(
            "Session transport exited with {:?} (interrupted: {})",
            status, interrupted
        );
        Ok(SessionExit::from_status(status, interrupted))
    }
}
