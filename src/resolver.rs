//! Jump target resolution.
//!
//! Turns a [`Jump`] into a [`ResolvedTarget`]: the id of the single running
//! instance carrying the jump's `Name` tag, and the host to forward to. The
//! host is either used verbatim or, for VPC endpoints, looked up as the
//! endpoint's first DNS name. The instance lookup always runs first.

use thiserror::Error;
use tracing::debug;

use crate::aws::{AwsCliError, EndpointDirectory, InstanceDirectory};
use crate::config::{Jump, RemoteHost};
use crate::report::Reporter;

/// Text the AWS CLI prints for a null projection in text output.
const NULL_TEXT_OUTPUT: &str = "None";

/// A jump resolved to something the tunnel can be opened against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Id of the instance to open the session on.
    pub instance_id: String,
    /// Host to forward to, as reachable from the instance.
    pub remote_host: String,
}

/// Errors raised while resolving a jump.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No running instance carries the tag.
    #[error("Could not find instance ID for {name}")]
    InstanceNotFound {
        /// Tag value that was searched for.
        name: String,
    },

    /// More than one running instance carries the tag.
    #[error(
        "Found more than one running instance named {name} ({}). This is not supported.",
        .instance_ids.join(", ")
    )]
    AmbiguousInstance {
        /// Tag value that was searched for.
        name: String,
        /// Every id the directory returned.
        instance_ids: Vec<String>,
    },

    /// No VPC endpoint carries the tag, or it has no DNS entry.
    #[error("Could not find DNS for {name}")]
    EndpointNotFound {
        /// Tag value that was searched for.
        name: String,
    },

    /// The directory call itself failed.
    #[error("Failed to lookup the {what} of {name}: {source}")]
    Lookup {
        /// What was being looked up.
        what: LookupKind,
        /// Tag value that was searched for.
        name: String,
        /// The underlying CLI error.
        #[source]
        source: AwsCliError,
    },
}

/// Which lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Instance id lookup.
    InstanceId,
    /// VPC endpoint DNS lookup.
    EndpointDns,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKind::InstanceId => write!(f, "instance ID"),
            LookupKind::EndpointDns => write!(f, "DNS"),
        }
    }
}

/// Resolves jumps through the instance and endpoint directories.
pub struct TargetResolver<'a> {
    instances: &'a dyn InstanceDirectory,
    endpoints: &'a dyn EndpointDirectory,
    reporter: Reporter,
}

impl<'a> TargetResolver<'a> {
    /// Create a resolver over the given directories.
    pub fn new(
        instances: &'a dyn InstanceDirectory,
        endpoints: &'a dyn EndpointDirectory,
        reporter: Reporter,
    ) -> Self {
        Self {
            instances,
            endpoints,
            reporter,
        }
    }

    /// Resolve a jump to an instance id and remote host.
    pub fn resolve(&self, jump: &Jump) -> Result<ResolvedTarget, ResolveError> {
        let instance_id = self.resolve_instance_id(&jump.target_instance_name, &jump.aws_profile)?;

        let remote_host = match &jump.remote {
            RemoteHost::Direct(host) => host.clone(),
            RemoteHost::VpcEndpoint(name) => {
                self.resolve_vpc_endpoint_dns(name, &jump.aws_profile)?
            }
        };

        debug!(
            "Resolved jump '{}' to instance {} and host {}",
            jump.name, instance_id, remote_host
        );
        Ok(ResolvedTarget {
            instance_id,
            remote_host,
        })
    }

    /// Find the single running instance whose `Name` tag is `name`.
    pub fn resolve_instance_id(&self, name: &str, profile: &str) -> Result<String, ResolveError> {
        self.reporter
            .step(format!("Looking up the instance ID of {}", name));

        let output = self
            .instances
            .running_instance_ids(profile, name)
            .map_err(|e| ResolveError::Lookup {
                what: LookupKind::InstanceId,
                name: name.to_string(),
                source: e,
            })?;
        self.reporter.detail(format!("instance_id={:?}", output));

        let mut ids: Vec<String> = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        match ids.len() {
            0 => Err(ResolveError::InstanceNotFound {
                name: name.to_string(),
            }),
            1 => Ok(ids.remove(0)),
            _ => Err(ResolveError::AmbiguousInstance {
                name: name.to_string(),
                instance_ids: ids,
            }),
        }
    }

    /// Find the DNS name of the VPC endpoint whose `Name` tag is `name`.
    pub fn resolve_vpc_endpoint_dns(
        &self,
        name: &str,
        profile: &str,
    ) -> Result<String, ResolveError> {
        self.reporter
            .step(format!("Looking up the DNS from VPC endpoint {}", name));

        let output = self
            .endpoints
            .vpc_endpoint_dns_name(profile, name)
            .map_err(|e| ResolveError::Lookup {
                what: LookupKind::EndpointDns,
                name: name.to_string(),
                source: e,
            })?;
        self.reporter.detail(format!("dns_name={:?}", output));

        let dns_name = output.trim();
        if dns_name.is_empty() || dns_name == NULL_TEXT_OUTPUT {
            return Err(ResolveError::EndpointNotFound {
                name: name.to_string(),
            });
        }

        Ok(dns_name.to_string())
    }
}
