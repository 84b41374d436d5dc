//! Configuration schema definitions.
//!
//! The on-disk document is a YAML file with a single top-level `jumps` list:
//!
//! ```yaml
//! jumps:
//!   - name: db-jump
//!     target_instance_name: db-bastion
//!     remote_host: 10.0.1.5
//!     remote_port: 5432
//!     local_port: 15432
//!     aws_profile: prod
//!     remote_host_is_a_vpc_endpoint: false
//! ```
//!
//! [`JumpFile`] and [`JumpRecord`] mirror that document exactly and reject
//! unknown keys. They are converted into the domain types [`Jump`] and
//! [`JumpSet`] by the loader after validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct JumpFile {
    /// Jump records in file order.
    pub jumps: Vec<JumpRecord>,
}

/// A single jump record as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct JumpRecord {
    /// Name of the jump.
    pub name: String,
    /// Value of the `Name` tag of the instance to tunnel through.
    pub target_instance_name: String,
    /// Remote host, or VPC endpoint name when the flag below is set.
    pub remote_host: String,
    /// Port on the remote host.
    pub remote_port: u16,
    /// Local port to bind.
    pub local_port: u16,
    /// AWS profile for every AWS call made for this jump.
    pub aws_profile: String,
    /// Resolve `remote_host` as the `Name` tag of a VPC endpoint.
    #[serde(default)]
    pub remote_host_is_a_vpc_endpoint: bool,
}

/// Where the tunnel should forward to, as seen from the target instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteHost {
    /// A literal hostname or IP address.
    Direct(String),
    /// The `Name` tag of a VPC endpoint whose DNS name must be looked up.
    VpcEndpoint(String),
}

impl RemoteHost {
    /// The configured value: the host itself or the endpoint's name.
    pub fn as_str(&self) -> &str {
        match self {
            RemoteHost::Direct(host) => host,
            RemoteHost::VpcEndpoint(name) => name,
        }
    }

    /// Whether this host needs an endpoint lookup.
    pub fn is_vpc_endpoint(&self) -> bool {
        matches!(self, RemoteHost::VpcEndpoint(_))
    }
}

impl fmt::Display for RemoteHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())?;
        if self.is_vpc_endpoint() {
            f.write_str(" (vpc endpoint)")?;
        }
        Ok(())
    }
}

/// A named, pre-configured tunnel target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jump {
    /// Unique name of the jump.
    pub name: String,
    /// `Name` tag of the instance the session is opened on.
    pub target_instance_name: String,
    /// Host to forward to.
    pub remote: RemoteHost,
    /// Port on the remote host.
    pub remote_port: u16,
    /// Local port to bind.
    pub local_port: u16,
    /// AWS profile passed to every AWS call.
    pub aws_profile: String,
}

impl From<JumpRecord> for Jump {
    fn from(record: JumpRecord) -> Self {
        let remote = if record.remote_host_is_a_vpc_endpoint {
            RemoteHost::VpcEndpoint(record.remote_host)
        } else {
            RemoteHost::Direct(record.remote_host)
        };

        Self {
            name: record.name,
            target_instance_name: record.target_instance_name,
            remote,
            remote_port: record.remote_port,
            local_port: record.local_port,
            aws_profile: record.aws_profile,
        }
    }
}

/// The loaded set of jumps, in file order, with unique names.
#[derive(Debug, Clone, Default)]
pub struct JumpSet {
    jumps: Vec<Jump>,
    source: PathBuf,
}

impl JumpSet {
    /// Build a set from already-validated jumps.
    ///
    /// Callers are responsible for name uniqueness; the loader enforces it.
    pub fn new(jumps: Vec<Jump>, source: impl Into<PathBuf>) -> Self {
        Self {
            jumps,
            source: source.into(),
        }
    }

    /// Look up a jump by exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Option<&Jump> {
        self.jumps.iter().find(|jump| jump.name == name)
    }

    /// Iterate over jumps in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Jump> {
        self.jumps.iter()
    }

    /// Jump names in file order.
    pub fn names(&self) -> Vec<&str> {
        self.jumps.iter().map(|jump| jump.name.as_str()).collect()
    }

    /// Number of jumps.
    pub fn len(&self) -> usize {
        self.jumps.len()
    }

    /// Whether no jumps are configured.
    pub fn is_empty(&self) -> bool {
        self.jumps.is_empty()
    }

    /// File the set was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vpc: bool) -> JumpRecord {
        JumpRecord {
            name: "search".to_string(),
            target_instance_name: "bastion".to_string(),
            remote_host: "search-endpoint".to_string(),
            remote_port: 443,
            local_port: 9443,
            aws_profile: "staging".to_string(),
            remote_host_is_a_vpc_endpoint: vpc,
        }
    }

    #[test]
    fn test_record_to_direct_jump() {
        let jump = Jump::from(record(false));
        assert_eq!(jump.remote, RemoteHost::Direct("search-endpoint".to_string()));
        assert!(!jump.remote.is_vpc_endpoint());
    }

    #[test]
    fn test_record_to_vpc_endpoint_jump() {
        let jump = Jump::from(record(true));
        assert_eq!(
            jump.remote,
            RemoteHost::VpcEndpoint("search-endpoint".to_string())
        );
        assert!(jump.remote.is_vpc_endpoint());
        assert_eq!(jump.remote.as_str(), "search-endpoint");
    }

    #[test]
    fn test_vpc_flag_defaults_to_false() {
        let yaml = r#"
name: db
target_instance_name: bastion
remote_host: 10.0.0.1
remote_port: 5432
local_port: 5432
aws_profile: default
"#;
        let parsed: JumpRecord = serde_yaml::from_str(yaml).unwrap();
        assert!(!parsed.remote_host_is_a_vpc_endpoint);
    }

    #[test]
    fn test_unknown_record_field_rejected() {
        let yaml = r#"
name: db
target_instance_name: bastion
remote_host: 10.0.0.1
remote_port: 5432
local_port: 5432
aws_profile: default
region: eu-west-1
"#;
        let parsed: Result<JumpRecord, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_remote_host_display() {
        assert_eq!(RemoteHost::Direct("10.0.0.1".to_string()).to_string(), "10.0.0.1");
        assert_eq!(
            RemoteHost::VpcEndpoint("es".to_string()).to_string(),
            "es (vpc endpoint)"
        );
    }

    #[test]
    fn test_jump_set_lookup_is_case_sensitive() {
        let set = JumpSet::new(vec![Jump::from(record(false))], "config.yaml");
        assert!(set.get("search").is_some());
        assert!(set.get("Search").is_none());
        assert!(set.get("sear").is_none());
        assert_eq!(set.names(), vec!["search"]);
        assert_eq!(set.source(), Path::new("config.yaml"));
    }
}
