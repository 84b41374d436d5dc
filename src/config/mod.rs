//! Jump configuration for ssm-jump.
//!
//! Jumps are declared in a YAML file, `config.yaml` in the current working
//! directory by default:
//!
//! ```yaml
//! jumps:
//!   - name: db-jump
//!     target_instance_name: db-bastion
//!     remote_host: 10.0.1.5
//!     remote_port: 5432
//!     local_port: 15432
//!     aws_profile: prod
//! ```
//!
//! Parsing is strict. Unknown keys, missing fields, duplicate names and zero
//! ports all fail the load.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, EXAMPLE_CONFIG_FILE};
pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE, JumpSource};
pub use schema::{Jump, JumpFile, JumpRecord, JumpSet, RemoteHost};
