//! ssm-jump: named SSM port-forwarding tunnels
//!
//! Resolves a named jump from a YAML file to a live target and opens an AWS
//! Systems Manager port-forwarding session to it.
//!
//! # Pipeline
//!
//! 1. **Config**: load and validate the jump definitions, pick one by name
//! 2. **Resolver**: find the single running instance tagged with the jump's
//!    instance name; for VPC endpoints, look up the endpoint's DNS name
//! 3. **Tunnel**: start the port-forwarding session and block until it ends
//!
//! The [`dispatcher`] drives these stages. AWS access sits behind the traits
//! in [`aws`] so the pipeline can run against in-memory fakes.

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod aws;
pub mod cli;
pub mod cli_handler;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod report;
pub mod resolver;
pub mod signal;
pub mod telemetry;
pub mod tunnel;
