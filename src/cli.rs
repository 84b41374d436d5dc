//! Command-line interface definitions for ssm-jump.
//!
//! Uses clap's derive API for type-safe argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Open SSM port-forwarding tunnels by name.
///
/// ssm-jump looks up a named jump in a YAML file, finds the running bastion
/// instance tagged with the jump's instance name (and, for VPC endpoints, the
/// endpoint's DNS name), then starts an SSM session forwarding a local port
/// to the remote host.
#[derive(Parser, Debug)]
#[command(name = "ssm-jump")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the jump definitions file.
    ///
    /// Defaults to `config.yaml` in the current directory.
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// AWS CLI program to run instead of `aws` from PATH.
    #[arg(long = "aws-cli", value_name = "PATH", global = true)]
    pub aws_cli: Option<PathBuf>,

    /// Increase verbosity.
    ///
    /// Any -v echoes the AWS CLI commands and their raw results.
    /// Can be specified multiple times:
    /// -v    = info level
    /// -vv   = debug level
    /// -vvv  = trace level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true
    )]
    pub verbose: u8,
}

/// Subcommands for ssm-jump.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the tunnel for a named jump.
    Jump {
        /// Name of the jump to open.
        name: String,
    },

    /// Print the configured jumps.
    List,
}
