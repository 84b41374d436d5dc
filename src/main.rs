//! ssm-jump: named SSM port-forwarding tunnels
//!
//! Entry point for the ssm-jump binary. It parses the command line, sets up
//! tracing and audit telemetry, and hands off to the subcommand handler.
//!
//! # I/O Architecture
//!
//! - **Operator output**: coloured progress and failure lines on stdout/stderr
//! - **Debug logging**: `tracing` to stderr, filtered by `-v`
//! - **Audit logging**: syslog only, so it never mixes with the session
//!   transport's terminal I/O

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ssm_jump::{cli::Cli, cli_handler, report::Reporter, signal, telemetry};
use tracing::{debug, warn};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.verbose) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    debug!("Parsed CLI arguments: {:?}", cli);

    init_telemetry();
    signal::install_interrupt_handler();

    let reporter = Reporter::new(cli.verbose > 0);
    match cli_handler::handle_command(&cli, reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("Fatal {} error: {:?}", err.kind(), err);
            reporter.failure(&err);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing subscriber for debug/development logging.
///
/// This is separate from the audit telemetry which goes to syslog.
///
/// # Verbosity Levels
/// - 0 (default): Only warnings and errors
/// - 1 (-v): Info level
/// - 2 (-vv): Debug level
/// - 3+ (-vvv): Trace level
fn init_tracing(verbose: u8) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

/// Connect the audit logger, falling back to a null logger without syslog.
fn init_telemetry() {
    if let Err(e) = telemetry::init_logger() {
        warn!("Audit logging disabled: {}", e);
        if let Err(e) = telemetry::init_null_logger() {
            debug!("Null audit logger not installed: {}", e);
        }
    }
}
