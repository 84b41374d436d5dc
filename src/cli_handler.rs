//! Subcommand handling for ssm-jump.
//!
//! Wires the real collaborators (YAML loader, `aws` CLI client) into a
//! [`Dispatcher`] and runs the requested subcommand.

use tracing::debug;

use crate::aws::{AwsCliClient, SessionExit};
use crate::cli::{Cli, Commands};
use crate::config::{ConfigLoader, JumpSet};
use crate::dispatcher::Dispatcher;
use crate::error::JumpError;
use crate::report::Reporter;
use crate::resolver::TargetResolver;
use crate::tunnel::TunnelLauncher;

/// Run the subcommand selected on the command line.
pub fn handle_command(cli: &Cli, reporter: Reporter) -> Result<(), JumpError> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let client = match &cli.aws_cli {
        Some(program) => AwsCliClient::with_program(program, reporter),
        None => AwsCliClient::new(reporter),
    };
    debug!("Using config {} and AWS CLI {:?}", loader.path().display(), cli.aws_cli);

    let dispatcher = Dispatcher::new(
        &loader,
        TargetResolver::new(&client, &client, reporter),
        TunnelLauncher::new(&client, reporter),
    );

    match &cli.command {
        Commands::Jump { name } => {
            match dispatcher.run(name)? {
                SessionExit::Closed => reporter.success("Session closed"),
                SessionExit::Interrupted => reporter.success("Session interrupted"),
                SessionExit::Failed { code } => {
                    debug!("Dispatcher returned failed session with code {}", code);
                }
            }
            Ok(())
        }
        Commands::List => {
            let jumps = dispatcher.list()?;
            print!("{}", format_jump_list(&jumps));
            Ok(())
        }
    }
}

/// Render the configured jumps, one per line, in configuration order.
pub fn format_jump_list(jumps: &JumpSet) -> String {
    if jumps.is_empty() {
        return format!("No jumps configured in {}\n", jumps.source().display());
    }

    let width = jumps.iter().map(|j| j.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for jump in jumps.iter() {
        out.push_str(&format!(
            "{:<width$}  localhost:{} -> {}:{} via {} [{}]\n",
            jump.name,
            jump.local_port,
            jump.remote,
            jump.remote_port,
            jump.target_instance_name,
            jump.aws_profile,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Jump, RemoteHost};

    fn jump(name: &str, remote: RemoteHost) -> Jump {
        Jump {
            name: name.to_string(),
            target_instance_name: "bastion".to_string(),
            remote,
            remote_port: 443,
            local_port: 8443,
            aws_profile: "prod".to_string(),
        }
    }

    #[test]
    fn test_format_jump_list() {
        let jumps = JumpSet::new(
            vec![
                jump("db", RemoteHost::Direct("10.0.1.5".to_string())),
                jump("search", RemoteHost::VpcEndpoint("es-endpoint".to_string())),
            ],
            "config.yaml",
        );

        let out = format_jump_list(&jumps);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "db      localhost:8443 -> 10.0.1.5:443 via bastion [prod]",
                "search  localhost:8443 -> es-endpoint (vpc endpoint):443 via bastion [prod]",
            ]
        );
    }

    #[test]
    fn test_format_empty_jump_list() {
        let jumps = JumpSet::new(Vec::new(), "jumps.yaml");
        assert_eq!(format_jump_list(&jumps), "No jumps configured in jumps.yaml\n");
    }
}
