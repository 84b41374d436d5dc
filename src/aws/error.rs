//! Error types for AWS CLI invocations.

use thiserror::Error;

/// Errors raised while driving the `aws` CLI.
#[derive(Debug, Error)]
pub enum AwsCliError {
    /// The program could not be started at all.
    #[error("Failed to run {program}: {source}")]
    SpawnFailed {
        /// Program that was invoked.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("{program} exited with {}: {stderr}", exit_description(.code))]
    ExitError {
        /// Program that was invoked.
        program: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// Failed to encode session parameters.
    #[error("Failed to encode session parameters: {0}")]
    Parameters(#[from] serde_json::Error),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_error_display() {
        let err = AwsCliError::ExitError {
            program: "aws".to_string(),
            code: Some(255),
            stderr: "The config profile (prod) could not be found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("code 255"));
        assert!(msg.contains("could not be found"));
    }

    #[test]
    fn test_exit_error_by_signal_display() {
        let err = AwsCliError::ExitError {
            program: "aws".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("a signal"));
    }

    #[test]
    fn test_spawn_failed_display() {
        let err = AwsCliError::SpawnFailed {
            program: "/opt/aws/bin/aws".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        assert!(err.to_string().contains("/opt/aws/bin/aws"));
    }
}
