//! User-facing terminal output.
//!
//! Progress, diagnostics and failures are written for the operator, separately
//! from `tracing` diagnostics:
//!
//! - steps (magenta): what the pipeline is doing right now
//! - details (cyan, verbose only): exact AWS CLI invocations and raw results
//! - success notes (green)
//! - failures (red, stderr)

use std::fmt::Display;

use owo_colors::OwoColorize;

/// Writes styled messages for the operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    verbose: bool,
    silent: bool,
}

impl Reporter {
    /// Create a reporter; `verbose` enables [`Reporter::detail`] output.
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            silent: false,
        }
    }

    /// A reporter that prints nothing, for tests and embedding.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            verbose: false,
            silent: true,
        }
    }

    /// Whether verbose details are shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.silent
    }

    /// Announce a pipeline step.
    pub fn step(&self, message: impl Display) {
        if !self.silent {
            println!("{}", message.to_string().magenta());
        }
    }

    /// Print a diagnostic line in verbose mode.
    pub fn detail(&self, message: impl Display) {
        if self.is_verbose() {
            println!("{}", message.to_string().cyan());
        }
    }

    /// Print a success note.
    pub fn success(&self, message: impl Display) {
        if !self.silent {
            println!("{}", message.to_string().green());
        }
    }

    /// Print a terminal failure to stderr.
    pub fn failure(&self, message: impl Display) {
        if !self.silent {
            eprintln!("{}", message.to_string().red());
        }
    }
}
