//! Command dispatch.
//!
//! Drives a jump through `Idle → ConfigLoaded → TargetResolved → TunnelActive`.
//! Any failure moves the dispatcher to `Failed`, remembers the stage it was in,
//! and emits a `jump_failed` audit event. No stage runs after a failure.

use std::cell::Cell;
use std::fmt;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::aws::SessionExit;
use crate::config::{JumpSet, JumpSource};
use crate::error::JumpError;
use crate::resolver::TargetResolver;
use crate::telemetry::{self, AuditEvent, TunnelOutcome};
use crate::tunnel::{TunnelError, TunnelLauncher};

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Nothing done yet.
    Idle,
    /// The jump definition was found.
    ConfigLoaded,
    /// Instance id and remote host are known.
    TargetResolved,
    /// The session transport owns the terminal.
    TunnelActive,
    /// A stage failed.
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::ConfigLoaded => "config_loaded",
            Stage::TargetResolved => "target_resolved",
            Stage::TunnelActive => "tunnel_active",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Runs jumps against injected collaborators.
pub struct Dispatcher<'a> {
    jumps: &'a dyn JumpSource,
    resolver: TargetResolver<'a>,
    launcher: TunnelLauncher<'a>,
    stage: Cell<Stage>,
    failed_at: Cell<Option<Stage>>,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher in the `Idle` stage.
    pub fn new(
        jumps: &'a dyn JumpSource,
        resolver: TargetResolver<'a>,
        launcher: TunnelLauncher<'a>,
    ) -> Self {
        Self {
            jumps,
            resolver,
            launcher,
            stage: Cell::new(Stage::Idle),
            failed_at: Cell::new(None),
        }
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage.get()
    }

    /// Stage the last failure happened in, if any.
    pub fn failed_at(&self) -> Option<Stage> {
        self.failed_at.get()
    }

    /// Load the configured jumps.
    pub fn list(&self) -> Result<JumpSet, JumpError> {
        Ok(self.jumps.load()?)
    }

    /// Resolve the named jump and hold the tunnel open until it ends.
    pub fn run(&self, name: &str) -> Result<SessionExit, JumpError> {
        self.stage.set(Stage::Idle);
        self.failed_at.set(None);

        let result = self.advance(name);
        if let Err(ref err) = result {
            let stage = self.stage();
            debug!("Jump '{}' failed in stage {}: {}", name, stage, err);
            self.failed_at.set(Some(stage));
            self.transition(Stage::Failed);

            telemetry::record(AuditEvent::JumpFailed {
                user: telemetry::current_user(),
                jump: name.to_string(),
                stage,
                kind: err.kind(),
                message: err.to_string(),
            });
        }
        result
    }

    fn advance(&self, name: &str) -> Result<SessionExit, JumpError> {
        let jumps = self.jumps.load()?;
        let jump = jumps.get(name).ok_or_else(|| JumpError::UnknownJump {
            name: name.to_string(),
            source_path: jumps.source().to_path_buf(),
        })?;
        self.transition(Stage::ConfigLoaded);

        let target = self.resolver.resolve(jump)?;
        self.transition(Stage::TargetResolved);

        telemetry::record(AuditEvent::TunnelStart {
            user: telemetry::current_user(),
            jump: jump.name.clone(),
            instance_id: target.instance_id.clone(),
            remote_host: target.remote_host.clone(),
            remote_port: jump.remote_port,
            local_port: jump.local_port,
            aws_profile: jump.aws_profile.clone(),
            pid: std::process::id(),
        });

        self.transition(Stage::TunnelActive);
        let started = Instant::now();
        let result = self.launcher.launch(target, jump);

        telemetry::record(AuditEvent::TunnelEnd {
            user: telemetry::current_user(),
            jump: jump.name.clone(),
            outcome: outcome_of(&result),
            duration_sec: started.elapsed().as_secs(),
        });

        Ok(result?)
    }

    fn transition(&self, next: Stage) {
        debug!("Stage {} -> {}", self.stage(), next);
        self.stage.set(next);
    }
}

fn outcome_of(result: &Result<SessionExit, TunnelError>) -> TunnelOutcome {
    match result {
        Ok(SessionExit::Closed) => TunnelOutcome::Closed,
        Ok(SessionExit::Interrupted) => TunnelOutcome::Interrupted,
        Ok(SessionExit::Failed { .. }) | Err(_) => TunnelOutcome::Failed,
    }
}
