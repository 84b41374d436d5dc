#![cfg(unix)]

use std::fs;
use std::io::Read;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_ssm-jump");
const TIMEOUT: Duration = Duration::from_secs(30);

const CONFIG: &str = r#"
jumps:
  - name: db-jump
    target_instance_name: db-bastion
    remote_host: 10.0.1.5
    remote_port: 5432
    local_port: 15432
    aws_profile: prod
"#;

/// Temp working directory holding `config.yaml` and a stand-in `aws` script.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// `session` is the shell snippet run for `ssm start-session`.
    fn new(lookup: &str, session: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(dir.path().join("config.yaml"), CONFIG).expect("Failed to write config");

        let script = format!(
            "#!/bin/sh\ncase \"$*\" in\n  *describe-instances*)\n    {lookup}\n    ;;\n  *start-session*)\n    {session}\n    ;;\nesac\n"
        );
        let aws = dir.path().join("aws");
        fs::write(&aws, script).expect("Failed to write aws stand-in");
        fs::set_permissions(&aws, fs::Permissions::from_mode(0o755))
            .expect("Failed to make aws stand-in executable");

        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(BIN);
        cmd.current_dir(self.dir.path())
            .arg("--aws-cli")
            .arg(self.path("aws"))
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

fn wait_with_timeout(child: &mut Child) -> ExitStatus {
    let deadline = Instant::now() + TIMEOUT;
    loop {
        if let Some(status) = child.try_wait().expect("Failed to poll ssm-jump") {
            return status;
        }
        if Instant::now() > deadline {
            let _ = child.kill();
            panic!("ssm-jump did not exit within {:?}", TIMEOUT);
        }
        thread::sleep(Duration::from_millis(50));
    }
}

fn run(ws: &Workspace, args: &[&str]) -> (ExitStatus, String, String) {
    let mut child = ws.command(args).spawn().expect("Failed to spawn ssm-jump");
    let status = wait_with_timeout(&mut child);
    (status, read_all(child.stdout.take()), read_all(child.stderr.take()))
}

fn read_all(stream: Option<impl Read>) -> String {
    let mut out = String::new();
    if let Some(mut stream) = stream {
        stream.read_to_string(&mut out).expect("Failed to read output");
    }
    out
}

#[test]
fn test_clean_session_close_exits_zero() {
    let ws = Workspace::new("echo i-0abc", "exit 0");

    let (status, stdout, _) = run(&ws, &["jump", "db-jump"]);

    assert_eq!(status.code(), Some(0));
    assert!(stdout.contains("Establishing an SSM session"));
    assert!(stdout.contains("Session closed"));
}

#[test]
fn test_unknown_jump_exits_one() {
    let ws = Workspace::new("echo i-0abc", "exit 0");

    let (status, _, stderr) = run(&ws, &["jump", "nope"]);

    assert_eq!(status.code(), Some(1));
    assert!(stderr.contains("Jump nope not specified in config.yaml"));
}

#[test]
fn test_failing_lookup_exits_one() {
    let ws = Workspace::new("echo 'Unable to locate credentials' >&2; exit 255", "exit 0");

    let (status, stdout, stderr) = run(&ws, &["jump", "db-jump"]);

    assert_eq!(status.code(), Some(1));
    assert!(stderr.contains("Failed to lookup the instance ID of db-bastion"));
    assert!(!stdout.contains("Establishing an SSM session"));
}

#[test]
fn test_failed_session_exits_one() {
    let ws = Workspace::new("echo i-0abc", "exit 254");

    let (status, _, stderr) = run(&ws, &["jump", "db-jump"]);

    assert_eq!(status.code(), Some(1));
    assert!(stderr.contains("Failed to establish an SSM session"));
}

#[test]
fn test_list_exits_zero() {
    let ws = Workspace::new("exit 255", "exit 255");

    let (status, stdout, _) = run(&ws, &["list"]);

    assert_eq!(status.code(), Some(0));
    assert!(stdout.contains("db-jump"));
    assert!(stdout.contains("10.0.1.5:5432"));
}

#[test]
fn test_ctrl_c_during_session_exits_zero() {
    let marker = "session-started";
    let ws = Workspace::new(
        "echo i-0abc",
        &format!("trap 'exit 130' INT; touch {marker}; while :; do sleep 1; done"),
    );

    // Own process group, standing in for the terminal's foreground group.
    let mut child = ws
        .command(&["jump", "db-jump"])
        .process_group(0)
        .spawn()
        .expect("Failed to spawn ssm-jump");

    let deadline = Instant::now() + TIMEOUT;
    while !ws.path(marker).exists() {
        if Instant::now() > deadline {
            let _ = child.kill();
            panic!("session never started");
        }
        thread::sleep(Duration::from_millis(50));
    }

    killpg(Pid::from_raw(child.id() as i32), Signal::SIGINT).expect("Failed to send SIGINT");
    let status = wait_with_timeout(&mut child);
    let stdout = read_all(child.stdout.take());

    assert_eq!(status.code(), Some(0));
    assert!(stdout.contains("Session interrupted"));
}
