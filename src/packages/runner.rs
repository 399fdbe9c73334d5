//! External process execution.
//!
//! Every manager probe, package listing and app-store listing goes through
//! [`CommandRunner`], so tests can script command results and the real
//! runner can enforce a timeout and honor cancellation.

use crate::error::{HostsnapError, Result};
use crate::utils::cancel::CancelToken;
use std::io::Read;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// A program plus its arguments, kept as data so the registry can describe
/// commands without building `std::process::Command` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Parse a shell-style command line (`pacman -Qqe`)
    pub fn parse(line: &str) -> Result<Self> {
        let words = shlex::split(line).ok_or_else(|| {
            HostsnapError::ConfigError(format!(
                "Failed to parse command '{}': Invalid quoting or escaping",
                line
            ))
        })?;

        let (program, args) = words
            .split_first()
            .ok_or_else(|| HostsnapError::ConfigError("Command must not be empty".to_string()))?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

pub trait CommandRunner {
    /// Run a command to completion and capture its output.
    ///
    /// `Err` means the command could not run at all (missing binary,
    /// timeout, interruption). A command that ran and exited non-zero is
    /// `Ok` with `success == false`.
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;

    /// Whether `program` can be found on `PATH`
    fn is_installed(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Runs real processes with a timeout, polling the cancellation token.
pub struct SystemRunner {
    timeout: Duration,
    cancel: CancelToken,
}

impl SystemRunner {
    pub fn new(timeout: Duration, cancel: CancelToken) -> Self {
        Self { timeout, cancel }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.cancel.check()?;

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);

        let output = run_command_with_timeout(&mut cmd, &spec.display(), self.timeout, &self.cancel)?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Execute a command with timeout (non-interactive)
fn run_command_with_timeout(
    cmd: &mut Command,
    display: &str,
    timeout: Duration,
    cancel: &CancelToken,
) -> Result<Output> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    // Own process group, so helpers forked by the command die with it
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let mut child = cmd.spawn().map_err(|e| HostsnapError::SystemCommandFailed {
        command: display.to_string(),
        reason: e.to_string(),
    })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| HostsnapError::SystemCommandFailed {
            command: display.to_string(),
            reason: "Failed to capture stdout".to_string(),
        })?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| HostsnapError::SystemCommandFailed {
            command: display.to_string(),
            reason: "Failed to capture stderr".to_string(),
        })?;

    // Pipes must be drained while the child runs
    let stdout_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stdout).read_to_end(&mut buf);
        buf
    });
    let stderr_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stderr).read_to_end(&mut buf);
        buf
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                let timed_out = start.elapsed() > timeout;
                if timed_out || cancel.is_cancelled() {
                    kill_process_tree(&mut child);
                    // A surviving grandchild may still hold the pipes open;
                    // the reader threads are left to finish on their own.
                    drop(stdout_thread);
                    drop(stderr_thread);

                    if timed_out {
                        return Err(HostsnapError::CommandTimedOut {
                            command: display.to_string(),
                            seconds: timeout.as_secs(),
                        });
                    }
                    return Err(HostsnapError::Interrupted);
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return Err(HostsnapError::SystemCommandFailed {
                    command: display.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

fn kill_process_tree(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;

        if let Ok(pid) = i32::try_from(child.id()) {
            let _ = killpg(Pid::from_raw(pid), Signal::SIGKILL);
        }
    }

    let _ = child.kill();
    let _ = child.wait();
}
