//! System Command Runner
//!
//! Spawns the local shell, `ssh` and `scp` synchronously. In quiet mode
//! (JSON output) child stdout is discarded so it cannot interleave with the
//! event stream, and stderr is captured into the failure diagnostics.
//!
//! Detached remote commands run in their own process group with stdin closed
//! and `BatchMode` on, so a Ctrl-C at the terminal reaches dropship but not
//! the `ssh` client clearing or refilling the live tree.

use std::process::{Command, Output, Stdio};

use crate::domain::ports::{CommandFailure, CommandOutcome, CommandRunner, CommandSpec};

/// Command runner backed by `std::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner {
    quiet: bool,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard child stdout and capture stderr
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn build(&self, spec: &CommandSpec) -> Command {
        match spec {
            CommandSpec::Local {
                command,
                working_dir,
            } => {
                let mut cmd = local_shell(command);
                if let Some(dir) = working_dir {
                    cmd.current_dir(dir);
                }
                cmd
            }
            CommandSpec::Remote {
                host,
                command,
                detached,
            } => {
                let mut cmd = Command::new("ssh");
                if *detached {
                    cmd.args(["-o", "BatchMode=yes"]);
                    detach(&mut cmd);
                }
                cmd.arg(host.as_str()).arg(command.as_str());
                cmd
            }
            CommandSpec::Copy {
                source,
                host,
                destination,
            } => {
                let mut cmd = Command::new("scp");
                if self.quiet {
                    cmd.arg("-q");
                }
                cmd.arg(source)
                    .arg(format!("{}:{}", host.as_str(), destination.as_str()));
                cmd
            }
        }
    }

    fn failure(spec: &CommandSpec, output: &Output) -> CommandFailure {
        CommandFailure::new(
            spec.to_string(),
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        )
    }
}

#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    cmd.creation_flags(CREATE_NEW_PROCESS_GROUP);
}

#[cfg(windows)]
fn local_shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
fn local_shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> CommandOutcome {
        tracing::info!(command = %spec, "executing command");

        let mut cmd = self.build(spec);
        // A background process group reading the terminal would be stopped.
        cmd.stdin(if spec.is_detached() {
            Stdio::null()
        } else {
            Stdio::inherit()
        });
        if self.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let output = cmd
            .output()
            .map_err(|e| CommandFailure::new(spec.to_string(), None, e.to_string()))?;

        if output.status.success() {
            Ok(())
        } else {
            tracing::warn!(command = %spec, status = ?output.status.code(), "command failed");
            Err(Self::failure(spec, &output))
        }
    }

    fn capture(&self, spec: &CommandSpec) -> Result<String, CommandFailure> {
        tracing::info!(command = %spec, "executing command (captured)");

        let mut cmd = self.build(spec);
        cmd.stdin(Stdio::null()).stdout(Stdio::piped());
        if self.quiet {
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stderr(Stdio::inherit());
        }

        let output = cmd
            .output()
            .map_err(|e| CommandFailure::new(spec.to_string(), None, e.to_string()))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Self::failure(spec, &output))
        }
    }
}
