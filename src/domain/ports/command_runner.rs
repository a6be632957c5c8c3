//! Command Runner Port
//!
//! Every process the deployment spawns goes through this port: the build
//! command, remote shell commands over ssh and the scp upload.

use std::fmt;
use std::path::PathBuf;

use crate::domain::value_objects::{RemoteHost, RemotePath, ShellCommand};

/// A process invocation, described without spawning it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Operator-supplied command run by the local shell
    Local {
        command: String,
        working_dir: Option<PathBuf>,
    },
    /// Command line executed by the remote login shell
    Remote {
        host: RemoteHost,
        command: ShellCommand,
        /// Keep the local client out of the terminal's process group so an
        /// interrupt cannot kill it halfway through
        detached: bool,
    },
    /// Copy one local file to `host:destination`
    Copy {
        source: PathBuf,
        host: RemoteHost,
        destination: RemotePath,
    },
}

impl CommandSpec {
    pub fn local(command: impl Into<String>, working_dir: Option<PathBuf>) -> Self {
        CommandSpec::Local {
            command: command.into(),
            working_dir,
        }
    }

    pub fn remote(host: &RemoteHost, command: ShellCommand) -> Self {
        CommandSpec::Remote {
            host: host.clone(),
            command,
            detached: false,
        }
    }

    /// A remote command that must run to completion once started.
    pub fn remote_detached(host: &RemoteHost, command: ShellCommand) -> Self {
        CommandSpec::Remote {
            host: host.clone(),
            command,
            detached: true,
        }
    }

    pub fn copy(source: impl Into<PathBuf>, host: &RemoteHost, destination: RemotePath) -> Self {
        CommandSpec::Copy {
            source: source.into(),
            host: host.clone(),
            destination,
        }
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self, CommandSpec::Local { .. })
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, CommandSpec::Remote { detached: true, .. })
    }
}

/// Rendered as the operator would type it.
impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandSpec::Local { command, .. } => f.write_str(command),
            CommandSpec::Remote { host, command, .. } => {
                write!(f, "ssh {} \"{}\"", host, command)
            }
            CommandSpec::Copy {
                source,
                host,
                destination,
            } => write!(f, "scp {} {}:{}", source.display(), host, destination),
        }
    }
}

/// Structured failure of a spawned command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    /// Rendered command text
    pub command: String,
    /// Exit status, absent when the process never ran or was killed by a signal
    pub status: Option<i32>,
    /// Captured diagnostic output or spawn error
    pub diagnostics: String,
}

impl CommandFailure {
    pub fn new(command: impl Into<String>, status: Option<i32>, diagnostics: String) -> Self {
        Self {
            command: command.into(),
            status,
            diagnostics,
        }
    }
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnostics = self.diagnostics.trim();
        match (self.status, diagnostics.is_empty()) {
            (Some(code), true) => write!(f, "`{}` exited with status {}", self.command, code),
            (Some(code), false) => write!(
                f,
                "`{}` exited with status {}: {}",
                self.command, code, diagnostics
            ),
            (None, false) => write!(f, "`{}` failed: {}", self.command, diagnostics),
            (None, true) => write!(f, "`{}` was terminated by a signal", self.command),
        }
    }
}

impl std::error::Error for CommandFailure {}

/// Success, or a failure the caller decides how to treat
pub type CommandOutcome = Result<(), CommandFailure>;

/// Synchronous process execution
pub trait CommandRunner {
    /// Run with inherited stdin/stdout/stderr.
    fn run(&self, spec: &CommandSpec) -> CommandOutcome;

    /// Run and return captured stdout; stderr stays attached to the console.
    fn capture(&self, spec: &CommandSpec) -> Result<String, CommandFailure>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, spec: &CommandSpec) -> CommandOutcome {
        (**self).run(spec)
    }

    fn capture(&self, spec: &CommandSpec) -> Result<String, CommandFailure> {
        (**self).capture(spec)
    }
}
