//! Error types for Dropship
//!
//! Library errors are typed with `thiserror`; the binary maps them to exit codes.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::{ArchiveError, CommandFailure, Stage};

/// Result type alias for Dropship operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for a deployment run.
///
/// Operator cancellation is deliberately absent: it is reported as
/// [`crate::application::DeployOutcome::Cancelled`].
#[derive(Error, Debug)]
pub enum DeployError {
    /// Missing or unsafe configuration, detected before any side effect
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Build command exited unsuccessfully
    #[error("build failed: {0}")]
    Build(CommandFailure),

    /// Expected build output directory is absent
    #[error("build output not found at {}", path.display())]
    ArtifactMissing { path: PathBuf, build_skipped: bool },

    /// Archive could not be produced
    #[error("compression failed: {0}")]
    Compression(#[from] ArchiveError),

    /// A remote execution or copy step failed
    #[error("{stage} failed: {failure}")]
    RemoteCommand {
        stage: Stage,
        failure: CommandFailure,
    },

    /// Prompting the operator failed
    #[error("confirmation prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// Local IO error outside the archiver
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// Command text or path the operator should look at, if any.
    pub fn offending_target(&self) -> Option<String> {
        match self {
            DeployError::Build(failure) => Some(failure.command.clone()),
            DeployError::RemoteCommand { failure, .. } => Some(failure.command.clone()),
            DeployError::ArtifactMissing { path, .. } => Some(path.display().to_string()),
            DeployError::Compression(err) => err.path().map(|p| p.display().to_string()),
            _ => None,
        }
    }

    /// Follow-up hint rendered under the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DeployError::Configuration(ConfigError::Usage(_)) => Some("Run with --help for usage"),
            DeployError::Configuration(_) => {
                Some("Check the env file for this mode and re-run")
            }
            DeployError::ArtifactMissing {
                build_skipped: true,
                ..
            } => Some("Run without --skip-build or build the project first"),
            DeployError::ArtifactMissing { .. } => {
                Some("Check that BUILD_COMMAND writes to DIST_PATH")
            }
            DeployError::RemoteCommand { .. } => {
                Some("Check ssh access to the server (key auth, host reachable)")
            }
            _ => None,
        }
    }
}
