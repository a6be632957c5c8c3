//! Deploy Result
//!
//! Result types for deploy operations.

use std::time::Duration;

/// Summary of a successful deployment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    pub remote_host: String,
    pub remote_dir: String,
    /// Size of the uploaded archive
    pub archive_bytes: u64,
    /// Backup created on the server, if backups are enabled
    pub backup: Option<String>,
    /// Backups removed by rotation
    pub pruned: Vec<String>,
    /// Non-fatal problems (skipped archive entries, failed rotation)
    pub warnings: Vec<String>,
    pub elapsed: Duration,
}

impl DeployReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// How a run ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Completed(DeployReport),
    /// Operator declined the confirmation or interrupted the run
    Cancelled,
}

impl DeployOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DeployOutcome::Cancelled)
    }
}
