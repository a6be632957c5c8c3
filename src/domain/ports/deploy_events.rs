//! Deploy Event Port
//!
//! Provides an observable interface for the deployment pipeline.
//! Enables console progress, NDJSON event streams, and an audit trail of
//! every command issued.

use std::fmt;
use std::path::PathBuf;

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Validate,
    Build,
    VerifyArtifact,
    Confirm,
    Archive,
    PrepareRemote,
    Upload,
    Backup,
    ClearRemoteTree,
    Extract,
    LocalCleanup,
}

impl Stage {
    /// Stable machine-readable name
    pub fn id(self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::Build => "build",
            Stage::VerifyArtifact => "verify_artifact",
            Stage::Confirm => "confirm",
            Stage::Archive => "archive",
            Stage::PrepareRemote => "prepare_remote",
            Stage::Upload => "upload",
            Stage::Backup => "backup",
            Stage::ClearRemoteTree => "clear_remote_tree",
            Stage::Extract => "extract",
            Stage::LocalCleanup => "local_cleanup",
        }
    }

    /// Human-readable description
    pub fn title(self) -> &'static str {
        match self {
            Stage::Validate => "Validating configuration",
            Stage::Build => "Building project",
            Stage::VerifyArtifact => "Checking build output",
            Stage::Confirm => "Waiting for confirmation",
            Stage::Archive => "Compressing build output",
            Stage::PrepareRemote => "Preparing remote directory",
            Stage::Upload => "Uploading archive",
            Stage::Backup => "Creating backup",
            Stage::ClearRemoteTree => "Clearing remote directory",
            Stage::Extract => "Extracting on server",
            Stage::LocalCleanup => "Removing local archive",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Event emitted during a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Stage began
    StageStarted { stage: Stage },

    /// Stage was skipped by a flag
    StageSkipped { stage: Stage, reason: &'static str },

    /// Stage finished successfully
    StageCompleted { stage: Stage },

    /// Stage failed; the run aborts after local cleanup
    StageFailed { stage: Stage, message: String },

    /// A process is about to be spawned
    CommandStarted { command: String, remote: bool },

    /// Compression progress (entry counts)
    ArchiveProgress { processed: u64, total: u64 },

    /// Archive written to the local temp directory
    ArchiveCreated { path: PathBuf, bytes: u64 },

    /// Backup copy materialized on the server
    BackupCreated { name: String },

    /// Old backups removed by rotation
    BackupsRotated { kept: usize, pruned: Vec<String> },

    /// Non-fatal problem (skipped archive entry, failed rotation, ...)
    Warning { message: String },

    /// Operator declined or interrupted
    Cancelled,

    /// Deployment finished
    Completed {
        archive_bytes: u64,
        backup: Option<String>,
        pruned: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants high-frequency events (compression progress)
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Test event sink that records all events
    struct RecordingEventSink {
        events: Arc<Mutex<Vec<DeployEvent>>>,
    }

    impl DeployEventSink for RecordingEventSink {
        fn on_event(&self, event: DeployEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingEventSink {
            events: events.clone(),
        };

        sink.on_event(DeployEvent::StageStarted {
            stage: Stage::Upload,
        });
        sink.on_event(DeployEvent::CommandStarted {
            command: "scp a b:c".to_string(),
            remote: true,
        });

        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn noop_sink_wants_no_details() {
        assert!(!NoopEventSink.wants_detailed_events());
    }

    #[test]
    fn stage_ids_are_snake_case() {
        assert_eq!(Stage::ClearRemoteTree.to_string(), "clear_remote_tree");
        assert_eq!(Stage::VerifyArtifact.id(), "verify_artifact");
    }
}
