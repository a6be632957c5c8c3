//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON representation of a single event
pub fn event_to_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::StageStarted { stage } => serde_json::json!({
            "event": "stage_start",
            "stage": stage.id(),
        }),

        DeployEvent::StageSkipped { stage, reason } => serde_json::json!({
            "event": "stage_skipped",
            "stage": stage.id(),
            "reason": reason,
        }),

        DeployEvent::StageCompleted { stage } => serde_json::json!({
            "event": "stage_complete",
            "stage": stage.id(),
        }),

        DeployEvent::StageFailed { stage, message } => serde_json::json!({
            "event": "stage_failed",
            "stage": stage.id(),
            "message": message,
        }),

        DeployEvent::CommandStarted { command, remote } => serde_json::json!({
            "event": "command",
            "command": command,
            "remote": remote,
        }),

        DeployEvent::ArchiveProgress { processed, total } => serde_json::json!({
            "event": "progress",
            "processed": processed,
            "total": total,
        }),

        DeployEvent::ArchiveCreated { path, bytes } => serde_json::json!({
            "event": "archive_created",
            "path": path.display().to_string(),
            "bytes": bytes,
        }),

        DeployEvent::BackupCreated { name } => serde_json::json!({
            "event": "backup_created",
            "name": name,
        }),

        DeployEvent::BackupsRotated { kept, pruned } => serde_json::json!({
            "event": "backups_rotated",
            "kept": kept,
            "pruned": pruned,
        }),

        DeployEvent::Warning { message } => serde_json::json!({
            "event": "warning",
            "message": message,
        }),

        DeployEvent::Cancelled => serde_json::json!({
            "event": "complete",
            "status": "cancelled",
        }),

        DeployEvent::Completed {
            archive_bytes,
            backup,
            pruned,
        } => serde_json::json!({
            "event": "complete",
            "status": "success",
            "archive_bytes": archive_bytes,
            "backup": backup,
            "pruned": pruned,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_to_json(&event));
    }
}
