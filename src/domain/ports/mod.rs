//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod archiver;
pub mod clock;
pub mod command_runner;
pub mod confirmer;
pub mod deploy_events;

pub use archiver::{ArchiveError, ArchiveEvent, ArchiveProgress, ArchiveSummary, Archiver};
pub use clock::{Clock, SystemClock};
pub use command_runner::{CommandFailure, CommandOutcome, CommandRunner, CommandSpec};
pub use confirmer::{ConfirmationRequest, Confirmer};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink, Stage};
