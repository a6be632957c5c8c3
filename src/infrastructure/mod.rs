//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `process/` - Local shell, `ssh` and `scp` execution
//! - `archive/` - Zip archiver
//! - `fs/` - Temporary archive guard and cleanup registry
//! - `prompt/` - Operator confirmation
//! - `events/` - NDJSON event sink
//! - `signal` - Interrupt handler

pub mod archive;
pub mod events;
pub mod fs;
pub mod process;
pub mod prompt;
pub mod signal;

pub use archive::ZipArchiver;
pub use events::JsonEventSink;
pub use fs::{CleanupRegistry, TempArchive};
pub use process::SystemCommandRunner;
pub use prompt::{InteractiveConfirmer, LineConfirmer, OperatorConfirmer};
pub use signal::install_interrupt_handler;
