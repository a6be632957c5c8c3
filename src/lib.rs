//! Dropship - static site deployment over ssh
//!
//! Dropship builds a project, packs its output into a zip archive, uploads it
//! with `scp`, keeps a rotating set of timestamped backups on the server, then
//! replaces the live tree with the archive contents.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{CancelToken, DeployOutcome, DeployReport, DeployRequest, DeployUseCase};
pub use config::{ConfigError, DeployFlags, DeploymentConfig, Mode};
pub use domain::ports::{DeployEvent, DeployEventSink, Stage};
pub use error::{DeployError, DeployResult};
