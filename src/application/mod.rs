//! Application Layer
//!
//! Use cases that orchestrate the deployment flow.
//! This layer:
//! - Depends on Domain layer (value objects, policies, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Build, package, upload, back up and swap the remote tree
//!
//! ## Services
//!
//! - `RemoteBackupManager` - Remote backup creation and rotation
//! - `remote_tree` - Command lines that clear and repopulate the live tree

mod audited;
pub mod backup;
mod cancel;
pub mod deploy;
pub mod remote_tree;

pub use audited::AuditedRunner;
pub use backup::{RemoteBackupManager, RotationReport, BACKUP_DIR_NAME, REMOTE_ARTIFACT_NAME};
pub use cancel::CancelToken;
pub use deploy::{DeployOutcome, DeployReport, DeployRequest, DeployUseCase};
