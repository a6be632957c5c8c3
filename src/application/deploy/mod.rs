//! Deploy Module
//!
//! Orchestrates a deployment run.
//!
//! ## Structure
//!
//! - `options` - Run inputs (`DeployRequest`)
//! - `result` - Outcome types (`DeployOutcome`, `DeployReport`)
//! - `use_case` - The staged pipeline (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use dropship::application::deploy::{DeployRequest, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(runner, archiver, confirmer, SystemClock);
//! let outcome = use_case.execute(&DeployRequest::new(root, values))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployRequest;
pub use result::{DeployOutcome, DeployReport};
pub use use_case::DeployUseCase;
