//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Wiring the deploy use case to real infrastructure
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates the use case with its dependencies

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen};
pub use factory::{create_deploy_use_case, Interruption, SystemDeployUseCase};
