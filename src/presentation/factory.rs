//! Use Case Factory
//!
//! Creates the deploy use case with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::{CancelToken, DeployUseCase};
use crate::domain::ports::{DeployEventSink, SystemClock};
use crate::infrastructure::{
    CleanupRegistry, OperatorConfirmer, SystemCommandRunner, ZipArchiver,
};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type SystemDeployUseCase =
    DeployUseCase<SystemCommandRunner, ZipArchiver, OperatorConfirmer, SystemClock>;

/// Shared state between the use case and the interrupt handler
#[derive(Debug, Clone, Default)]
pub struct Interruption {
    pub token: CancelToken,
    pub registry: CleanupRegistry,
}

/// Create a deploy use case with all dependencies wired up
///
/// `quiet` keeps child stdout off the console (JSON output).
/// `stdin_is_terminal` selects the dialoguer prompt over a line read.
pub fn create_deploy_use_case(
    events: Arc<dyn DeployEventSink>,
    interruption: &Interruption,
    quiet: bool,
    stdin_is_terminal: bool,
) -> SystemDeployUseCase {
    DeployUseCase::new(
        SystemCommandRunner::new().quiet(quiet),
        ZipArchiver::new(),
        OperatorConfirmer::for_stdin(stdin_is_terminal),
        SystemClock,
    )
    .with_events(events)
    .with_cancel_token(interruption.token.clone())
    .with_cleanup_registry(interruption.registry.clone())
}
