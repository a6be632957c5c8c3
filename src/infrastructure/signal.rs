//! Interrupt handling
//!
//! The first SIGINT/SIGTERM flips the cancel token and removes any registered
//! temp archive; the pipeline then stops before its next stage. A second
//! signal exits immediately.

use crate::application::CancelToken;
use crate::infrastructure::fs::CleanupRegistry;

/// Install the process-wide handler. Can only succeed once per process.
pub fn install_interrupt_handler(
    token: CancelToken,
    registry: CleanupRegistry,
) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        let first = token.cancel();
        let removed = registry.release_all();
        tracing::info!(removed, "interrupt received, temp archives released");
        if !first {
            std::process::exit(0);
        }
    })
}
