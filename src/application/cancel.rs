//! Cooperative cancellation shared between the signal handler and the pipeline

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Flag flipped once by an interrupt; cloned handles observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this call performed the transition.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!handle.is_cancelled());

        assert!(token.cancel());
        assert!(handle.is_cancelled());
        assert!(!handle.cancel());
    }
}
