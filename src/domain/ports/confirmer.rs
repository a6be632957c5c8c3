//! Confirmation Port
//!
//! Blocks on the operator before anything is packaged or sent.

/// What the operator is asked to approve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub mode: Option<String>,
    pub remote_host: String,
    pub remote_dir: String,
    pub backup_enabled: bool,
    pub backup_retention: u32,
    /// Answer taken on an empty reply
    pub default_yes: bool,
}

/// Asks the operator a yes/no question
pub trait Confirmer {
    /// `Ok(true)` to proceed, `Ok(false)` to cancel.
    fn confirm(&self, request: &ConfirmationRequest) -> std::io::Result<bool>;
}

