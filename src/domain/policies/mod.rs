//! Domain Policies
//!
//! Business rules that gate and shape a deployment.
//! These are pure functions over raw input and value objects.

mod retention;
mod validation;

pub use retention::{plan_rotation, RetentionPlan};
pub use validation::{
    validate_settings, ConfigIssue, Field, IssueKind, RawSettings, ValidatedSettings,
    DEFAULT_BACKUP_RETENTION, MAX_BACKUP_RETENTION,
};
