//! Backup Retention Policy
//!
//! Decides which remote backups survive a rotation. Only names are compared:
//! backup names sort lexicographically in recency order.

use crate::domain::value_objects::BackupName;

/// Outcome of applying the retention count to a backup listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPlan {
    /// Newest first
    pub keep: Vec<BackupName>,
    /// Oldest excess backups, newest first
    pub prune: Vec<BackupName>,
}

impl RetentionPlan {
    pub fn is_noop(&self) -> bool {
        self.prune.is_empty()
    }
}

/// Keep the `retention` most recent backups and mark the rest for deletion.
pub fn plan_rotation(
    existing: impl IntoIterator<Item = BackupName>,
    retention: usize,
) -> RetentionPlan {
    let mut backups: Vec<BackupName> = existing.into_iter().collect();
    backups.sort_unstable_by(|a, b| b.cmp(a));
    backups.dedup();

    let split = retention.min(backups.len());
    let prune = backups.split_off(split);
    RetentionPlan {
        keep: backups,
        prune,
    }
}
