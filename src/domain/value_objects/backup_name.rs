//! Backup file naming
//!
//! Backups are named `backup_<timestamp>.zip` where the timestamp is ISO 8601
//! at second granularity with `:` replaced by `-`, e.g.
//! `backup_2024-01-05T00-00-00Z.zip`. Lexicographic order equals recency order.
//! Two runs in the same second produce the same name; the backup command
//! refuses to overwrite instead of dropping the earlier copy.

use std::fmt;

use chrono::{DateTime, Utc};

pub const BACKUP_PREFIX: &str = "backup_";
pub const BACKUP_SUFFIX: &str = ".zip";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%SZ";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BackupName(String);

impl BackupName {
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(format!(
            "{BACKUP_PREFIX}{}{BACKUP_SUFFIX}",
            at.format(TIMESTAMP_FORMAT)
        ))
    }

    /// Recognize an existing backup file name from a remote listing.
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name
            .strip_prefix(BACKUP_PREFIX)?
            .strip_suffix(BACKUP_SUFFIX)?;
        if stem.is_empty() || stem.contains('/') {
            return None;
        }
        Some(Self(file_name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
