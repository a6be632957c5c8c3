//! Archiver Port
//!
//! Packs a local directory into a single compressed file.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Entry-count progress of a running compression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveProgress {
    pub processed: u64,
    pub total: u64,
}

impl ArchiveProgress {
    /// Bounded percentage; an empty source counts as complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.processed.min(self.total) * 100 / self.total) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

/// Something the archiver reports while working
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEvent {
    Progress(ArchiveProgress),
    /// Recoverable per-entry problem, the entry was left out
    Warning(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Size of the finished archive on disk
    pub total_bytes: u64,
    /// Files and directories written
    pub entries: u64,
    pub warnings: Vec<String>,
}

/// Structural failures that abort compression
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("source directory not found: {}", path.display())]
    SourceMissing { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write archive {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

impl ArchiveError {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ArchiveError::SourceMissing { path }
            | ArchiveError::Read { path, .. }
            | ArchiveError::Write { path, .. } => Some(path),
        }
    }
}

pub trait Archiver {
    /// Compress the contents of `source` into `destination`.
    ///
    /// Entries are stored relative to `source`. A pre-existing `destination`
    /// is replaced. Progress reaches 100% exactly once.
    fn compress(
        &self,
        source: &Path,
        destination: &Path,
        on_event: &mut dyn FnMut(ArchiveEvent),
    ) -> Result<ArchiveSummary, ArchiveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_bounded() {
        let p = ArchiveProgress {
            processed: 7,
            total: 5,
        };
        assert_eq!(p.percent(), 100);

        let p = ArchiveProgress {
            processed: 1,
            total: 3,
        };
        assert_eq!(p.percent(), 33);
        assert!(!p.is_complete());
    }

    #[test]
    fn empty_source_is_complete() {
        let p = ArchiveProgress {
            processed: 0,
            total: 0,
        };
        assert_eq!(p.percent(), 100);
        assert!(p.is_complete());
    }
}
