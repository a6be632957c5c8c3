//! Input Validation Policy
//!
//! Every field is checked independently and all problems are reported in one
//! pass. Nothing downstream may run until this succeeds.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{
    resolve_local_override, HostError, PathError, RemoteHost, RemotePath,
};

pub const DEFAULT_BACKUP_RETENTION: u32 = 10;
pub const MAX_BACKUP_RETENTION: u32 = 100;

/// Configuration fields subject to validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RemoteHost,
    RemoteDir,
    BuildCommand,
    DistPath,
    BackupRetention,
}

impl Field {
    /// Name of the variable in the env file
    pub fn env_key(self) -> &'static str {
        match self {
            Field::RemoteHost => "SERVER",
            Field::RemoteDir => "REMOTE_DIR",
            Field::BuildCommand => "BUILD_COMMAND",
            Field::DistPath => "DIST_PATH",
            Field::BackupRetention => "BACKUP_RETENTION",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    Missing,
    InvalidHost(HostError),
    UnsafePath(PathError),
    NotANumber(String),
    OutOfRange(i64),
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: Field,
    pub kind: IssueKind,
}

impl ConfigIssue {
    fn new(field: Field, kind: IssueKind) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.field.env_key();
        match &self.kind {
            IssueKind::Missing => write!(f, "{key} is required"),
            IssueKind::InvalidHost(err) => write!(f, "{key}: {err}"),
            IssueKind::UnsafePath(err) => write!(f, "{key}: {err}"),
            IssueKind::NotANumber(raw) => write!(f, "{key}: '{raw}' is not an integer"),
            IssueKind::OutOfRange(n) => write!(
                f,
                "{key}: {n} is outside 1..={MAX_BACKUP_RETENTION}"
            ),
        }
    }
}

/// Unvalidated values as read from the configuration source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSettings<'a> {
    pub remote_host: Option<&'a str>,
    pub remote_dir: Option<&'a str>,
    pub build_command: Option<&'a str>,
    pub dist_path: Option<&'a str>,
    pub backup_retention: Option<&'a str>,
}

/// Values that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSettings {
    pub remote_host: RemoteHost,
    pub remote_dir: RemotePath,
    pub build_command: Option<String>,
    /// Resolved override of the local output directory
    pub dist_path: Option<PathBuf>,
    pub backup_retention: u32,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_retention(raw: Option<&str>) -> Result<u32, IssueKind> {
    let Some(raw) = present(raw) else {
        return Ok(DEFAULT_BACKUP_RETENTION);
    };
    let n: i64 = raw
        .parse()
        .map_err(|_| IssueKind::NotANumber(raw.to_string()))?;
    if (1..=i64::from(MAX_BACKUP_RETENTION)).contains(&n) {
        Ok(n as u32)
    } else {
        Err(IssueKind::OutOfRange(n))
    }
}

/// Validate raw settings, collecting every issue.
///
/// `BUILD_COMMAND` may be absent only when the build is skipped.
pub fn validate_settings(
    raw: &RawSettings<'_>,
    project_root: &Path,
    skip_build: bool,
) -> Result<ValidatedSettings, Vec<ConfigIssue>> {
    let mut issues = Vec::new();

    let remote_host = match present(raw.remote_host) {
        None => {
            issues.push(ConfigIssue::new(Field::RemoteHost, IssueKind::Missing));
            None
        }
        Some(value) => RemoteHost::parse(value)
            .map_err(|e| issues.push(ConfigIssue::new(Field::RemoteHost, IssueKind::InvalidHost(e))))
            .ok(),
    };

    let remote_dir = match present(raw.remote_dir) {
        None => {
            issues.push(ConfigIssue::new(Field::RemoteDir, IssueKind::Missing));
            None
        }
        Some(value) => RemotePath::parse(value)
            .map_err(|e| issues.push(ConfigIssue::new(Field::RemoteDir, IssueKind::UnsafePath(e))))
            .ok(),
    };

    let build_command = present(raw.build_command).map(str::to_string);
    if build_command.is_none() && !skip_build {
        issues.push(ConfigIssue::new(Field::BuildCommand, IssueKind::Missing));
    }

    let dist_path = match present(raw.dist_path) {
        None => None,
        Some(value) => resolve_local_override(value, project_root)
            .map_err(|e| issues.push(ConfigIssue::new(Field::DistPath, IssueKind::UnsafePath(e))))
            .ok(),
    };

    let backup_retention = parse_retention(raw.backup_retention)
        .map_err(|kind| issues.push(ConfigIssue::new(Field::BackupRetention, kind)))
        .ok();

    match (remote_host, remote_dir, backup_retention) {
        (Some(remote_host), Some(remote_dir), Some(backup_retention)) if issues.is_empty() => {
            Ok(ValidatedSettings {
                remote_host,
                remote_dir,
                build_command,
                dist_path,
                backup_retention,
            })
        }
        _ => Err(issues),
    }
}
