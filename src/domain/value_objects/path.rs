//! Path Value Objects
//!
//! Paths that end up inside remote command lines or drive destructive
//! operations. Validation rejects:
//! - Traversal components (`..`) and home expansion (`~`)
//! - Shell metacharacters (`;`, `|`, `&`, backtick, `$(`)
//! - Sensitive system locations (`/etc`, `/root`, `/var/log`, ...), compared
//!   after empty and `.` segments are collapsed
//!
//! Remote directories additionally reject whitespace, quotes and glob
//! characters because `scp` hands its destination to the remote shell.

use std::fmt;
use std::path::{Path, PathBuf};

/// Locations a deployment must never target.
const SENSITIVE_PREFIXES: &[&str] = &[
    "/etc", "/root", "/var/log", "/boot", "/proc", "/sys", "/dev", "/bin", "/sbin",
];

const METACHARACTERS: &[&str] = &[";", "|", "&", "`", "$("];

/// Characters the remote shell would reinterpret in an unquoted `scp` target.
const REMOTE_UNSAFE: &[char] = &[
    '\'', '"', '*', '?', '[', ']', '{', '}', '$', '<', '>', '(', ')', '!',
];

/// Error when path validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path is empty or whitespace
    Empty,
    /// Path contains traversal components (..)
    ContainsTraversal,
    /// Path relies on home directory expansion (~)
    HomeExpansion,
    /// Path contains a shell metacharacter
    ShellMetacharacter(&'static str),
    /// Path points into a protected system location
    SensitiveLocation(&'static str),
    /// Path resolves to a filesystem or home root
    RootOnly,
    /// Remote path contains whitespace or a character the remote shell expands
    UnsupportedCharacter(char),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => write!(f, "path is empty"),
            PathError::ContainsTraversal => {
                write!(f, "path contains traversal components (..)")
            }
            PathError::HomeExpansion => write!(f, "path must not use '~'"),
            PathError::ShellMetacharacter(meta) => {
                write!(f, "path contains shell metacharacter '{}'", meta)
            }
            PathError::SensitiveLocation(prefix) => {
                write!(f, "path is inside protected location '{}'", prefix)
            }
            PathError::RootOnly => write!(f, "path must name a directory below the root"),
            PathError::UnsupportedCharacter(c) if c.is_whitespace() => {
                write!(f, "remote path must not contain whitespace")
            }
            PathError::UnsupportedCharacter(c) => {
                write!(f, "remote path must not contain '{}'", c)
            }
        }
    }
}

impl std::error::Error for PathError {}

/// A path split into its meaningful segments.
struct Segments<'a> {
    absolute: bool,
    parts: Vec<&'a str>,
}

impl<'a> Segments<'a> {
    /// Split on either separator, dropping empty and `.` segments.
    fn split(trimmed: &'a str) -> Self {
        Self {
            absolute: trimmed.starts_with(['/', '\\']),
            parts: trimmed
                .split(['/', '\\'])
                .filter(|s| !s.is_empty() && *s != ".")
                .collect(),
        }
    }

    fn normalized(&self) -> String {
        let joined = self.parts.join("/");
        if self.absolute {
            format!("/{joined}")
        } else {
            joined
        }
    }
}

/// Check a raw path string against the safety rules shared by local and remote paths.
pub fn check_path_safety(raw: &str) -> Result<(), PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }

    if let Some(meta) = METACHARACTERS.iter().find(|m| trimmed.contains(**m)) {
        return Err(PathError::ShellMetacharacter(meta));
    }
    if trimmed.contains("..") {
        return Err(PathError::ContainsTraversal);
    }
    if trimmed.contains('~') {
        return Err(PathError::HomeExpansion);
    }

    check_sensitive(&Segments::split(trimmed).normalized())
}

fn check_sensitive(normalized: &str) -> Result<(), PathError> {
    for prefix in SENSITIVE_PREFIXES {
        let rest = match normalized.strip_prefix(prefix) {
            Some(rest) => rest,
            None => continue,
        };
        if rest.is_empty() || rest.starts_with('/') {
            return Err(PathError::SensitiveLocation(prefix));
        }
    }
    Ok(())
}

/// A validated directory on the remote host.
///
/// Stored in forward-slash form without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemotePath(String);

impl RemotePath {
    /// Validate and normalize a remote directory
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        check_path_safety(raw)?;

        let trimmed = raw.trim();
        if let Some(c) = trimmed
            .chars()
            .find(|c| c.is_whitespace() || REMOTE_UNSAFE.contains(c))
        {
            return Err(PathError::UnsupportedCharacter(c));
        }

        let segments = Segments::split(trimmed);
        if segments.parts.is_empty() {
            return Err(PathError::RootOnly);
        }
        Ok(Self(segments.normalized()))
    }

    /// Append a single path segment
    pub fn join(&self, segment: &str) -> RemotePath {
        RemotePath(format!("{}/{}", self.0, segment.trim_matches('/')))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a local output directory override against the project root.
pub fn resolve_local_override(raw: &str, project_root: &Path) -> Result<PathBuf, PathError> {
    check_path_safety(raw)?;

    let path = Path::new(raw.trim());
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(project_root.join(path))
    }
}
