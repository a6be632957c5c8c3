//! Domain Value Objects
//!
//! Immutable, validated values that flow into remote command lines.

mod backup_name;
mod path;
mod remote_host;
mod shell;

pub use backup_name::{BackupName, BACKUP_PREFIX, BACKUP_SUFFIX};
pub use path::{check_path_safety, resolve_local_override, PathError, RemotePath};
pub use remote_host::{HostError, RemoteHost};
pub use shell::{ShellArg, ShellCommand};
