//! Remote Backup Manager
//!
//! Backups are copies of the uploaded artifact kept under
//! `<remote_dir>/__backups__/`. A backup is always taken from the artifact that
//! was just uploaded and before the live tree is cleared; rotation only runs
//! once the new backup exists.

use chrono::{DateTime, Utc};

use crate::domain::policies::plan_rotation;
use crate::domain::ports::{CommandFailure, CommandOutcome, CommandRunner, CommandSpec};
use crate::domain::value_objects::{BackupName, RemoteHost, RemotePath, ShellArg, ShellCommand};

/// File name of the uploaded archive inside the remote directory
pub const REMOTE_ARTIFACT_NAME: &str = "dist.zip";

/// Backup subdirectory of the remote directory
pub const BACKUP_DIR_NAME: &str = "__backups__";

/// `<remote_dir>/__backups__`
pub fn backup_dir(remote_dir: &RemotePath) -> RemotePath {
    remote_dir.join(BACKUP_DIR_NAME)
}

/// Result of a rotation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationReport {
    pub kept: Vec<BackupName>,
    pub pruned: Vec<BackupName>,
}

fn quote(path: &RemotePath) -> ShellArg {
    ShellArg::quote(path.as_str())
}

pub fn ensure_dir_command(dir: &RemotePath) -> ShellCommand {
    ShellCommand::new("mkdir").lit("-p").arg(&quote(dir))
}

/// Copy the artifact into the backup directory, failing instead of
/// overwriting a backup that already carries the same name.
pub fn backup_command(remote_dir: &RemotePath, artifact_name: &str, backup: &BackupName) -> ShellCommand {
    let dir = backup_dir(remote_dir);
    let target = quote(&dir.join(backup.as_str()));
    ensure_dir_command(&dir)
        .and(ShellCommand::new("test").lit("! -e").arg(&target))
        .and(
            ShellCommand::new("cp")
                .arg(&quote(&remote_dir.join(artifact_name)))
                .arg(&target),
        )
}

/// Listing never fails on a missing directory.
pub fn list_command(backup_dir: &RemotePath) -> ShellCommand {
    ShellCommand::new("ls")
        .lit("-1A")
        .arg(&quote(backup_dir))
        .lit("2>/dev/null || true")
}

pub fn prune_command(backup_dir: &RemotePath, names: &[BackupName]) -> ShellCommand {
    let targets: Vec<ShellArg> = names
        .iter()
        .map(|name| quote(&backup_dir.join(name.as_str())))
        .collect();
    ShellCommand::new("rm").lit("-f --").args(&targets)
}

/// Issues backup commands against one host
pub struct RemoteBackupManager<R> {
    runner: R,
    host: RemoteHost,
}

impl<R: CommandRunner> RemoteBackupManager<R> {
    pub fn new(runner: R, host: RemoteHost) -> Self {
        Self { runner, host }
    }

    fn remote(&self, command: ShellCommand) -> CommandSpec {
        CommandSpec::remote(&self.host, command)
    }

    /// Create `path` and its parents; idempotent.
    pub fn ensure_remote_dir(&self, path: &RemotePath) -> CommandOutcome {
        self.runner.run(&self.remote(ensure_dir_command(path)))
    }

    /// Copy `<remote_dir>/<artifact_name>` to a new timestamped backup.
    ///
    /// The artifact itself is left in place for extraction.
    pub fn create_backup(
        &self,
        remote_dir: &RemotePath,
        artifact_name: &str,
        at: DateTime<Utc>,
    ) -> Result<BackupName, CommandFailure> {
        let name = BackupName::from_timestamp(at);
        self.runner
            .run(&self.remote(backup_command(remote_dir, artifact_name, &name)))?;
        tracing::info!(backup = %name, "backup created");
        Ok(name)
    }

    /// Delete all but the `retention` most recent backups in `backup_dir`.
    ///
    /// Files that do not look like backups are ignored. An empty or missing
    /// directory is a no-op.
    pub fn rotate(
        &self,
        backup_dir: &RemotePath,
        retention: usize,
    ) -> Result<RotationReport, CommandFailure> {
        let listing = self.runner.capture(&self.remote(list_command(backup_dir)))?;
        let plan = plan_rotation(
            listing.lines().filter_map(|line| BackupName::parse(line.trim())),
            retention,
        );

        if !plan.is_noop() {
            self.runner
                .run(&self.remote(prune_command(backup_dir, &plan.prune)))?;
            tracing::info!(pruned = plan.prune.len(), "old backups removed");
        }

        Ok(RotationReport {
            kept: plan.keep,
            pruned: plan.prune,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use insta::assert_snapshot;
    use std::cell::RefCell;

    struct ScriptedRunner {
        listing: String,
        fail_prune: bool,
        issued: RefCell<Vec<String>>,
    }

    impl ScriptedRunner {
        fn with_listing(listing: &str) -> Self {
            Self {
                listing: listing.to_string(),
                fail_prune: false,
                issued: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, spec: &CommandSpec) -> CommandOutcome {
            let text = spec.to_string();
            self.issued.borrow_mut().push(text.clone());
            if self.fail_prune && text.contains("rm -f") {
                return Err(CommandFailure::new(text, Some(1), "permission denied".into()));
            }
            Ok(())
        }

        fn capture(&self, spec: &CommandSpec) -> Result<String, CommandFailure> {
            self.issued.borrow_mut().push(spec.to_string());
            Ok(self.listing.clone())
        }
    }

    fn host() -> RemoteHost {
        RemoteHost::parse("deploy@example.com").unwrap()
    }

    fn site() -> RemotePath {
        RemotePath::parse("/var/www/site").unwrap()
    }

    #[test]
    fn backup_copies_artifact_into_backup_dir() {
        let name = BackupName::from_timestamp(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
        assert_snapshot!(
            backup_command(&site(), REMOTE_ARTIFACT_NAME, &name).to_string(),
            @"mkdir -p '/var/www/site/__backups__' && test ! -e '/var/www/site/__backups__/backup_2024-01-05T00-00-00Z.zip' && cp '/var/www/site/dist.zip' '/var/www/site/__backups__/backup_2024-01-05T00-00-00Z.zip'"
        );
    }

    #[test]
    fn listing_tolerates_missing_directory() {
        assert_snapshot!(
            list_command(&backup_dir(&site())).to_string(),
            @"ls -1A '/var/www/site/__backups__' 2>/dev/null || true"
        );
    }

    #[test]
    fn interpolated_paths_are_quoted() {
        let dir = backup_dir(&RemotePath::parse("/srv/site-2024").unwrap());
        assert_snapshot!(
            prune_command(&dir, &[BackupName::parse("backup_it's.zip").unwrap()]).to_string(),
            @r"rm -f -- '/srv/site-2024/__backups__/backup_it'\''s.zip'"
        );
    }

    #[test]
    fn create_backup_returns_name_and_keeps_artifact() {
        let runner = ScriptedRunner::with_listing("");
        let manager = RemoteBackupManager::new(&runner, host());
        let name = manager
            .create_backup(
                &site(),
                REMOTE_ARTIFACT_NAME,
                Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            )
            .unwrap();

        assert_eq!(name.as_str(), "backup_2024-01-05T00-00-00Z.zip");
        let issued = runner.issued.borrow();
        assert_eq!(issued.len(), 1);
        assert!(issued[0].starts_with("ssh deploy@example.com "));
        assert!(!issued[0].contains("mv "));
        assert!(!issued[0].contains("rm "));
    }

    #[test]
    fn rotate_prunes_oldest_beyond_retention() {
        let runner = ScriptedRunner::with_listing(
            "backup_2024-01-02T00-00-00Z.zip\n\
             backup_2024-01-05T00-00-00Z.zip\n\
             notes.txt\n\
             backup_2024-01-01T00-00-00Z.zip\n\
             backup_2024-01-04T00-00-00Z.zip\n\
             backup_2024-01-03T00-00-00Z.zip\n",
        );
        let manager = RemoteBackupManager::new(&runner, host());
        let report = manager.rotate(&backup_dir(&site()), 3).unwrap();

        let kept: Vec<&str> = report.kept.iter().map(BackupName::as_str).collect();
        assert_eq!(
            kept,
            [
                "backup_2024-01-05T00-00-00Z.zip",
                "backup_2024-01-04T00-00-00Z.zip",
                "backup_2024-01-03T00-00-00Z.zip",
            ]
        );
        assert_eq!(report.pruned.len(), 2);

        let issued = runner.issued.borrow();
        assert_eq!(issued.len(), 2);
        assert!(issued[1].contains(
            "rm -f -- '/var/www/site/__backups__/backup_2024-01-02T00-00-00Z.zip' '/var/www/site/__backups__/backup_2024-01-01T00-00-00Z.zip'"
        ));
        assert!(!issued[1].contains("notes.txt"));
    }

    #[test]
    fn rotate_with_few_backups_issues_no_delete() {
        for listing in ["", "backup_2024-01-01T00-00-00Z.zip\n"] {
            let runner = ScriptedRunner::with_listing(listing);
            let manager = RemoteBackupManager::new(&runner, host());
            let report = manager.rotate(&backup_dir(&site()), 3).unwrap();

            assert!(report.pruned.is_empty());
            assert_eq!(runner.issued.borrow().len(), 1);
        }
    }

    #[test]
    fn rotate_reports_prune_failure() {
        let mut runner = ScriptedRunner::with_listing(
            "backup_2024-01-01T00-00-00Z.zip\nbackup_2024-01-02T00-00-00Z.zip\n",
        );
        runner.fail_prune = true;
        let manager = RemoteBackupManager::new(&runner, host());

        let failure = manager.rotate(&backup_dir(&site()), 1).unwrap_err();
        assert_eq!(failure.diagnostics, "permission denied");
    }
}
