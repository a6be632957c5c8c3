//! Commands that replace the live remote tree
//!
//! Clearing removes every file below the remote directory except the uploaded
//! artifact, top-level `backup_*.zip` files and anything under `__backups__`,
//! then prunes empty directories. Extraction unpacks the artifact in place,
//! removes it and normalizes permissions.

use crate::domain::value_objects::{RemotePath, ShellArg, ShellCommand, BACKUP_PREFIX, BACKUP_SUFFIX};

use super::backup::{BACKUP_DIR_NAME, REMOTE_ARTIFACT_NAME};

fn relative(pattern: String) -> ShellArg {
    ShellArg::quote(format!("./{}", pattern))
}

fn cd(remote_dir: &RemotePath) -> ShellCommand {
    ShellCommand::new("cd").arg(&ShellArg::quote(remote_dir.as_str()))
}

pub fn clear_command(remote_dir: &RemotePath) -> ShellCommand {
    let artifact = relative(REMOTE_ARTIFACT_NAME.to_string());
    let legacy_backups = relative(format!("{BACKUP_PREFIX}*{BACKUP_SUFFIX}"));
    let backup_dir = relative(BACKUP_DIR_NAME.to_string());
    let backup_contents = relative(format!("{BACKUP_DIR_NAME}/*"));

    let remove_files = ShellCommand::new("find")
        .lit(". -mindepth 1 -type f")
        .lit("! -path")
        .arg(&artifact)
        .lit("! -path")
        .arg(&legacy_backups)
        .lit("! -path")
        .arg(&backup_contents)
        .lit("-exec rm -f {} +");

    let remove_empty_dirs = ShellCommand::new("find")
        .lit(". -mindepth 1 -type d -empty")
        .lit("! -path")
        .arg(&backup_dir)
        .lit("! -path")
        .arg(&backup_contents)
        .lit("-delete");

    cd(remote_dir).and(remove_files).and(remove_empty_dirs)
}

pub fn extract_command(remote_dir: &RemotePath) -> ShellCommand {
    let artifact = ShellArg::quote(REMOTE_ARTIFACT_NAME);
    let backup_contents = relative(format!("{BACKUP_DIR_NAME}/*"));

    cd(remote_dir)
        .and(ShellCommand::new("unzip").lit("-o -q").arg(&artifact))
        .and(ShellCommand::new("rm").lit("-f").arg(&artifact))
        .and(ShellCommand::new("chmod").lit("-R 755 ."))
        .and(
            ShellCommand::new("find")
                .lit(". -type f")
                .lit(r"\( -name '*.html' -o -name '*.css' -o -name '*.js' \)")
                .lit("! -path")
                .arg(&backup_contents)
                .lit("-exec chmod 644 {} +"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn site() -> RemotePath {
        RemotePath::parse("/var/www/site/").unwrap()
    }

    #[test]
    fn clear_preserves_artifact_and_backups() {
        assert_snapshot!(
            clear_command(&site()).to_string(),
            @r"cd '/var/www/site' && find . -mindepth 1 -type f ! -path './dist.zip' ! -path './backup_*.zip' ! -path './__backups__/*' -exec rm -f {} + && find . -mindepth 1 -type d -empty ! -path './__backups__' ! -path './__backups__/*' -delete"
        );
    }

    #[test]
    fn extract_unpacks_then_fixes_permissions() {
        assert_snapshot!(
            extract_command(&site()).to_string(),
            @r"cd '/var/www/site' && unzip -o -q 'dist.zip' && rm -f 'dist.zip' && chmod -R 755 . && find . -type f \( -name '*.html' -o -name '*.css' -o -name '*.js' \) ! -path './__backups__/*' -exec chmod 644 {} +"
        );
    }

    #[test]
    fn extract_removes_artifact_only_after_unzip() {
        let line = extract_command(&site()).to_string();
        let unzip = line.find("unzip").unwrap();
        let rm = line.find("rm -f 'dist.zip'").unwrap();
        assert!(unzip < rm);
    }
}
