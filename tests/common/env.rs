//! Test environment for isolated Dropship runs.
//!
//! Provides `TestEnv` - a temp project directory, a private TMPDIR for the
//! local archive, and `ssh`/`scp` stand-ins that only record their arguments.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

use super::fixtures::CONFIG_KEYS;

/// Result of running the dropship binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestEnv {
    root: TempDir,
    dropship_bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        for dir in ["project/deploy", "tmp", "bin"] {
            std::fs::create_dir_all(root.path().join(dir)).expect("Failed to create directories");
        }
        let env = Self {
            root,
            dropship_bin: PathBuf::from(env!("CARGO_BIN_EXE_dropship")),
        };
        env.install_remote_stubs();
        env
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.root.path().join("project").join(relative)
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.root.path().join("tmp")
    }

    fn log_path(&self) -> PathBuf {
        self.root.path().join("remote.log")
    }

    /// Write `deploy/<name>` in the project
    pub fn write_env_file(&self, name: &str, content: &str) {
        std::fs::write(self.project_path("deploy").join(name), content)
            .expect("Failed to write env file");
    }

    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Files left in the private TMPDIR
    pub fn temp_files(&self) -> Vec<String> {
        std::fs::read_dir(self.temp_dir())
            .map(|entries| {
                entries
                    .flatten()
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Lines recorded by the `ssh` and `scp` stand-ins, in call order
    pub fn remote_log(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_stdin(args, "")
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> TestResult {
        let path = std::env::var_os("PATH").unwrap_or_default();
        let mut search = vec![self.root.path().join("bin")];
        search.extend(std::env::split_paths(&path));

        let mut cmd = Command::new(&self.dropship_bin);
        cmd.current_dir(self.project_path(""))
            .args(args)
            .env("PATH", std::env::join_paths(search).expect("valid PATH"))
            .env("TMPDIR", self.temp_dir())
            .env("DROPSHIP_TEST_LOG", self.log_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for key in CONFIG_KEYS {
            cmd.env_remove(key);
        }

        let mut child = cmd.spawn().expect("Failed to execute dropship");
        if let Some(mut input) = child.stdin.take() {
            let _ = input.write_all(stdin.as_bytes());
        }
        let output = child.wait_with_output().expect("Failed to wait for dropship");
        output_to_result(output)
    }

    #[cfg(unix)]
    fn install_remote_stubs(&self) {
        use std::os::unix::fs::PermissionsExt;

        for name in ["ssh", "scp"] {
            let script = format!(
                "#!/bin/sh\nprintf '{} %s\\n' \"$*\" >> \"$DROPSHIP_TEST_LOG\"\n",
                name
            );
            let path = self.root.path().join("bin").join(name);
            std::fs::write(&path, script).expect("Failed to write stub");
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to chmod stub");
        }
    }

    #[cfg(not(unix))]
    fn install_remote_stubs(&self) {}
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Position of the first log line containing `needle`
pub fn position(log: &[String], needle: &str) -> Option<usize> {
    log.iter().position(|line| line.contains(needle))
}
