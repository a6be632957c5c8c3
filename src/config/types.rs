//! Configuration type definitions

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::policies::{validate_settings, ConfigIssue, RawSettings};
use crate::domain::ports::ConfirmationRequest;
use crate::domain::value_objects::{RemoteHost, RemotePath};

/// Keys understood in env files
pub const KEY_SERVER: &str = "SERVER";
pub const KEY_REMOTE_DIR: &str = "REMOTE_DIR";
pub const KEY_BUILD_COMMAND: &str = "BUILD_COMMAND";
pub const KEY_DIST_PATH: &str = "DIST_PATH";
pub const KEY_BACKUP_RETENTION: &str = "BACKUP_RETENTION";
pub const KEY_CONFIRM_DEFAULT: &str = "CONFIRM_DEFAULT";

pub const KNOWN_KEYS: &[&str] = &[
    KEY_SERVER,
    KEY_REMOTE_DIR,
    KEY_BUILD_COMMAND,
    KEY_DIST_PATH,
    KEY_BACKUP_RETENTION,
    KEY_CONFIRM_DEFAULT,
];

/// Deployment profile selecting the env file and output directory
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Test,
    Production,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Test => "test",
            Mode::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags that shape the pipeline, straight from the CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeployFlags {
    pub skip_build: bool,
    pub no_backup: bool,
    pub force: bool,
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, ". Did you mean '{}'?", suggestion)?;
        }
        Ok(())
    }
}

/// Fatal configuration problems, raised before any side effect
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("env file not found: {}", path.display())]
    MissingEnvFile { path: PathBuf },

    #[error("cannot read env file {}: {message}", path.display())]
    Unreadable { path: PathBuf, message: String },

    #[error("{}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),

    #[error("{0}")]
    Usage(String),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    let mut out = String::from("invalid configuration:");
    for issue in issues {
        out.push_str("\n  - ");
        out.push_str(&issue.to_string());
    }
    out
}

/// Raw key/value pairs from the configuration source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigValues {
    values: BTreeMap<String, String>,
}

impl ConfigValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Trimmed, non-empty value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = ConfigValues::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

/// Parse a y/n answer as accepted by the confirmation prompt
pub fn parse_yes_no(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Validated, immutable settings for one deployment.
///
/// Only obtainable through [`DeploymentConfig::from_values`], so every value
/// that reaches a remote command line has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    mode: Option<Mode>,
    project_root: PathBuf,
    remote_host: RemoteHost,
    remote_dir: RemotePath,
    build_command: Option<String>,
    dist_path: PathBuf,
    backup_retention: u32,
    create_backup: bool,
    skip_build: bool,
    force_no_confirm: bool,
    confirm_default: bool,
}

impl DeploymentConfig {
    /// Validate raw values and flags, reporting every problem at once.
    pub fn from_values(
        mode: Option<Mode>,
        project_root: &Path,
        values: &ConfigValues,
        flags: DeployFlags,
    ) -> Result<Self, ConfigError> {
        let raw = RawSettings {
            remote_host: values.get(KEY_SERVER),
            remote_dir: values.get(KEY_REMOTE_DIR),
            build_command: values.get(KEY_BUILD_COMMAND),
            dist_path: values.get(KEY_DIST_PATH),
            backup_retention: values.get(KEY_BACKUP_RETENTION),
        };
        let settings =
            validate_settings(&raw, project_root, flags.skip_build).map_err(ConfigError::Invalid)?;

        let dist_path = settings
            .dist_path
            .unwrap_or_else(|| default_dist_path(project_root, mode));

        Ok(Self {
            mode,
            project_root: project_root.to_path_buf(),
            remote_host: settings.remote_host,
            remote_dir: settings.remote_dir,
            build_command: settings.build_command,
            dist_path,
            backup_retention: settings.backup_retention,
            create_backup: !flags.no_backup,
            skip_build: flags.skip_build,
            force_no_confirm: flags.force,
            confirm_default: values
                .get(KEY_CONFIRM_DEFAULT)
                .and_then(parse_yes_no)
                .unwrap_or(true),
        })
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn remote_host(&self) -> &RemoteHost {
        &self.remote_host
    }

    pub fn remote_dir(&self) -> &RemotePath {
        &self.remote_dir
    }

    pub fn build_command(&self) -> Option<&str> {
        self.build_command.as_deref()
    }

    pub fn dist_path(&self) -> &Path {
        &self.dist_path
    }

    pub fn backup_retention(&self) -> u32 {
        self.backup_retention
    }

    pub fn create_backup(&self) -> bool {
        self.create_backup
    }

    pub fn skip_build(&self) -> bool {
        self.skip_build
    }

    pub fn force_no_confirm(&self) -> bool {
        self.force_no_confirm
    }

    /// Summary shown to the operator before anything is sent
    pub fn confirmation_request(&self) -> ConfirmationRequest {
        ConfirmationRequest {
            mode: self.mode.map(|m| m.to_string()),
            remote_host: self.remote_host.to_string(),
            remote_dir: self.remote_dir.to_string(),
            backup_enabled: self.create_backup,
            backup_retention: self.backup_retention,
            default_yes: self.confirm_default,
        }
    }
}

/// `<root>/dist/<mode>`, or `<root>/dist` without a mode
pub fn default_dist_path(project_root: &Path, mode: Option<Mode>) -> PathBuf {
    let dist = project_root.join("dist");
    match mode {
        Some(mode) => dist.join(mode.as_str()),
        None => dist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> ConfigValues {
        pairs.iter().copied().collect()
    }

    fn complete() -> ConfigValues {
        values(&[
            (KEY_SERVER, "deploy@example.com"),
            (KEY_REMOTE_DIR, "/var/www/site/"),
            (KEY_BUILD_COMMAND, "npm run build"),
        ])
    }

    #[test]
    fn defaults_follow_mode() {
        let root = Path::new("/work/site");
        let config = DeploymentConfig::from_values(
            Some(Mode::Production),
            root,
            &complete(),
            DeployFlags::default(),
        )
        .unwrap();

        assert_eq!(config.dist_path(), root.join("dist").join("production"));
        assert_eq!(config.remote_dir().as_str(), "/var/www/site");
        assert_eq!(config.backup_retention(), 10);
        assert!(config.create_backup());
        assert!(!config.force_no_confirm());
        assert!(config.confirmation_request().default_yes);
    }

    #[test]
    fn flags_are_carried() {
        let flags = DeployFlags {
            skip_build: true,
            no_backup: true,
            force: true,
        };
        let config =
            DeploymentConfig::from_values(None, Path::new("/p"), &complete(), flags).unwrap();
        assert!(config.skip_build());
        assert!(!config.create_backup());
        assert!(config.force_no_confirm());
        assert_eq!(config.dist_path(), Path::new("/p").join("dist"));
    }

    #[test]
    fn confirm_default_can_be_no() {
        let mut v = complete();
        v.insert(KEY_CONFIRM_DEFAULT, "N");
        let config =
            DeploymentConfig::from_values(None, Path::new("/p"), &v, DeployFlags::default())
                .unwrap();
        assert!(!config.confirmation_request().default_yes);
    }

    #[test]
    fn invalid_values_list_every_issue() {
        let err = DeploymentConfig::from_values(
            Some(Mode::Test),
            Path::new("/p"),
            &ConfigValues::new(),
            DeployFlags::default(),
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("invalid configuration:"));
        assert!(message.contains("SERVER is required"));
        assert!(message.contains("REMOTE_DIR is required"));
        assert!(message.contains("BUILD_COMMAND is required"));
    }

    #[test]
    fn parse_yes_no_accepts_words() {
        assert_eq!(parse_yes_no("Yes"), Some(true));
        assert_eq!(parse_yes_no(" n "), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }
}
