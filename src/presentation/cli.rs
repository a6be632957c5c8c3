//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - A single command: every flag shapes one deployment run
//! - Usage errors exit with status 1, like configuration errors

use std::path::PathBuf;

use clap::Parser;

use crate::config::{DeployFlags, Mode};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Dropship - build, package and ship a static site over ssh
#[derive(Parser, Debug)]
#[command(name = "dropship")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Settings are read from <config-dir>/.env.<mode>.local; \
process environment variables override the file.")]
pub struct Cli {
    /// Deployment profile (selects the env file and dist/<mode>)
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Do not run BUILD_COMMAND; deploy the existing build output
    #[arg(long)]
    pub skip_build: bool,

    /// Do not back up the uploaded archive on the server
    #[arg(long)]
    pub no_backup: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,

    /// Project directory where the build runs
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Directory holding the env files [default: <project-root>/deploy]
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Emit NDJSON events instead of human output (requires --force)
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Disable animations (progress bars, live updates)
    #[arg(long)]
    pub no_animation: bool,
}

impl Cli {
    pub fn flags(&self) -> DeployFlags {
        DeployFlags {
            skip_build: self.skip_build,
            no_backup: self.no_backup,
            force: self.force,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::try_parse_from(["dropship"]).unwrap();
        assert_eq!(cli.mode, None);
        assert_eq!(cli.flags(), DeployFlags::default());
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config_dir.is_none());
    }

    #[test]
    fn test_cli_parse_mode() {
        let cli = Cli::try_parse_from(["dropship", "--mode", "production"]).unwrap();
        assert_eq!(cli.mode, Some(Mode::Production));

        let cli = Cli::try_parse_from(["dropship", "-m", "test"]).unwrap();
        assert_eq!(cli.mode, Some(Mode::Test));
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        let err = Cli::try_parse_from(["dropship", "--mode", "staging"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli =
            Cli::try_parse_from(["dropship", "--skip-build", "--no-backup", "--force"]).unwrap();
        assert_eq!(
            cli.flags(),
            DeployFlags {
                skip_build: true,
                no_backup: true,
                force: true,
            }
        );
    }

    #[test]
    fn test_cli_parse_paths() {
        let cli = Cli::try_parse_from([
            "dropship",
            "--project-root",
            "site",
            "--config-dir",
            "ops/env",
        ])
        .unwrap();
        assert_eq!(cli.project_root, Some(PathBuf::from("site")));
        assert_eq!(cli.config_dir, Some(PathBuf::from("ops/env")));
    }

    #[test]
    fn test_cli_parse_output_flags() {
        let cli = Cli::try_parse_from(["dropship", "--json", "-vv", "--color", "never"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, Some(ColorWhen::Never));
    }

    #[test]
    fn test_cli_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["dropship", "deploy"]).is_err());
    }
}
