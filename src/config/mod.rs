//! Configuration for a deployment run
//!
//! Resolution order:
//! 1. CLI flags (`--skip-build`, `--no-backup`, `--force`)
//! 2. Process environment variables (same keys as the env file)
//! 3. Env file (`<config-dir>/.env.<mode>.local`)
//! 4. Built-in defaults (`BACKUP_RETENTION=10`, `CONFIRM_DEFAULT=y`)

pub mod env_validator;
pub mod loader;
mod types;

pub use loader::{env_file_name, env_file_path, load, load_with_env, LoadedConfig};
pub use types::{
    default_dist_path, parse_yes_no, ConfigError, ConfigValues, ConfigWarning, DeployFlags,
    DeploymentConfig, Mode, KEY_BACKUP_RETENTION, KEY_BUILD_COMMAND, KEY_CONFIRM_DEFAULT,
    KEY_DIST_PATH, KEY_REMOTE_DIR, KEY_SERVER, KNOWN_KEYS,
};
