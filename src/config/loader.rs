//! Env file loading
//!
//! Values come from `<config-dir>/.env.<mode>.local` (or `.env.local` without a
//! mode). Process environment variables with the same key take precedence,
//! matching dotenv semantics. The process environment is never modified.

use std::path::{Path, PathBuf};

use super::env_validator::{suggest, EnvVarValidator};
use super::types::{
    parse_yes_no, ConfigError, ConfigValues, ConfigWarning, Mode, KEY_CONFIRM_DEFAULT, KNOWN_KEYS,
};

/// Configuration values plus non-fatal findings
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub source: PathBuf,
    pub values: ConfigValues,
    pub warnings: Vec<ConfigWarning>,
}

/// Env file name for a mode
pub fn env_file_name(mode: Option<Mode>) -> String {
    match mode {
        Some(mode) => format!(".env.{}.local", mode),
        None => ".env.local".to_string(),
    }
}

pub fn env_file_path(config_dir: &Path, mode: Option<Mode>) -> PathBuf {
    config_dir.join(env_file_name(mode))
}

/// Load the env file for `mode`, overlaying the real process environment.
pub fn load(config_dir: &Path, mode: Option<Mode>) -> Result<LoadedConfig, ConfigError> {
    load_with_env(config_dir, mode, |key| std::env::var(key).ok())
}

/// Load with an injectable environment lookup (for testing)
pub fn load_with_env<F>(
    config_dir: &Path,
    mode: Option<Mode>,
    get_env: F,
) -> Result<LoadedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = env_file_path(config_dir, mode);
    let mut loaded = read_env_file(&path)?;

    for &key in KNOWN_KEYS {
        if let Some(value) = get_env(key).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(key, "env file value overridden by process environment");
            loaded.values.insert(key, value);
        }
    }

    if let Some(raw) = loaded.values.get(KEY_CONFIRM_DEFAULT).map(str::to_string) {
        EnvVarValidator::new(KEY_CONFIRM_DEFAULT, &["y", "n", "yes", "no"]).parse_or_warn(
            &raw,
            parse_yes_no,
            true,
            &mut loaded.warnings,
        );
    }

    Ok(loaded)
}

/// Parse a single env file without touching the process environment.
pub fn read_env_file(path: &Path) -> Result<LoadedConfig, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::MissingEnvFile {
            path: path.to_path_buf(),
        });
    }

    let unreadable = |message: String| ConfigError::Unreadable {
        path: path.to_path_buf(),
        message,
    };

    let iter = dotenvy::from_path_iter(path).map_err(|e| unreadable(e.to_string()))?;
    let mut values = ConfigValues::new();
    let mut warnings = Vec::new();

    for item in iter {
        let (key, value) = item.map_err(|e| unreadable(e.to_string()))?;
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warnings.push(ConfigWarning {
                message: format!("Unknown key '{}' in {}", key, path.display()),
                suggestion: suggest(&key, KNOWN_KEYS),
                key: key.clone(),
            });
        }
        values.insert(key, value);
    }

    tracing::debug!(path = %path.display(), "loaded env file");
    Ok(LoadedConfig {
        source: path.to_path_buf(),
        values,
        warnings,
    })
}
