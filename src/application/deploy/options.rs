//! Deploy Options
//!
//! Inputs for one deployment run, before validation.

use std::path::PathBuf;

use crate::config::{ConfigValues, DeployFlags, Mode};

/// Everything the pipeline needs to start
#[derive(Debug, Clone)]
pub struct DeployRequest {
    /// Deployment profile; `None` selects the default env file and dist dir
    pub mode: Option<Mode>,
    /// Where the build runs and relative paths resolve
    pub project_root: PathBuf,
    /// Raw configuration values (env file overlaid with process env)
    pub values: ConfigValues,
    pub flags: DeployFlags,
    /// Directory for the local temporary archive
    pub temp_dir: PathBuf,
}

impl DeployRequest {
    pub fn new(project_root: impl Into<PathBuf>, values: ConfigValues) -> Self {
        Self {
            mode: None,
            project_root: project_root.into(),
            values,
            flags: DeployFlags::default(),
            temp_dir: std::env::temp_dir(),
        }
    }

    pub fn with_mode(mut self, mode: Option<Mode>) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_flags(mut self, flags: DeployFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }
}
