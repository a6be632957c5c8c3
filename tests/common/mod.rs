//! Common test utilities for Dropship CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project, temp dir and fake `ssh`/`scp` on PATH
//! - Fixtures: env file contents

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
