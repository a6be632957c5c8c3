//! Scoped temporary archive
//!
//! The local archive is the only resource a deployment owns exclusively.
//! [`TempArchive`] registers its path with a shared [`CleanupRegistry`] on
//! acquisition so a signal handler can release it from another thread, and
//! removes the file on drop if nobody did so first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Paths that must be removed before the process exits
#[derive(Debug, Clone, Default)]
pub struct CleanupRegistry {
    paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PathBuf>> {
        // A poisoned lock still holds a usable list of paths.
        self.paths.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn register(&self, path: &Path) {
        let mut paths = self.lock();
        if !paths.iter().any(|p| p == path) {
            paths.push(path.to_path_buf());
        }
    }

    pub fn unregister(&self, path: &Path) {
        self.lock().retain(|p| p != path);
    }

    /// Paths still awaiting release
    pub fn pending(&self) -> Vec<PathBuf> {
        self.lock().clone()
    }

    /// Delete every registered file. Already-missing files are not errors.
    ///
    /// Returns the number of files actually removed.
    pub fn release_all(&self) -> usize {
        let paths: Vec<PathBuf> = self.lock().drain(..).collect();
        let mut removed = 0;
        for path in paths {
            match remove_if_present(&path) {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove temp archive"),
            }
        }
        removed
    }
}

fn remove_if_present(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// A uniquely named archive file in the temp directory
#[derive(Debug)]
pub struct TempArchive {
    path: PathBuf,
    registry: CleanupRegistry,
    released: bool,
}

impl TempArchive {
    /// Reserve `dropship-<mode>-<pid>-<random>.zip` inside `dir`.
    ///
    /// The file is created empty so the name cannot be taken by a concurrent
    /// run; the archiver replaces it.
    pub fn acquire(dir: &Path, mode: Option<&str>, registry: &CleanupRegistry) -> io::Result<Self> {
        let prefix = format!(
            "dropship-{}-{}-",
            mode.unwrap_or("default"),
            std::process::id()
        );
        let path = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".zip")
            .tempfile_in(dir)?
            .into_temp_path()
            .keep()
            .map_err(|e| e.error)?;

        registry.register(&path);
        tracing::debug!(path = %path.display(), "reserved temp archive");

        Ok(Self {
            path,
            registry: registry.clone(),
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file. Safe to call repeatedly; returns whether a file was removed.
    pub fn release(&mut self) -> io::Result<bool> {
        self.registry.unregister(&self.path);
        if self.released {
            return Ok(false);
        }
        let removed = remove_if_present(&self.path)?;
        self.released = true;
        Ok(removed)
    }
}

impl Drop for TempArchive {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove temp archive");
        }
    }
}
