//! Zip Archiver
//!
//! Streams a directory tree into a deflate-compressed zip. Entry names are
//! relative to the source directory and always use forward slashes.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::ports::{ArchiveError, ArchiveEvent, ArchiveProgress, ArchiveSummary, Archiver};

const MAX_DEFLATE_LEVEL: i64 = 9;

/// Archiver producing `.zip` files
#[derive(Debug, Clone, Copy)]
pub struct ZipArchiver {
    level: i64,
}

impl Default for ZipArchiver {
    fn default() -> Self {
        Self {
            level: MAX_DEFLATE_LEVEL,
        }
    }
}

impl ZipArchiver {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Emits progress whenever the whole percentage changes.
///
/// 100% can only be computed once `processed == total`, so completion is
/// reported exactly once.
struct ProgressReporter {
    total: u64,
    last_percent: Option<u8>,
}

impl ProgressReporter {
    fn new(total: u64) -> Self {
        Self {
            total,
            last_percent: None,
        }
    }

    fn advance(&mut self, processed: u64, on_event: &mut dyn FnMut(ArchiveEvent)) {
        let progress = ArchiveProgress {
            processed,
            total: self.total,
        };
        let percent = progress.percent();
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            on_event(ArchiveEvent::Progress(progress));
        }
    }

    fn finish(&mut self, on_event: &mut dyn FnMut(ArchiveEvent)) {
        if self.last_percent != Some(100) {
            self.last_percent = Some(100);
            on_event(ArchiveEvent::Progress(ArchiveProgress {
                processed: self.total,
                total: self.total,
            }));
        }
    }
}

fn write_error(path: &Path, err: impl std::fmt::Display) -> ArchiveError {
    ArchiveError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Collect entries below `source`, turning vanished or looping entries into warnings.
fn collect_entries(
    source: &Path,
    warnings: &mut Vec<String>,
    on_event: &mut dyn FnMut(ArchiveEvent),
) -> Result<Vec<(PathBuf, bool)>, ArchiveError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => entries.push((entry.path().to_path_buf(), entry.file_type().is_dir())),
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| source.to_path_buf());
                let vanished = err
                    .io_error()
                    .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
                if vanished || err.loop_ancestor().is_some() {
                    let message = format!("skipped {}: {}", path.display(), err);
                    on_event(ArchiveEvent::Warning(message.clone()));
                    warnings.push(message);
                    continue;
                }
                return Err(ArchiveError::Read {
                    path,
                    source: err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory walk failed")),
                });
            }
        }
    }

    Ok(entries)
}

fn copy_into<W: Write + io::Seek>(
    path: &Path,
    file: &mut File,
    zip: &mut ZipWriter<W>,
    destination: &Path,
) -> Result<(), ArchiveError> {
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf).map_err(|source| ArchiveError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            return Ok(());
        }
        zip.write_all(&buf[..n])
            .map_err(|e| write_error(destination, e))?;
    }
}

impl Archiver for ZipArchiver {
    fn compress(
        &self,
        source: &Path,
        destination: &Path,
        on_event: &mut dyn FnMut(ArchiveEvent),
    ) -> Result<ArchiveSummary, ArchiveError> {
        if !source.is_dir() {
            return Err(ArchiveError::SourceMissing {
                path: source.to_path_buf(),
            });
        }

        match fs::remove_file(destination) {
            Ok(()) => tracing::debug!(path = %destination.display(), "removed stale archive"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(write_error(destination, e)),
        }

        let mut warnings = Vec::new();
        let entries = collect_entries(source, &mut warnings, on_event)?;
        let mut reporter = ProgressReporter::new(entries.len() as u64);

        let file = File::create(destination).map_err(|e| write_error(destination, e))?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.level));

        let mut written = 0u64;
        for (index, (path, is_dir)) in entries.iter().enumerate() {
            let relative = path
                .strip_prefix(source)
                .map_err(|e| write_error(destination, e))?;
            let name = relative.to_string_lossy().replace('\\', "/");

            if *is_dir {
                zip.add_directory(format!("{}/", name), options)
                    .map_err(|e| write_error(destination, e))?;
                written += 1;
            } else {
                match File::open(path) {
                    Ok(mut file) => {
                        zip.start_file(name, options)
                            .map_err(|e| write_error(destination, e))?;
                        copy_into(path, &mut file, &mut zip, destination)?;
                        written += 1;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        let message = format!("skipped {}: file vanished", path.display());
                        on_event(ArchiveEvent::Warning(message.clone()));
                        warnings.push(message);
                    }
                    Err(source) => {
                        return Err(ArchiveError::Read {
                            path: path.clone(),
                            source,
                        })
                    }
                }
            }

            reporter.advance(index as u64 + 1, on_event);
        }

        zip.finish().map_err(|e| write_error(destination, e))?;
        reporter.finish(on_event);

        let total_bytes = fs::metadata(destination)
            .map_err(|e| write_error(destination, e))?
            .len();

        Ok(ArchiveSummary {
            total_bytes,
            entries: written,
            warnings,
        })
    }
}
