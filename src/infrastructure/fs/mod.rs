//! Local file system resources

mod temp_archive;

pub use temp_archive::{CleanupRegistry, TempArchive};
