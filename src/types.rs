/*!
 * Core types and data structures for codestract
 */

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};

/// A file that was read and decoded, ready to be written to the export
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Path as reached from the export root
    pub path: PathBuf,
    /// Encoding label the contents were decoded with
    pub encoding: &'static str,
    /// Decoded contents
    pub contents: String,
    /// Size on disk in bytes
    pub size: u64,
}

impl FileRecord {
    /// Length of the contents in characters
    pub fn char_count(&self) -> usize {
        self.contents.chars().count()
    }
}

/// Aggregate statistics of one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Characters across all written files
    pub total_chars: usize,
    /// Number of files written to the export
    pub file_count: usize,
    /// Bytes on disk across all written files
    pub total_file_size: u64,
    /// Number of directories that vanished before they could be entered
    pub skipped_dirs: usize,
    /// Number of excluded files
    pub skipped_files: usize,
    /// Wall-clock time of the run
    pub duration: Duration,
}

/// Outcome of a successful export run
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Export document that was written
    pub output_file: PathBuf,
    /// Start of the run, as encoded in the file name
    pub started_at: DateTime<Local>,
    /// End of the traversal
    pub finished_at: DateTime<Local>,
    /// Final statistics
    pub stats: ExportStats,
    /// Directories that vanished between listing and descent, in visit order
    pub skipped_dirs: Vec<PathBuf>,
    /// Files excluded by name or extension, in visit order
    pub skipped_files: Vec<PathBuf>,
    /// Formatted summary, as appended to the export
    pub summary: String,
}
