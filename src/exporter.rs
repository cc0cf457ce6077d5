/*!
 * Directory traversal and export aggregation
 */

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{debug, error, info};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::encoding;
use crate::error::{ExportError, Result};
use crate::filter::{is_excluded, should_descend};
use crate::logging::Diagnostics;
use crate::report::format_summary;
use crate::types::{ExportReport, ExportStats, FileRecord};
use crate::writer::ExportWriter;

/// Prefix of every export file name
pub const EXPORT_FILE_PREFIX: &str = "project_export_";

/// State of a single export, mutated only while the tree is walked
#[derive(Debug)]
pub struct ExportRun {
    /// Export document being written
    pub output_file: PathBuf,
    /// Wall-clock start, used for the file name
    pub started_at: DateTime<Local>,
    pub total_chars: usize,
    pub file_count: usize,
    pub total_file_size: u64,
    pub skipped_dirs: Vec<PathBuf>,
    pub skipped_files: Vec<PathBuf>,
    clock: Instant,
}

impl ExportRun {
    fn new(output_file: PathBuf, started_at: DateTime<Local>) -> Self {
        Self {
            output_file,
            started_at,
            total_chars: 0,
            file_count: 0,
            total_file_size: 0,
            skipped_dirs: Vec::new(),
            skipped_files: Vec::new(),
            clock: Instant::now(),
        }
    }

    fn record_written(&mut self, record: &FileRecord) {
        self.file_count += 1;
        self.total_chars += record.char_count();
        self.total_file_size += record.size;
    }

    fn finish(&self) -> ExportStats {
        ExportStats {
            total_chars: self.total_chars,
            file_count: self.file_count,
            total_file_size: self.total_file_size,
            skipped_dirs: self.skipped_dirs.len(),
            skipped_files: self.skipped_files.len(),
            duration: self.clock.elapsed(),
        }
    }
}

/// Walks a directory tree and writes every admitted text file into one export
pub struct Exporter {
    config: Config,
}

impl Exporter {
    /// Create a new exporter
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Path of the export document for a run started at `started_at`
    pub fn output_path(&self, started_at: DateTime<Local>) -> PathBuf {
        self.config.output_dir.join(format!(
            "{}{}.txt",
            EXPORT_FILE_PREFIX,
            started_at.format("%Y%m%d_%H%M%S")
        ))
    }

    /// Export the configured tree, starting the clock now
    pub fn run(&self, diagnostics: &Diagnostics) -> Result<ExportReport> {
        self.run_at(diagnostics, Local::now())
    }

    /// Export the configured tree as a run started at `started_at`.
    ///
    /// Failures on individual input files are logged and skipped. Any failure
    /// on the output directory or export document aborts the run.
    pub fn run_at(
        &self,
        diagnostics: &Diagnostics,
        started_at: DateTime<Local>,
    ) -> Result<ExportReport> {
        diagnostics.in_scope(|| {
            let output_file = self.output_path(started_at);
            let report = self.export(output_file.clone(), started_at).map_err(|e| {
                error!("Failed to write to {}: {}", output_file.display(), e);
                e
            })?;

            info!("{}", report.summary.trim_end());
            if !report.skipped_dirs.is_empty() {
                info!("Skipped directories:");
                for dir in &report.skipped_dirs {
                    info!("{}", dir.display());
                }
            }
            if !report.skipped_files.is_empty() {
                info!("Skipped files:");
                for file in &report.skipped_files {
                    info!("{}", file.display());
                }
            }

            Ok(report)
        })
    }

    fn export(&self, output_file: PathBuf, started_at: DateTime<Local>) -> Result<ExportReport> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|e| ExportError::io(output_dir, e))?;
        let output_dir =
            fs::canonicalize(output_dir).map_err(|e| ExportError::io(output_dir, e))?;

        let mut writer = ExportWriter::create(&output_file)?;
        let mut run = ExportRun::new(output_file, started_at);

        self.visit_directory(&self.config.target_dir, &output_dir, &mut run, &mut writer)?;

        let finished_at = Local::now();
        let stats = run.finish();
        let summary = format_summary(&stats);
        writer.write_summary(&summary)?;
        writer.finish()?;

        Ok(ExportReport {
            output_file: run.output_file,
            started_at: run.started_at,
            finished_at,
            stats,
            skipped_dirs: run.skipped_dirs,
            skipped_files: run.skipped_files,
            summary,
        })
    }

    /// Export the files of `dir`, then recurse into its admitted subdirectories.
    ///
    /// Only errors on the export stream are returned.
    fn visit_directory<W: Write>(
        &self,
        dir: &Path,
        output_dir: &Path,
        run: &mut ExportRun,
        writer: &mut ExportWriter<W>,
    ) -> Result<()> {
        let (subdirs, files) = list_directory(dir);

        for entry in files {
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy();

            if is_excluded(&file_name, &self.config.excluded_names) {
                run.skipped_files.push(path.to_path_buf());
                continue;
            }

            match read_file(path) {
                Ok(record) => {
                    writer.write_file(&record)?;
                    debug!("Exported {} as {}", path.display(), record.encoding);
                    run.record_written(&record);
                }
                Err(e) => error!("Skipping file {}: {}", path.display(), e),
            }
        }

        for entry in subdirs {
            let path = entry.path();
            let dir_name = entry.file_name().to_string_lossy();

            // Pruned directories are left out silently, not counted
            if !should_descend(&dir_name) || is_same_dir(path, output_dir) {
                continue;
            }

            // Listed a moment ago but gone before we could enter it
            if !path.is_dir() {
                run.skipped_dirs.push(path.to_path_buf());
                continue;
            }

            self.visit_directory(path, output_dir, run, writer)?;
        }

        Ok(())
    }
}

/// List the immediate entries of `dir` sorted by name, split into real
/// subdirectories and everything that reads like a file.
///
/// Symlinks to directories are neither; they are not followed.
fn list_directory(dir: &Path) -> (Vec<DirEntry>, Vec<DirEntry>) {
    let mut subdirs = Vec::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                error!(
                    "Skipping unreadable entry in {}: {}",
                    dir.display(),
                    ExportError::from(e)
                );
                continue;
            }
        };

        if entry.file_type().is_dir() {
            subdirs.push(entry);
        } else if !entry.path().is_dir() {
            files.push(entry);
        }
    }

    (subdirs, files)
}

/// Read a file once and decode it under its detected encoding
fn read_file(path: &Path) -> Result<FileRecord> {
    let bytes = fs::read(path).map_err(|e| ExportError::io(path, e))?;
    let encoding = encoding::detect(&bytes);
    let contents = encoding::decode(path, &bytes, encoding)?;

    Ok(FileRecord {
        path: path.to_path_buf(),
        encoding,
        contents,
        size: bytes.len() as u64,
    })
}

fn is_same_dir(path: &Path, canonical: &Path) -> bool {
    fs::canonicalize(path).map_or(false, |p| p == canonical)
}
