/*!
 * Plain-text writer for export documents
 */

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};
use crate::report::SEPARATOR;
use crate::types::FileRecord;

/// Buffered writer for a single export document
pub struct ExportWriter<W: Write> {
    /// Destination path, used for error reporting
    path: PathBuf,
    /// Underlying stream
    out: W,
}

impl ExportWriter<BufWriter<File>> {
    /// Create the export file. Fails if a file already exists at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| ExportError::io(path, e))?;

        Ok(Self::new(path, BufWriter::new(file)))
    }
}

impl<W: Write> ExportWriter<W> {
    /// Wrap an arbitrary stream
    pub fn new(path: &Path, out: W) -> Self {
        Self {
            path: path.to_path_buf(),
            out,
        }
    }

    /// Write one labeled file block: header, blank line, contents, blank line
    pub fn write_file(&mut self, record: &FileRecord) -> Result<()> {
        write!(
            self.out,
            "# File: {}\n\n{}\n\n",
            record.path.display(),
            record.contents
        )
        .map_err(|e| ExportError::io(&self.path, e))
    }

    /// Write the closing summary framed by separator lines
    pub fn write_summary(&mut self, summary: &str) -> Result<()> {
        write!(self.out, "{SEPARATOR}\n{summary}{SEPARATOR}\n")
            .map_err(|e| ExportError::io(&self.path, e))
    }

    /// Flush buffered output and hand back the stream
    pub fn finish(mut self) -> Result<W> {
        self.out
            .flush()
            .map_err(|e| ExportError::io(&self.path, e))?;
        Ok(self.out)
    }
}
