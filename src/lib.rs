/*!
 * codestract - Concatenate a source tree into a single text export
 *
 * This library walks a directory tree, writes the decoded contents of every
 * admitted text file into one timestamped document, and summarizes what was
 * exported and what was skipped.
 */

pub mod config;
pub mod encoding;
pub mod error;
pub mod exporter;
pub mod filter;
pub mod logging;
pub mod report;
pub mod types;
pub mod writer;


// Re-export main components for easier access
pub use config::Config;
pub use error::{ExportError, Result};
pub use exporter::{ExportRun, Exporter};
pub use logging::Diagnostics;
pub use types::{ExportReport, ExportStats, FileRecord};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
