/*!
 * Diagnostics sink
 *
 * Log records go through `tracing`. Instead of installing a global
 * subscriber, a [`Diagnostics`] value owns its own dispatcher and is passed
 * to the exporter, which runs inside [`Diagnostics::in_scope`].
 */

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::Dispatch;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, time::ChronoLocal, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::error::{ExportError, Result};

/// File name of the persistent log inside the output directory
pub const LOG_FILE_NAME: &str = "logfile.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Process-wide diagnostics sink
#[derive(Clone)]
pub struct Diagnostics {
    dispatch: Dispatch,
    log_file: Option<PathBuf>,
}

impl Diagnostics {
    /// Log to stderr and append to `<output_dir>/logfile.log`.
    ///
    /// The level defaults to `info` and can be overridden with `RUST_LOG`.
    pub fn init(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|e| ExportError::io(output_dir, e))?;

        let log_path = output_dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| ExportError::io(&log_path, e))?;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = Registry::default()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(timer())
                    .with_writer(io::stderr),
            )
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_timer(timer())
                    .with_writer(Arc::new(file)),
            );

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            log_file: Some(log_path),
        })
    }

    /// Log at `info` and above to an arbitrary writer, without colors
    pub fn with_writer<W>(writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = Registry::default().with(LevelFilter::INFO).with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_timer(timer())
                .with_writer(writer),
        );

        Self {
            dispatch: Dispatch::new(subscriber),
            log_file: None,
        }
    }

    /// Discard every record
    pub fn silent() -> Self {
        Self {
            dispatch: Dispatch::none(),
            log_file: None,
        }
    }

    /// Path of the log file, if this sink writes one
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Run `f` with this sink receiving every `tracing` event it emits
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

fn timer() -> ChronoLocal {
    ChronoLocal::new(TIMESTAMP_FORMAT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_log_file() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("out");

        let diagnostics = Diagnostics::init(&output_dir)?;
        diagnostics.in_scope(|| {
            tracing::info!("hello from the sink");
            tracing::error!("something broke");
        });

        let log_path = diagnostics.log_file().unwrap();
        assert_eq!(log_path, output_dir.join(LOG_FILE_NAME));

        let log = fs::read_to_string(log_path).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO") && lines[0].ends_with("hello from the sink"));
        assert!(lines[1].contains("ERROR") && lines[1].ends_with("something broke"));
        // No escape codes in the file
        assert!(!log.contains('\u{1b}'));
        Ok(())
    }

    #[test]
    fn test_silent_sink_accepts_events() {
        let diagnostics = Diagnostics::silent();
        let value = diagnostics.in_scope(|| {
            tracing::error!("dropped");
            7
        });
        assert_eq!(value, 7);
        assert!(diagnostics.log_file().is_none());
    }
}
