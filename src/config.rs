/*!
 * Configuration handling for codestract
 */

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;

use crate::bail_config;
use crate::error::Result;
use crate::filter::OUTPUT_DIR_NAME;

/// Command-line arguments for codestract
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codestract",
    version = env!("CARGO_PKG_VERSION"),
    about = "Concatenate the text files of a directory tree into a single export",
    long_about = "Walks a directory tree and writes every text file into one timestamped export document, followed by a summary of what was processed and skipped."
)]
pub struct Args {
    /// Root directory to export
    pub directory_path: String,

    /// Comma-separated list of file names to leave out of the export
    #[clap(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Directory exports and logs are written to
    #[clap(long, default_value = OUTPUT_DIR_NAME)]
    pub output_dir: String,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root of the tree to export
    pub target_dir: PathBuf,

    /// File names excluded by exact match
    pub excluded_names: HashSet<String>,

    /// Directory receiving the export and the log file
    pub output_dir: PathBuf,
}

impl Config {
    /// Configuration exporting `target_dir` into the default output directory
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            excluded_names: HashSet::new(),
            output_dir: PathBuf::from(OUTPUT_DIR_NAME),
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: PathBuf::from(args.directory_path),
            excluded_names: args
                .exclude
                .into_iter()
                .filter(|name| !name.is_empty())
                .collect(),
            output_dir: PathBuf::from(args.output_dir),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.is_dir() {
            bail_config!("Target directory not found: {}", self.target_dir.display());
        }
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            bail_config!(
                "Output path exists and is not a directory: {}",
                self.output_dir.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;

    #[test]
    fn test_from_args_defaults() {
        let args = Args::try_parse_from(["codestract", "src"]).unwrap();
        let config = Config::from_args(args);

        assert_eq!(config.target_dir, PathBuf::from("src"));
        assert!(config.excluded_names.is_empty());
        assert_eq!(config.output_dir, PathBuf::from(".codestract"));
    }

    #[test]
    fn test_from_args_exclude_list() {
        let args = Args::try_parse_from([
            "codestract",
            "proj",
            "--exclude",
            "secret.txt,.env.local",
            "--output-dir",
            "/tmp/exports",
        ])
        .unwrap();
        let config = Config::from_args(args);

        assert!(config.excluded_names.contains("secret.txt"));
        assert!(config.excluded_names.contains(".env.local"));
        assert_eq!(config.excluded_names.len(), 2);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_directory_is_required() {
        assert!(Args::try_parse_from(["codestract"]).is_err());
    }

    #[test]
    fn test_validate() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::new(dir.path()).validate().is_ok());

        let missing = Config::new(dir.path().join("nope"));
        assert!(matches!(missing.validate(), Err(ExportError::Config(_))));

        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        let mut config = Config::new(dir.path());
        config.output_dir = file;
        assert!(matches!(config.validate(), Err(ExportError::Config(_))));
    }
}
