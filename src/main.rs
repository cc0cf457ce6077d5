/*!
 * Command-line interface for codestract
 */

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use codestract::config::{Args, Config};
use codestract::{Diagnostics, Exporter};

fn main() -> ExitCode {
    // Parse command line arguments; usage errors exit before anything touches disk
    let args = Args::parse();

    // Create configuration
    let config = Config::from_args(args);

    let diagnostics = match Diagnostics::init(&config.output_dir) {
        Ok(diagnostics) => diagnostics,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        diagnostics.in_scope(|| error!("{}", e));
        return ExitCode::FAILURE;
    }

    let exporter = Exporter::new(config);
    match exporter.run(&diagnostics) {
        Ok(report) => {
            println!("{}", report.summary);
            diagnostics.in_scope(|| info!("Code base exported successfully."));
            ExitCode::SUCCESS
        }
        Err(_) => {
            diagnostics.in_scope(|| error!("Failed to export code base."));
            ExitCode::FAILURE
        }
    }
}
