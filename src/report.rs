/*!
 * Summary formatting for export runs
 *
 * Renders the statistics of a run as the fixed, labeled block that closes
 * every export document and is echoed to the console.
 */

use std::fmt::Write;
use std::time::Duration;

use crate::types::ExportStats;

/// Line framing the summary block inside the export document
pub const SEPARATOR: &str = "----------------------------------------";

/// Format the run statistics as labeled lines, one per field, in fixed order.
pub fn format_summary(stats: &ExportStats) -> String {
    let mut summary = String::from("Summary:\n");
    // Writing into a String cannot fail
    let _ = writeln!(summary, "- Total characters: {}", stats.total_chars);
    let _ = writeln!(summary, "- Total files processed: {}", stats.file_count);
    let _ = writeln!(summary, "- Total file size: {} bytes", stats.total_file_size);
    let _ = writeln!(summary, "- Skipped directories: {}", stats.skipped_dirs);
    let _ = writeln!(summary, "- Skipped files: {}", stats.skipped_files);
    let _ = writeln!(summary, "- Execution time: {}", format_duration(stats.duration));
    summary
}

/// Format a duration as `H:MM:SS` with a `.ffffff` microsecond suffix when
/// the sub-second part is non-zero.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let micros = duration.subsec_micros();

    if micros == 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}:{:02}.{:06}", hours, minutes, seconds, micros)
    }
}
