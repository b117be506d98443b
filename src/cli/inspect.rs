//! Inspect command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::ReportFormat;
use crate::inspect::{format_inspect_text, inspect_file};

use super::{init_logging, EXIT_ERROR, EXIT_SUCCESS};

/// Print line endings, markers and field counts of a world file.
pub fn run_inspect(input: &Path, format: ReportFormat) -> ExitCode {
    init_logging(false);

    let report = match inspect_file(input) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match format {
        ReportFormat::Text => {
            println!("{}", input.display());
            print!("{}", format_inspect_text(&report));
        }
        ReportFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: Failed to serialize report: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
    }

    ExitCode::from(EXIT_SUCCESS)
}
