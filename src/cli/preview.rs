//! Preview command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::codepage::read_world;
use crate::config::ReportFormat;
use crate::rewrite::format_preview_text;

use super::{resolve_config, rewriter_for, FlipArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Show the first changes per field kind without writing anything.
pub fn run_preview(input: &Path, args: &FlipArgs, samples: usize) -> ExitCode {
    let config = match resolve_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    let rewriter = match rewriter_for(&config) {
        Ok(rewriter) => rewriter,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let text = match read_world(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let report = match rewriter.preview(&text, samples) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match config.report.format {
        ReportFormat::Text => {
            println!("Preview of {} ({})", input.display(), rewriter.options().flip);
            print!("{}", format_preview_text(&report));
            println!("Nothing written. Run `zenflip flip` to apply.");
        }
        ReportFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: Failed to serialize preview: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
    }

    ExitCode::from(EXIT_SUCCESS)
}
