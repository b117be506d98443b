//! Flip command implementation

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use tracing::{debug, warn};

use crate::codepage::{encode_single_byte, read_world, write_world};
use crate::config::ReportFormat;
use crate::rewrite::{format_report_text, FlipReport, Rewriter};

use super::{
    find_zen_files, resolve_config, rewriter_for, FlipArgs, EXIT_ERROR, EXIT_INVALID_ARGS,
    EXIT_SUCCESS,
};

/// Mirror one world file, or every world file under a directory.
pub fn run_flip(input: &Path, output: Option<&Path>, args: &FlipArgs, stdout: bool) -> ExitCode {
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

    if !input.exists() {
        eprintln!("Error: Input '{}' not found", input.display());
        return ExitCode::from(EXIT_ERROR);
    }

    if input.is_dir() {
        if stdout {
            eprintln!("Error: --stdout cannot be used with a directory input");
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        let Some(out_dir) = output else {
            eprintln!("Error: Output directory required when the input is a directory");
            return ExitCode::from(EXIT_INVALID_ARGS);
        };
        return run_batch(&rewriter, input, out_dir, config.report.format);
    }

    let report = if stdout {
        let (text, report) = match flip_to_string(&rewriter, input) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };
        let bytes = match encode_single_byte(&text) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };
        if let Err(e) = std::io::stdout().lock().write_all(&bytes) {
            eprintln!("Error: Failed to write to stdout: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        report
    } else {
        let Some(output) = output else {
            eprintln!("Error: Output file required (or use --stdout)");
            return ExitCode::from(EXIT_INVALID_ARGS);
        };
        if same_file(input, output) {
            eprintln!("Error: Output '{}' would overwrite the input", output.display());
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        match flip_file(&rewriter, input, output) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    };

    let summary = match render_summary(&report, config.report.format) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    // Keep stdout clean for the document itself
    if stdout {
        eprint!("{}", summary);
    } else {
        if config.report.format == ReportFormat::Text {
            println!("Flipping {} ({})", input.display(), report.flip);
        }
        print!("{}", summary);
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn run_batch(rewriter: &Rewriter, input: &Path, out_dir: &Path, format: ReportFormat) -> ExitCode {
    if same_file(input, out_dir) {
        eprintln!("Error: Output directory '{}' would overwrite the input", out_dir.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let files = find_zen_files(input);
    if files.is_empty() {
        eprintln!("Error: No .zen files found in '{}'", input.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut total = FlipReport::new(rewriter.options().flip);
    let mut failed = 0;

    for (i, path) in files.iter().enumerate() {
        let relative = path.strip_prefix(input).unwrap_or(path);
        let target = out_dir.join(relative);
        debug!(file = %path.display(), n = i + 1, of = files.len(), "flipping");

        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error: Failed to create '{}': {}", parent.display(), e);
                failed += 1;
                continue;
            }
        }
        match flip_file(rewriter, path, &target) {
            Ok(report) => {
                if format == ReportFormat::Text {
                    println!(
                        "{} -> {} ({} records)",
                        path.display(),
                        target.display(),
                        report.total_records()
                    );
                }
                total.absorb(&report);
            }
            Err(e) => {
                warn!(file = %path.display(), "flip failed");
                eprintln!("Error: {}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    match render_summary(&total, format) {
        Ok(summary) => print!("{}", summary),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if failed > 0 {
        eprintln!("{} of {} files failed", failed, files.len());
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

fn flip_to_string(rewriter: &Rewriter, input: &Path) -> Result<(String, FlipReport), String> {
    let text = read_world(input).map_err(|e| e.to_string())?;
    let outcome = rewriter.rewrite(&text).map_err(|e| e.to_string())?;
    Ok((outcome.text, outcome.report))
}

fn flip_file(rewriter: &Rewriter, input: &Path, output: &Path) -> Result<FlipReport, String> {
    let (text, report) = flip_to_string(rewriter, input)?;
    write_world(output, &text).map_err(|e| e.to_string())?;
    Ok(report)
}

fn render_summary(report: &FlipReport, format: ReportFormat) -> Result<String, String> {
    match format {
        ReportFormat::Text => Ok(format_report_text(report)),
        ReportFormat::Json => serde_json::to_string_pretty(report)
            .map(|json| json + "\n")
            .map_err(|e| format!("Failed to serialize report: {}", e)),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
