//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod flip;
mod inspect;
mod preview;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::{glob_with, MatchOptions};

use crate::config::{
    load_config, merge_cli_overrides, CliOverrides, ReportFormat, ZenflipConfig,
};
use crate::rewrite::{FieldRegistry, FlipOptions, Rewriter};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Check if a path has the world file extension (.zen, any case).
pub fn is_zen_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("zen"))
}

/// Find all world files in a directory (recursively), sorted.
pub fn find_zen_files(dir: &Path) -> Vec<PathBuf> {
    let options = MatchOptions { case_sensitive: false, ..MatchOptions::new() };
    let pattern = format!("{}/**/*.zen", glob::Pattern::escape(&dir.display().to_string()));

    let mut files: Vec<PathBuf> = match glob_with(&pattern, options) {
        Ok(paths) => paths.filter_map(Result::ok).filter(|p| p.is_file()).collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub(crate) fn init_logging(verbose: bool) {
    let fallback = if verbose { "zenflip=info" } else { "zenflip=warn" };
    // A second call (e.g. from tests in one process) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

/// Flip settings shared by `flip` and `preview`
#[derive(Debug, Clone, Default)]
pub(crate) struct FlipArgs {
    pub axes: Option<String>,
    pub rotation: bool,
    pub verbose: bool,
    pub format: Option<ReportFormat>,
    pub config: Option<PathBuf>,
}

/// Load config, apply command-line overrides, start logging.
pub(crate) fn resolve_config(args: &FlipArgs) -> Result<ZenflipConfig, String> {
    let mut config = load_config(args.config.as_deref()).map_err(|e| e.to_string())?;
    let overrides = CliOverrides {
        axes: args.axes.clone(),
        rotation: Some(args.rotation),
        verbose: Some(args.verbose),
        format: args.format,
    };
    merge_cli_overrides(&mut config, &overrides).map_err(|e| e.to_string())?;
    init_logging(config.report.verbose);
    Ok(config)
}

/// Build the rewriter a configuration describes.
pub(crate) fn rewriter_for(config: &ZenflipConfig) -> Result<Rewriter, String> {
    let flip = config.axis_flip().map_err(|e| e.to_string())?;
    let registry = FieldRegistry::standard().without(config.fields.disabled.as_slice());
    let options = FlipOptions { flip, verbose: config.report.verbose };
    Ok(Rewriter::new(registry, options))
}

/// Gothic world (.zen) coordinate flipper
#[derive(Parser)]
#[command(name = "zenflip")]
#[command(about = "Mirror Gothic .zen world files along chosen axes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mirror a world file, or every .zen file under a directory
    Flip {
        /// Input .zen file or directory
        input: PathBuf,

        /// Output file (or directory when the input is a directory)
        output: Option<PathBuf>,

        /// Axes to mirror: any combination of x, y, z (default: x)
        #[arg(short, long)]
        axes: Option<String>,

        /// Also reflect rotation matrices and keyframe orientations
        #[arg(short, long)]
        rotation: bool,

        /// Log the first changes of each field kind
        #[arg(short, long)]
        verbose: bool,

        /// Summary format: text or json
        #[arg(long)]
        format: Option<ReportFormat>,

        /// Path to zenflip.toml (default: searched from the working directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the flipped world to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Show what a flip would change without writing anything
    Preview {
        /// Input .zen file
        input: PathBuf,

        /// Axes to mirror: any combination of x, y, z (default: x)
        #[arg(short, long)]
        axes: Option<String>,

        /// Also reflect rotation matrices and keyframe orientations
        #[arg(short, long)]
        rotation: bool,

        /// Samples shown per field kind
        #[arg(long, default_value = "3")]
        samples: usize,

        /// Output format: text or json
        #[arg(long)]
        format: Option<ReportFormat>,

        /// Path to zenflip.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Report line endings, markers and field counts of a world file
    Inspect {
        /// Input .zen file
        input: PathBuf,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: ReportFormat,
    },
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Flip { input, output, axes, rotation, verbose, format, config, stdout } => {
            let args = FlipArgs { axes, rotation, verbose, format, config };
            flip::run_flip(&input, output.as_deref(), &args, stdout)
        }
        Commands::Preview { input, axes, rotation, samples, format, config } => {
            let args = FlipArgs { axes, rotation, verbose: false, format, config };
            preview::run_preview(&input, &args, samples)
        }
        Commands::Inspect { input, format } => inspect::run_inspect(&input, format),
    }
}
