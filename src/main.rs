//! zenflip - Command-line tool for mirroring Gothic world files

use std::process::ExitCode;

use zenflip::cli;

fn main() -> ExitCode {
    cli::run()
}
