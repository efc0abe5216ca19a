//! casioplot - Command-line tool for inspecting the resolved screen configuration

use std::process::ExitCode;

use casioplot::cli;

fn main() -> ExitCode {
    cli::run()
}
