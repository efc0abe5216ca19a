//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod inspect;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::logging::init_logging;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// casioplot - Inspect how the virtual screen configuration is resolved
#[derive(Parser)]
#[command(name = "casioplot")]
#[command(about = "casioplot - Inspect how the virtual screen configuration is resolved")]
#[command(version)]
pub struct Cli {
    /// Start the chain from this file instead of searching for one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log each step of the resolution to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the config file the resolution starts from
    Locate,

    /// Print every file of the default_to chain, most specific first
    Chain,

    /// Resolve the configuration and report whether it is valid
    Check,

    /// Print the resolved configuration
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,
    },
}

/// Output format of `show`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Config file layout, can be saved as `casioplot_config.toml`
    Toml,
    /// Configuration, derived geometry and chain as one JSON object
    Json,
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_INVALID_ARGS } else { EXIT_SUCCESS };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Locate => inspect::run_locate(config),
        Commands::Chain => inspect::run_chain(config),
        Commands::Check => inspect::run_check(config),
        Commands::Show { format } => inspect::run_show(config, format),
    }
}
