//! Inspection commands (locate, chain, check, show)

use std::path::Path;
use std::process::ExitCode;

use crate::config::bundled;
use crate::config::chain::walk_chain;
use crate::config::{
    find_config, load_config_from, load_config_with, ConfigError, LocatedFile, Locations, Origin,
    ResolvedConfig,
};

use super::{OutputFormat, EXIT_ERROR, EXIT_SUCCESS};

/// File the resolution starts from: the `--config` file, or the one the
/// locator finds.
fn starting_file(config: Option<&Path>, locations: &Locations) -> LocatedFile {
    match config {
        // joining an absolute path replaces the base
        Some(path) => LocatedFile { path: locations.project_dir.join(path), origin: Origin::Project },
        None => find_config(locations),
    }
}

fn resolve(config: Option<&Path>, locations: &Locations) -> Result<ResolvedConfig, ConfigError> {
    match config {
        Some(path) => load_config_from(path, locations),
        None => load_config_with(locations),
    }
}

fn print_file(position: usize, file: &LocatedFile) {
    println!("{}: {} ({})", position, file.path.display(), file.origin);
}

/// Execute the locate command
pub fn run_locate(config: Option<&Path>) -> ExitCode {
    let locations = Locations::from_env();
    let start = starting_file(config, &locations);

    if start.path.is_file() {
        println!("{} ({})", start.path.display(), start.origin);
        return ExitCode::from(EXIT_SUCCESS);
    }

    if start.origin == Origin::Preset && bundled::preset_at(&start.path, &locations).is_some() {
        println!("{} ({}, embedded)", start.path.display(), start.origin);
        return ExitCode::from(EXIT_SUCCESS);
    }

    eprintln!("Error: config file not found: {}", start.path.display());
    ExitCode::from(EXIT_ERROR)
}

/// Execute the chain command
pub fn run_chain(config: Option<&Path>) -> ExitCode {
    let locations = Locations::from_env();
    let start = starting_file(config, &locations);

    match walk_chain(start, &locations) {
        Ok(outcome) => {
            for (position, file) in outcome.files.iter().enumerate() {
                print_file(position, file);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the check command
pub fn run_check(config: Option<&Path>) -> ExitCode {
    let locations = Locations::from_env();

    match resolve(config, &locations) {
        Ok(resolved) => {
            let source = resolved
                .source()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            println!("OK: {}x{} canvas from {}", resolved.width(), resolved.height(), source);
            if let Some(background) = &resolved.geometry.background {
                println!(
                    "background: {} ({}x{}{})",
                    background.path.display(),
                    background.width,
                    background.height,
                    if background.embedded { ", embedded" } else { "" }
                );
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the show command
pub fn run_show(config: Option<&Path>, format: OutputFormat) -> ExitCode {
    let locations = Locations::from_env();

    let resolved = match resolve(config, &locations) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let rendered = match format {
        OutputFormat::Toml => resolved.configuration.to_toml().map_err(|e| e.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(&resolved).map_err(|e| e.to_string()),
    };

    match rendered {
        Ok(text) => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: failed to serialize configuration: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
