//! casioplot - Virtual screen configuration for calculator-style plotting
//!
//! This library provides functionality to:
//! - Locate the configuration file of a project
//! - Follow the `default_to` chain through global and bundled preset files
//! - Validate the merged settings against a fixed schema
//! - Derive the canvas size from a background image

pub mod cli;
pub mod config;
pub mod logging;
pub mod screen;
