//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Portico using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Portico - forum database export tool
#[derive(Parser, Debug)]
#[command(name = "portico")]
#[command(version, about, long_about = None)]
#[command(author = "Portico Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "portico.toml", env = "PORTICO_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PORTICO_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the configured tables to the canonical format
    Export(commands::export::ExportArgs),

    /// Check that the source has every required table and column
    Verify(commands::verify::VerifyArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show the canonical table catalog
    Tables(commands::tables::TablesArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
