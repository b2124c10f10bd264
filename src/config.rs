//! Configuration management for the fprettify language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Formatter executable and configuration-file overrides

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the fprettify language server
#[derive(Debug, Parser)]
#[command(name = "fprettify-language-server")]
#[command(about = "Language server bridging Fortran formatting to fprettify")]
#[command(version)]
pub struct Args {
    /// Formatter executable to invoke
    #[arg(
        long,
        default_value = "fprettify",
        help = "Path or name of the fprettify executable (resolved via PATH)"
    )]
    pub formatter: PathBuf,

    /// Explicit configuration file, bypassing workspace discovery
    #[arg(long, help = "Path to an fprettify configuration file")]
    pub config_file: Option<PathBuf>,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Formatter executable, name or path
    pub formatter: PathBuf,
    /// Configuration file explicitly set via command line
    pub cli_config_file: Option<PathBuf>,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        Ok(Config {
            formatter: args.formatter,
            cli_config_file: args.config_file,
            log_level: args.log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            formatter: PathBuf::from("fprettify"),
            cli_config_file: None,
            log_level: "info".to_string(),
        }
    }
}
