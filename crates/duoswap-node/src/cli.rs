use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Duoswap - A two-asset constant-product exchange
#[derive(Parser)]
#[command(name = "duoswap")]
#[command(about = "Duoswap exchange runner and utilities")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample configuration and operation script
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "config.json")]
        output: PathBuf,

        /// Output path for the sample script
        #[arg(short, long, default_value = "script.json")]
        script: PathBuf,
    },

    /// Execute an operation script against the exchange
    Run {
        /// Path to configuration file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Path to operation script (JSON list of steps)
        #[arg(short, long, default_value = "script.json")]
        script: PathBuf,
    },

    /// Show every pool and its reserves
    Status {
        /// Path to configuration file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,
    },

    /// Generate a new random address
    Keygen,
}
