use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod config;
mod node;
mod snapshot;

use cli::{Cli, Commands};
use config::{generate_sample_config, generate_sample_script, load_script, save_script, NodeConfig};
use node::Node;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level: Level = cli.log_level.parse().unwrap_or(Level::INFO);
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { output, script } => {
            init_config(output, script)?;
        }
        Commands::Run { config, script } => {
            run_script(config, script)?;
        }
        Commands::Status { config } => {
            show_status(config)?;
        }
        Commands::Keygen => {
            generate_address();
        }
    }

    Ok(())
}

fn load_config(config_path: &Path) -> Result<NodeConfig> {
    info!("Loading configuration from {:?}", config_path);

    if !config_path.exists() {
        error!(
            "Configuration file not found: {:?}. Run 'duoswap init' to create one.",
            config_path
        );
        return Err(anyhow::anyhow!("Configuration file not found"));
    }
    NodeConfig::load(config_path)
}

/// Write sample configuration and script files
fn init_config(output: PathBuf, script: PathBuf) -> Result<()> {
    info!("Generating sample configuration");

    let config = generate_sample_config();
    config.save(&output)?;
    save_script(&generate_sample_script(), &script)?;

    info!("Configuration saved to {:?}", output);
    info!("  Treasury: {}", config.treasury);

    println!("\nConfiguration file created: {}", output.display());
    println!("Sample script created: {}", script.display());
    println!("\nTo execute the script, run:");
    println!(
        "  duoswap run --config {} --script {}",
        output.display(),
        script.display()
    );

    Ok(())
}

/// Execute a script and print each result
fn run_script(config_path: PathBuf, script_path: PathBuf) -> Result<()> {
    let config = load_config(&config_path)?;
    let steps = load_script(&script_path)?;
    info!("Loaded {} steps from {:?}", steps.len(), script_path);

    let mut node = Node::open(config)?;
    let results = node.run_script(&steps)?;
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}

/// Print every pool
fn show_status(config_path: PathBuf) -> Result<()> {
    let config = load_config(&config_path)?;
    let node = Node::open(config)?;

    println!("Pools:");
    println!("{}", serde_json::to_string_pretty(&node.status())?);

    Ok(())
}

/// Generate a new random address
fn generate_address() {
    let address = duoswap_core::Address::random();
    println!("Generated new address:");
    println!("  {}", address.to_hex());
}
