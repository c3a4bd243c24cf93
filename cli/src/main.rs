//! meleeguard - replay scenarios and edit indicator settings from a terminal.
//!
//! Usage:
//!   meleeguard replay --path scenarios/melee_cycle.toml
//!   meleeguard config
//!   meleeguard command size 48

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use meleeguard_cli::commands::{self, Applied};
use meleeguard_cli::scenario::Scenario;
use meleeguard_core::config;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Melee position indicator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file against the engine (relative paths also checked
    /// under the user's scenario directory)
    Replay {
        #[arg(short, long)]
        path: PathBuf,
    },
    /// Print the stored settings
    Config,
    /// Apply one slash command to the stored settings
    Command {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        line: Vec<String>,
    },
}

/// Initialize logging, writing to MELEEGUARD_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("MELEEGUARD_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), String> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { path } => {
            let scenario = Scenario::load(&config::resolve_scenario_path(&path))?;
            let reports = scenario.run()?;
            println!("{} steps passed", reports.len());
        }
        Commands::Config => {
            let settings = config::load().map_err(|e| e.to_string())?;
            if let Ok(path) = config::store_path() {
                println!("{}", path.display());
            }
            if let Some(dir) = config::default_data_dir() {
                println!("scenarios: {}", dir.join(config::SCENARIO_DIR).display());
            }
            println!("{}", commands::describe_config(&settings));
        }
        Commands::Command { line } => {
            let joined =
                shlex::try_join(line.iter().map(String::as_str)).map_err(|e| e.to_string())?;
            let command = commands::parse(&joined)?;
            let mut settings = config::load().map_err(|e| e.to_string())?;
            match commands::apply(&command, &mut settings) {
                Applied::Changed(message) => {
                    config::store(&settings).map_err(|e| e.to_string())?;
                    println!("{}", message);
                }
                Applied::Status => println!("{}", commands::describe_config(&settings)),
            }
        }
    }

    Ok(())
}
