mod commands;
mod parse;
mod settings;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pinchzoom", about = "Pinch-and-double-tap image zoom viewer tools")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Viewer configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an image and show its size and zoom limits
    Info(commands::info::InfoArgs),
    /// Replay a gesture script against the viewport and print each state
    Gestures(commands::gestures::GesturesArgs),
    /// Print or save the effective viewer configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = settings::load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Info(args) => commands::info::run(args, config),
        Commands::Gestures(args) => commands::gestures::run(args, config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
