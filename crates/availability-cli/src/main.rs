use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "availability-cli", version, about = "Weekly availability table CLI")]
struct Cli {
    /// Config file (default: $AVAILABILITY_CONFIG or ~/.config/availability/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the schedule grid as JSON
    Generate(commands::generate::GenerateArgs),
    /// Render the schedule as an HTML page
    Render(commands::render::RenderArgs),
    /// Print the level stylesheet
    Styles,
    /// Show the Monday a schedule generated now would start on
    Anchor {
        /// Reference time ("YYYY-MM-DD HH:MM"), defaults to now
        #[arg(long)]
        now: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Custom event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;
    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(config_path, args),
        Commands::Render(args) => commands::render::run(config_path, args),
        Commands::Styles => commands::render::styles(config_path),
        Commands::Anchor { now } => commands::generate::anchor(now),
        Commands::Config { action } => commands::config::run(config_path, action),
        Commands::Event { action } => commands::event::run(config_path, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
