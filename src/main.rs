mod cli;

use clap::{Parser, Subcommand};
use cli::learning::{cmd_learning, LearningCommand};
use cli::resources::{cmd_resources, ResourceCommand};
use cli::settings::{cmd_config_init, cmd_config_show};
use cli::{AppContext, OutputFormat};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mathstar")]
#[command(version, about = "Browse, search and track progress through mathematics learning resources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Configuration file (default: ./mathstar.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Load resources from a JSON catalog instead of the built-in tables
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Preference file (default: [storage] preferences_path)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Resources(ResourceCommand),

    #[command(flatten)]
    Learning(LearningCommand),

    /// Show the effective configuration, or write a default one
    Config {
        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Math Star v{}", env!("CARGO_PKG_VERSION"));

    if let Commands::Config { init: true, force } = cli.command {
        return cmd_config_init(cli.config.as_deref(), force);
    }

    let ctx = AppContext::load(
        cli.config.as_deref(),
        cli.catalog.as_deref(),
        cli.prefs,
        cli.format,
    )?;

    match cli.command {
        Commands::Resources(command) => cmd_resources(&ctx, command)?,
        Commands::Learning(command) => cmd_learning(&ctx, command)?,
        Commands::Config { .. } => cmd_config_show(&ctx)?,
    }
    Ok(())
}
