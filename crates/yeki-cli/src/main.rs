use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yeki_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "yeki")]
#[command(author, version, about = "Reveal-on-scroll and smooth-scroll navigation, previewed in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of ~/.config/yeki/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll through a page description interactively
    Preview {
        /// Page description (TOML)
        page: PathBuf,
    },
    /// Report which elements are revealed at a scroll offset
    Check {
        /// Page description (TOML)
        page: PathBuf,
        /// Scroll offset in pixels before the reveal pass
        #[arg(short = 's', long, default_value_t = 0.0)]
        scroll: f64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Simulate a click on a navigation link
    Click {
        /// Page description (TOML)
        page: PathBuf,
        /// Link href, e.g. "#services"
        href: String,
        /// Print every animation frame
        #[arg(long)]
        frames: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

fn init_logging(config: &AppConfig, log_file: Option<File>) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        // Keep the alternate screen clean while the preview runs
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn open_log_file(config: &AppConfig) -> Result<File> {
    let dir = config.data_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("preview.log");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = Arc::new(
        AppConfig::load_from(&config_path)
            .with_context(|| format!("loading {}", config_path.display()))?,
    );

    let log_file = match &cli.command {
        Commands::Preview { .. } => Some(open_log_file(&config)?),
        _ => None,
    };
    init_logging(&config, log_file);

    match cli.command {
        Commands::Preview { page } => commands::preview::run(config, &page).await,
        Commands::Check { page, scroll, json } => commands::check::run(&config, &page, scroll, json),
        Commands::Click {
            page,
            href,
            frames,
            json,
        } => commands::click::run(&config, &page, &href, frames, json),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
            ConfigAction::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
        },
    }
}
