//! Friendgraph CLI - Command-line interface for friendgraph
//!
//! This is the main entry point. It sets up logging, reads the config
//! file, and runs the HTTP server.

use clap::{Parser, Subcommand};
use colored::Colorize;
use friendgraph_server::Language;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "friendgraph")]
#[command(author = "Friendgraph Contributors")]
#[command(version)]
#[command(about = "In-memory social graph over HTTP", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Headless mode: bind to 0.0.0.0 for remote access (Docker/Server)
        #[arg(long)]
        headless: bool,

        /// Response language: ru or en
        #[arg(long)]
        lang: Option<Language>,

        /// Config file (defaults to .friendgraph/config.json if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration
    CheckConfig {
        /// Config file (defaults to .friendgraph/config.json if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Serve {
            port,
            headless,
            lang,
            config,
        } => {
            commands::serve(commands::ServeOptions {
                port,
                headless,
                lang,
                config,
            })
            .await
        }
        Commands::CheckConfig { config } => commands::check_config(config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
