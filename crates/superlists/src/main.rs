//! # Superlists CLI
//!
//! Command-line entry point: runs the to-do list web server and inspects
//! stored lists.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;

mod commands;
mod config;

use commands::StoreChoice;

#[derive(Parser)]
#[command(name = "superlists")]
#[command(version)]
#[command(about = "To-do lists, one URL per list", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Store selection shared by commands that touch lists.
#[derive(Args)]
struct StoreArgs {
    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Keep lists in memory only (lost on exit)
    #[arg(long, conflicts_with = "database")]
    in_memory: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Inspect stored lists
    List {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Display version information
    Version,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// Print the items of a list
    Show {
        /// List identifier (as found in its URL)
        id: String,

        /// SQLite database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Count stored lists and items
    Stats {
        /// SQLite database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set the database file
    SetDatabase {
        /// Path of the SQLite database file
        path: PathBuf,
    },

    /// Clear the database file (use the default location)
    ClearDatabase,

    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let telemetry_config =
        superlists_telemetry::TelemetryConfig::new("superlists").with_log_level(&cli.log_level);

    let telemetry_config = if cli.json_logs {
        telemetry_config.with_json_logs()
    } else {
        telemetry_config
    };

    superlists_telemetry::init_logging(&telemetry_config);

    let cfg = config::Config::load();

    match cli.command {
        Commands::Serve { host, port, store } => {
            let host = host.unwrap_or_else(|| cfg.server_host.clone());
            let port = port.unwrap_or(cfg.server_port);
            let store = StoreChoice::resolve(store.in_memory, store.database, &cfg);
            commands::serve(host, port, store, cfg.max_concurrent_requests).await?;
        }

        Commands::List { action } => match action {
            ListAction::Show { id, database } => {
                commands::list_show(id, StoreChoice::resolve(false, database, &cfg)).await?;
            }
            ListAction::Stats { database } => {
                commands::list_stats(StoreChoice::resolve(false, database, &cfg)).await?;
            }
        },

        Commands::Version => {
            commands::version();
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                config::show_config();
            }
            ConfigAction::SetDatabase { path } => {
                let mut cfg = config::Config::load();
                match cfg.set_database(&path) {
                    Ok(()) => {
                        println!("Database set to: {}", path.display());
                        println!("Config saved to: {}", config::Config::config_path().display());
                    }
                    Err(e) => {
                        eprintln!("Failed to save config: {}", e);
                    }
                }
            }
            ConfigAction::ClearDatabase => {
                let mut cfg = config::Config::load();
                match cfg.clear_database() {
                    Ok(()) => {
                        println!("Database cleared.");
                        println!(
                            "Using default: {}",
                            config::Config::default_database_path().display()
                        );
                    }
                    Err(e) => {
                        eprintln!("Failed to save config: {}", e);
                    }
                }
            }
            ConfigAction::Path => {
                println!("{}", config::Config::config_path().display());
            }
        },
    }

    Ok(())
}
