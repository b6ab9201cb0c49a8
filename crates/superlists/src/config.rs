//! Configuration management for the superlists CLI.
//!
//! Configuration is loaded from (in order of precedence):
//! 1. Command-line arguments
//! 2. Environment variables (SUPERLISTS_*)
//! 3. Config file (~/.config/superlists/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file. Falls back to the platform data directory.
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Server host.
    #[serde(default = "default_host")]
    pub server_host: String,

    /// Server port.
    #[serde(default = "default_port")]
    pub server_port: u16,

    /// Maximum concurrent requests served.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_concurrent_requests() -> usize {
    64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            server_host: default_host(),
            server_port: default_port(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

impl Config {
    /// Loads configuration from all sources.
    ///
    /// Reports warnings for configuration errors but falls back to defaults.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        match Self::figment(&config_path).extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("\x1b[33mWarning:\x1b[0m Configuration error, using defaults");
                eprintln!("  Config file: {}", config_path.display());
                eprintln!("  Error: {}", e);
                eprintln!();
                eprintln!("  To fix, edit or delete the config file:");
                eprintln!("    rm {}", config_path.display());
                eprintln!();
                Config::default()
            }
        }
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("SUPERLISTS_"))
    }

    /// Returns the path to the config file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Returns the path to the config directory.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("superlists")
    }

    /// Returns the database file used when none is configured.
    pub fn default_database_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("superlists")
            .join("superlists.sqlite3")
    }

    /// Returns the configured database file, or the default one.
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(Self::default_database_path)
    }

    /// Saves the current configuration to the config file.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::config_path())
    }

    fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(config_path, toml_str)?;
        Ok(())
    }

    /// Sets the database file and saves.
    pub fn set_database(&mut self, path: impl Into<PathBuf>) -> Result<(), std::io::Error> {
        self.database = Some(path.into());
        self.save()
    }

    /// Clears the database file and saves.
    pub fn clear_database(&mut self) -> Result<(), std::io::Error> {
        self.database = None;
        self.save()
    }
}

/// Prints the current configuration and its sources.
pub fn show_config() {
    let config = Config::load();
    let config_path = Config::config_path();

    println!("Superlists Configuration");
    println!("========================\n");

    println!("Config file: {}", config_path.display());
    if config_path.exists() {
        println!("Status: Found\n");
    } else {
        println!("Status: Not found (using defaults)\n");
    }

    println!("Current settings:");
    match &config.database {
        Some(path) => println!("  database: {}", path.display()),
        None => println!(
            "  database: (not set, using {})",
            Config::default_database_path().display()
        ),
    }
    println!("  server_host: {}", config.server_host);
    println!("  server_port: {}", config.server_port);
    println!("  max_concurrent_requests: {}", config.max_concurrent_requests);

    println!("\nEnvironment variables:");
    println!("  SUPERLISTS_DATABASE");
    println!("  SUPERLISTS_SERVER_HOST");
    println!("  SUPERLISTS_SERVER_PORT");
    println!("  SUPERLISTS_MAX_CONCURRENT_REQUESTS");
}
