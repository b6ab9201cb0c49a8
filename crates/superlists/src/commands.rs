//! CLI command implementations.

use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::eyre::{eyre, Result, WrapErr};

use superlists_core::{InMemoryStore, ListId, ListStore, SqliteStore};
use superlists_server::{Server, ServerConfig};

use crate::config::Config;

/// Where lists are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChoice {
    /// Non-durable, process-local store.
    InMemory,
    /// SQLite database file.
    Sqlite(PathBuf),
}

impl StoreChoice {
    /// Resolves the store from command-line flags and configuration.
    pub fn resolve(in_memory: bool, database: Option<PathBuf>, cfg: &Config) -> Self {
        if in_memory {
            Self::InMemory
        } else {
            Self::Sqlite(database.unwrap_or_else(|| cfg.database_path()))
        }
    }

    fn open(&self) -> Result<Arc<dyn ListStore>> {
        match self {
            Self::InMemory => Ok(Arc::new(InMemoryStore::new())),
            Self::Sqlite(path) => {
                let store = SqliteStore::open(path)
                    .wrap_err_with(|| format!("Failed to open database {}", path.display()))?;
                Ok(Arc::new(store))
            }
        }
    }
}

/// Start the web server.
pub async fn serve(
    host: String,
    port: u16,
    store: StoreChoice,
    max_concurrent_requests: usize,
) -> Result<()> {
    tracing::info!(store = ?store, "Starting superlists server...");

    let addr = format!("{}:{}", host, port)
        .parse::<std::net::SocketAddr>()
        .wrap_err_with(|| format!("Invalid listen address {host}:{port}"))?;
    let config = ServerConfig::builder()
        .addr(addr)
        .max_concurrent_requests(max_concurrent_requests)
        .build();

    let server = Server::new(config, store.open()?);
    server.run().await?;

    Ok(())
}

/// Print the rows of one list.
pub async fn list_show(id: String, store: StoreChoice) -> Result<()> {
    let id: ListId = id.parse()?;
    let store = store.open()?;

    let list = store
        .get_list(&id)
        .await?
        .ok_or_else(|| eyre!("No list with id {}", id))?;

    println!("List {} ({})", list.id, list.id.url());
    for row in list.row_labels() {
        println!("  {}", row);
    }

    Ok(())
}

/// Print how many lists and items are stored.
pub async fn list_stats(store: StoreChoice) -> Result<()> {
    let stats = store.open()?.stats().await?;

    println!("Lists: {}", stats.lists);
    println!("Items: {}", stats.items);

    Ok(())
}

/// Display version information.
pub fn version() {
    println!("superlists {}", env!("CARGO_PKG_VERSION"));
}
