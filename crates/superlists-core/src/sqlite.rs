//! SQLite-backed list store.
//!
//! Connections are blocking, so every query runs on the tokio blocking pool
//! while holding the connection lock.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::list::{Item, TodoList};
use crate::store::{ListStore, StoreStats};
use crate::types::{ItemText, ListId};

/// SQLite implementation of [`ListStore`].
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// database cannot be opened or migrated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        tracing::debug!(path = %path.display(), "Opening SQLite list store");
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if migrations fail.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock();
            f(&mut guard)
        })
        .await
        .map_err(|e| Error::internal(format!("SQLite task failed: {e}")))?
    }
}

fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
        CREATE TABLE IF NOT EXISTS lists (
            id TEXT PRIMARY KEY
        );
        CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            list_id TEXT NOT NULL REFERENCES lists(id),
            text TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_items_list ON items(list_id);",
    )?;
    Ok(())
}

fn list_exists(conn: &Connection, id: &ListId) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM lists WHERE id = ?1",
            params![id.to_string()],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn load_items(conn: &Connection, id: &ListId) -> Result<Vec<Item>> {
    let mut stmt = conn.prepare("SELECT text FROM items WHERE list_id = ?1 ORDER BY id ASC")?;
    let items = stmt
        .query_map(params![id.to_string()], |row| {
            Ok(Item {
                text: row.get(0)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(items)
}

fn insert_item(conn: &Connection, id: &ListId, text: &ItemText) -> Result<()> {
    conn.execute(
        "INSERT INTO items (list_id, text) VALUES (?1, ?2)",
        params![id.to_string(), text.as_str()],
    )?;
    Ok(())
}

#[async_trait]
impl ListStore for SqliteStore {
    async fn create_list(&self, first: ItemText) -> Result<TodoList> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let id = loop {
                let id = ListId::new();
                let inserted = tx.execute(
                    "INSERT OR IGNORE INTO lists (id) VALUES (?1)",
                    params![id.to_string()],
                )?;
                if inserted == 1 {
                    break id;
                }
            };
            insert_item(&tx, &id, &first)?;
            tx.commit()?;

            Ok(TodoList {
                id,
                items: vec![Item::new(first)],
            })
        })
        .await
    }

    async fn append_item(&self, id: &ListId, text: ItemText) -> Result<TodoList> {
        let id = *id;
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            if !list_exists(&tx, &id)? {
                return Err(Error::list_not_found(id));
            }
            insert_item(&tx, &id, &text)?;
            let items = load_items(&tx, &id)?;
            tx.commit()?;

            Ok(TodoList { id, items })
        })
        .await
    }

    async fn get_list(&self, id: &ListId) -> Result<Option<TodoList>> {
        let id = *id;
        self.with_conn(move |conn| {
            if !list_exists(conn, &id)? {
                return Ok(None);
            }
            let items = load_items(conn, &id)?;
            Ok(Some(TodoList { id, items }))
        })
        .await
    }

    async fn stats(&self) -> Result<StoreStats> {
        self.with_conn(|conn| {
            let (lists, items): (i64, i64) = conn.query_row(
                "SELECT (SELECT COUNT(*) FROM lists), (SELECT COUNT(*) FROM items)",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            Ok(StoreStats {
                lists: u64::try_from(lists).unwrap_or_default(),
                items: u64::try_from(items).unwrap_or_default(),
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ItemText {
        ItemText::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_sqlite_store_keeps_insertion_order() {
        let store = SqliteStore::open_in_memory().unwrap();

        let list = store.create_list(text("공작깃털 사기")).await.unwrap();
        store
            .append_item(&list.id, text("공작깃털을 이용해서 그물 만들기"))
            .await
            .unwrap();
        let list = store.append_item(&list.id, text("그물 던지기")).await.unwrap();

        assert_eq!(
            list.row_labels(),
            vec![
                "1: 공작깃털 사기",
                "2: 공작깃털을 이용해서 그물 만들기",
                "3: 그물 던지기"
            ]
        );
    }

    #[tokio::test]
    async fn test_sqlite_lists_are_isolated() {
        let store = SqliteStore::open_in_memory().unwrap();

        let edith = store.create_list(text("공작깃털 사기")).await.unwrap();
        let francis = store.create_list(text("우유 사기")).await.unwrap();
        assert_ne!(edith.id, francis.id);

        let francis = store.get_list(&francis.id).await.unwrap().unwrap();
        assert_eq!(francis.row_labels(), vec!["1: 우유 사기"]);
        assert_eq!(
            store.stats().await.unwrap(),
            StoreStats { lists: 2, items: 2 }
        );
    }

    #[tokio::test]
    async fn test_sqlite_unknown_list() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = ListId::new();

        assert!(store.get_list(&id).await.unwrap().is_none());
        let err = store.append_item(&id, text("orphan")).await.unwrap_err();
        assert!(matches!(err, Error::ListNotFound { .. }));
        assert_eq!(store.stats().await.unwrap(), StoreStats::default());
    }

    #[tokio::test]
    async fn test_sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("superlists.sqlite3");

        let id = {
            let store = SqliteStore::open(&path).unwrap();
            let list = store.create_list(text("우유 사기")).await.unwrap();
            store.append_item(&list.id, text("빵 사기")).await.unwrap();
            list.id
        };

        let store = SqliteStore::open(&path).unwrap();
        let list = store.get_list(&id).await.unwrap().unwrap();
        assert_eq!(list.row_labels(), vec!["1: 우유 사기", "2: 빵 사기"]);
    }
}
