//! List storage backends.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::list::{Item, TodoList};
use crate::types::{ItemText, ListId};

/// Counts of what a store holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of lists.
    pub lists: u64,
    /// Number of items across all lists.
    pub items: u64,
}

/// Trait for list storage backends.
///
/// Items of one list are only ever visible through that list's identity.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Mints a new list identity and stores `first` as its first item.
    async fn create_list(&self, first: ItemText) -> Result<TodoList>;

    /// Appends an item to an existing list and returns the updated list.
    ///
    /// Fails with [`Error::ListNotFound`] for an unknown identity.
    async fn append_item(&self, id: &ListId, text: ItemText) -> Result<TodoList>;

    /// Gets a list by identity.
    async fn get_list(&self, id: &ListId) -> Result<Option<TodoList>>;

    /// Returns the number of stored lists and items.
    async fn stats(&self) -> Result<StoreStats>;
}

/// In-memory list store (for development/testing).
pub struct InMemoryStore {
    lists: parking_lot::RwLock<HashMap<ListId, Vec<Item>>>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: parking_lot::RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListStore for InMemoryStore {
    async fn create_list(&self, first: ItemText) -> Result<TodoList> {
        let mut lists = self.lists.write();
        let mut id = ListId::new();
        while lists.contains_key(&id) {
            id = ListId::new();
        }

        let items = vec![Item::new(first)];
        lists.insert(id, items.clone());
        Ok(TodoList { id, items })
    }

    async fn append_item(&self, id: &ListId, text: ItemText) -> Result<TodoList> {
        let mut lists = self.lists.write();
        let items = lists.get_mut(id).ok_or_else(|| Error::list_not_found(id))?;
        items.push(Item::new(text));
        Ok(TodoList {
            id: *id,
            items: items.clone(),
        })
    }

    async fn get_list(&self, id: &ListId) -> Result<Option<TodoList>> {
        Ok(self.lists.read().get(id).map(|items| TodoList {
            id: *id,
            items: items.clone(),
        }))
    }

    async fn stats(&self) -> Result<StoreStats> {
        let lists = self.lists.read();
        Ok(StoreStats {
            lists: lists.len() as u64,
            items: lists.values().map(|items| items.len() as u64).sum(),
        })
    }
}
