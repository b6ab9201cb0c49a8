//! To-do lists and their items.

use serde::Serialize;

use crate::types::{ItemText, ListId};

/// A single entry of a to-do list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// The item text.
    pub text: String,
}

impl Item {
    /// Creates an item from validated text.
    #[must_use]
    pub fn new(text: ItemText) -> Self {
        Self {
            text: text.into_inner(),
        }
    }
}

/// Snapshot of a to-do list: its identity and items in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoList {
    /// List identity.
    pub id: ListId,
    /// Items, oldest first.
    pub items: Vec<Item>,
}

impl TodoList {
    /// Creates an empty list snapshot.
    #[must_use]
    pub fn new(id: ListId) -> Self {
        Self {
            id,
            items: Vec::new(),
        }
    }

    /// Number of items in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over items with their 1-based positions.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.items.iter().enumerate().map(|(idx, item)| (idx + 1, item))
    }

    /// Renders each row as `"<position>: <text>"`.
    #[must_use]
    pub fn row_labels(&self) -> Vec<String> {
        self.numbered()
            .map(|(n, item)| format!("{n}: {}", item.text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> Item {
        Item::new(ItemText::new(text).unwrap())
    }

    #[test]
    fn test_rows_are_numbered_from_one() {
        let mut list = TodoList::new(ListId::new());
        list.items.push(item("공작깃털 사기"));
        list.items.push(item("공작깃털을 이용해서 그물 만들기"));

        assert_eq!(
            list.row_labels(),
            vec!["1: 공작깃털 사기", "2: 공작깃털을 이용해서 그물 만들기"]
        );
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_empty_list() {
        let list = TodoList::new(ListId::new());
        assert!(list.is_empty());
        assert!(list.row_labels().is_empty());
    }
}
