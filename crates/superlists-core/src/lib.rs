//! # Superlists Core
//!
//! Core types and storage for the superlists to-do application.
//!
//! This crate provides the pieces shared by the server and the CLI:
//! - The common error type
//! - List and item types with their validation rules
//! - The [`ListStore`] persistence interface and its backends

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod list;
pub mod sqlite;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use list::{Item, TodoList};
pub use sqlite::SqliteStore;
pub use store::{InMemoryStore, ListStore, StoreStats};
pub use types::{ItemText, ListId};
