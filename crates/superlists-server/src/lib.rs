//! # Superlists Server
//!
//! HTTP server rendering to-do lists as HTML pages.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod handlers;
pub mod server;
pub mod views;

pub use server::{AppState, Server, ServerConfig};
