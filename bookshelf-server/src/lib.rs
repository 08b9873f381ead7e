//! bookshelf-server: library catalog HTTP service
//!
//! Lists and adds book records stored in PostgreSQL (or memory).
//! Layers, leaves first:
//! - [`store`]: the [`BookStore`](store::BookStore) trait and in-memory store
//! - [`db`]: connection settings, pool, and the PostgreSQL store
//! - [`init`]: schema setup with fixed-delay retry at startup
//! - [`service`]: the catalog operations
//! - [`http`]: axum routes and error mapping

pub mod db;
pub mod http;
pub mod init;
pub mod models;
pub mod service;
pub mod store;

pub use init::{initialize, ExhaustionPolicy, InitError, InitOutcome, RetryPolicy};
pub use models::{Book, NewBook, ValidationError};
pub use service::{CatalogError, CatalogService};
pub use store::{BookStore, MemoryBookStore, StoreError};
