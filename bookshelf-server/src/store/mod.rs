//! Record store abstraction
//!
//! The catalog only talks to a [`BookStore`]. Implementations:
//! - [`PgBookStore`](crate::db::PgBookStore): PostgreSQL `books` table
//! - [`MemoryBookStore`]: in-process, no database required

use async_trait::async_trait;

use crate::models::{Book, NewBook};

pub mod memory;

pub use memory::MemoryBookStore;

/// Store failure, split by whether the backend could be reached at all.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached (connection refused, pool timeout, auth, ...)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other persistence failure. Nothing from the failed call is visible afterwards.
    #[error("store write failed: {0}")]
    Write(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if is_connectivity_error(&e) {
            Self::Unavailable(e.to_string())
        } else {
            Self::Write(e.to_string())
        }
    }
}

/// Classify sqlx errors that mean "could not talk to the database".
fn is_connectivity_error(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db) => db.code().is_some_and(|code| {
            // 08: connection exception, 28: invalid authorization,
            // 3D000: database does not exist, 57P0x: shutdown / not accepting connections
            code.starts_with("08")
                || code.starts_with("28")
                || code == "3D000"
                || code.starts_with("57P0")
        }),
        _ => false,
    }
}

/// Persistence for book records.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books in insertion order. An empty store yields an empty vec.
    async fn list_all(&self) -> Result<Vec<Book>, StoreError>;

    /// Persist a book and return it with its store-assigned id.
    async fn create(&self, book: NewBook) -> Result<Book, StoreError>;

    /// Create the backing table if it does not exist. Safe to call repeatedly.
    async fn ensure_schema(&self) -> Result<(), StoreError>;
}
