//! Catalog service - transport-independent book operations
//!
//! Every store failure is mapped to a [`CatalogError`]; nothing from the store
//! escapes unclassified.

use std::sync::Arc;

use crate::models::{Book, NewBook, ValidationError};
use crate::store::{BookStore, StoreError};

/// Catalog operation failure
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Bad client input; the store was not touched
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store could not be reached
    #[error("book store unavailable")]
    Unavailable,

    /// Any other store failure
    #[error("internal store failure")]
    Internal,
}

/// List and create books over an injected [`BookStore`]
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// All books, in store order.
    pub async fn get_books(&self) -> Result<Vec<Book>, CatalogError> {
        let books = self
            .store
            .list_all()
            .await
            .map_err(|e| store_failure("list books", e))?;
        tracing::debug!(count = books.len(), "Listed books");
        Ok(books)
    }

    /// Validate and persist a new book.
    pub async fn add_book(
        &self,
        title: Option<String>,
        author: Option<String>,
    ) -> Result<Book, CatalogError> {
        let new_book = NewBook::new(title, author)?;
        let book = self
            .store
            .create(new_book)
            .await
            .map_err(|e| store_failure("add book", e))?;
        tracing::info!(id = book.id, title = %book.title, "Book added");
        Ok(book)
    }
}

fn store_failure(operation: &'static str, e: StoreError) -> CatalogError {
    match e {
        StoreError::Unavailable(detail) => {
            tracing::warn!(operation, %detail, "Book store unavailable");
            CatalogError::Unavailable
        }
        StoreError::Write(detail) => {
            tracing::error!(operation, %detail, "Book store failure");
            CatalogError::Internal
        }
    }
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}
