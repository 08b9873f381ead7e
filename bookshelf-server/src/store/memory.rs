//! In-memory book store
//!
//! Ids start at 1 and increase by one per create. Contents are lost on drop.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{BookStore, StoreError};
use crate::models::{Book, NewBook};

#[derive(Debug, Default)]
struct Inner {
    books: Vec<Book>,
    last_id: i32,
}

/// Book store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    inner: Mutex<Inner>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.inner.lock().await.books.clone())
    }

    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let mut inner = self.inner.lock().await;
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Write("book id sequence exhausted".into()))?;

        let book = book.into_book(id);
        inner.books.push(book.clone());
        inner.last_id = id;
        Ok(book)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
