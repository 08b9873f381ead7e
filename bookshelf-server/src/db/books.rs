//! PostgreSQL book store
//!
//! Table layout:
//! - `id SERIAL PRIMARY KEY` (ids assigned by the database sequence)
//! - `title VARCHAR(100) NOT NULL`
//! - `author VARCHAR(100) NOT NULL`
//!
//! Reads and writes create the table first if no `ensure_schema` call has
//! succeeded yet, so a database that came up after startup still works.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::models::{Book, NewBook};
use crate::store::{BookStore, StoreError};

const CREATE_BOOKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        id SERIAL PRIMARY KEY,
        title VARCHAR(100) NOT NULL,
        author VARCHAR(100) NOT NULL
    )
"#;

/// Book store backed by a shared [`PgPool`]
#[derive(Debug, Clone)]
pub struct PgBookStore {
    pool: PgPool,
    schema_ready: Arc<OnceCell<()>>,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema_ready: Arc::new(OnceCell::new()),
        }
    }

    /// Run the DDL once per store; a failed attempt is retried on the next call.
    async fn schema(&self) -> Result<(), StoreError> {
        self.schema_ready
            .get_or_try_init(|| async {
                sqlx::query(CREATE_BOOKS_TABLE).execute(&self.pool).await?;
                Ok::<_, StoreError>(())
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        self.schema().await?;
        let books = sqlx::query_as::<_, Book>("SELECT id, title, author FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Insert inside a transaction; any failure rolls it back before returning.
    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        self.schema().await?;
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author) VALUES ($1, $2) RETURNING id, title, author",
        )
        .bind(book.title())
        .bind(book.author())
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(created) => {
                tx.commit().await?;
                Ok(created)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback after failed insert failed");
                }
                Err(e.into())
            }
        }
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.schema().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use super::*;
    use crate::db::config::live_test_config;
    use crate::db::{create_pool, DbConfig, PoolSettings};
    use crate::models::MAX_FIELD_LEN;

    fn new_book(title: &str, author: &str) -> NewBook {
        NewBook::new(Some(title.into()), Some(author.into())).unwrap()
    }

    fn unreachable_store() -> PgBookStore {
        let config = DbConfig {
            host: "127.0.0.1".into(),
            port: 1,
            ..DbConfig::default()
        };
        let settings = PoolSettings {
            max_connections: 1,
            acquire_timeout: Duration::from_millis(500),
        };
        PgBookStore::new(create_pool(&config, settings))
    }

    #[tokio::test]
    async fn unreachable_database_is_unavailable() {
        let store = unreachable_store();

        let err = store.list_all().await.unwrap_err();
        assert!(err.is_unavailable(), "unexpected error: {err}");

        let err = store.create(new_book("Dune", "Frank Herbert")).await.unwrap_err();
        assert!(err.is_unavailable(), "unexpected error: {err}");

        let err = store.ensure_schema().await.unwrap_err();
        assert!(err.is_unavailable(), "unexpected error: {err}");
    }

    // Integration tests - run against a scratch database
    // cargo test -p bookshelf-server -- --ignored

    async fn live_store() -> PgBookStore {
        let store = PgBookStore::new(create_pool(&live_test_config(), PoolSettings::default()));
        store.ensure_schema().await.expect("schema creation failed");
        store
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn reads_create_schema_without_explicit_setup() {
        let store = PgBookStore::new(create_pool(&live_test_config(), PoolSettings::default()));
        store.list_all().await.expect("list without ensure_schema failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn rejected_insert_leaves_no_record() {
        const AUTHOR: &str = "Rollback Check Author";
        let store = live_store().await;

        // VARCHAR(100) refuses this with SQLSTATE 22001
        let too_long = "a".repeat(MAX_FIELD_LEN + 1);
        let err = store
            .create(NewBook::unchecked(&too_long, AUTHOR))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Write(_)), "unexpected error: {err}");

        // NUL bytes are refused with SQLSTATE 22021
        let err = store
            .create(NewBook::unchecked("Du\0ne", AUTHOR))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Write(_)), "unexpected error: {err}");

        let books = store.list_all().await.unwrap();
        assert!(books.iter().all(|b| b.author != AUTHOR));

        // The pool is still usable after the rollbacks
        store.create(new_book("Dune", "Frank Herbert")).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_schema_is_idempotent() {
        let store = live_store().await;
        let created = store.create(new_book("Dune", "Frank Herbert")).await.unwrap();

        store.ensure_schema().await.unwrap();
        store.ensure_schema().await.unwrap();

        let books = store.list_all().await.unwrap();
        assert!(books.contains(&created));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_list_round_trip() {
        let store = live_store().await;

        let created = store.create(new_book("Emma", "Jane Austen")).await.unwrap();
        assert_eq!(created.title, "Emma");
        assert_eq!(created.author, "Jane Austen");

        let books = store.list_all().await.unwrap();
        assert_eq!(books.iter().filter(|b| b.id == created.id).count(), 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_creates_get_distinct_ids() {
        let store = live_store().await;

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(new_book(&format!("Title {i}"), &format!("Author {i}")))
                        .await
                        .expect("concurrent create failed")
                        .id
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.expect("task panicked")));
        }
        assert_eq!(ids.len(), 10);
    }
}
