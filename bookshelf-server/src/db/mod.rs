//! Database layer - connection settings, pool and the PostgreSQL book store
//!
//! # Design Principles
//!
//! - One shared pool, created lazily so startup never blocks on the database
//! - Acquire timeout bounds how long a request waits on an unreachable server
//! - Single-statement inserts inside a transaction, rolled back on failure

pub mod books;
pub mod config;
pub mod pool;

pub use books::PgBookStore;
pub use config::DbConfig;
pub use pool::{create_pool, PoolSettings};
