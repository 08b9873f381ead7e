//! HTTP server command
//!
//! Composition root: builds the store, runs the connection initializer,
//! serves until shutdown, then closes the pool.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use bookshelf_server::db::{create_pool, PgBookStore};
use bookshelf_server::http::{run_server, ServerConfig};
use bookshelf_server::{initialize, CatalogService, ExhaustionPolicy, MemoryBookStore};
use clap::Parser;

use super::{DbArgs, RetryArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BOOKSHELF_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Exit with an error if the database is still unreachable after all attempts
    #[arg(long, env = "BOOKSHELF_FAIL_FAST")]
    pub fail_fast: bool,

    /// Serve from an in-memory store instead of PostgreSQL (data is lost on exit)
    #[arg(long, conflicts_with = "fail_fast")]
    pub memory: bool,

    #[command(flatten)]
    pub db: DbArgs,

    #[command(flatten)]
    pub retry: RetryArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
    };

    if args.memory {
        tracing::warn!("Using in-memory book store; nothing will be persisted");
        let catalog = CatalogService::new(Arc::new(MemoryBookStore::new()));
        return run_server(catalog, config).await.context("Server error");
    }

    let on_exhausted = if args.fail_fast {
        ExhaustionPolicy::Abort
    } else {
        ExhaustionPolicy::Continue
    };

    let pool = create_pool(&args.db.db_config(), args.db.pool_settings());
    let store = Arc::new(PgBookStore::new(pool.clone()));

    let served = match initialize(store.as_ref(), &args.retry.policy(on_exhausted)).await {
        Ok(outcome) => {
            tracing::debug!(?outcome, "Connection initializer finished");
            let catalog = CatalogService::new(store);
            run_server(catalog, config).await.context("Server error")
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to initialize database")),
    };

    // Closed on every path, including a failed initializer
    pool.close().await;
    tracing::info!("Database pool closed");

    served
}
