//! Schema setup command
//!
//! Runs the connection initializer once and exits non-zero if the database
//! never became reachable.

use anyhow::{Context, Result};
use bookshelf_server::db::{create_pool, PgBookStore};
use bookshelf_server::{initialize, ExhaustionPolicy};
use clap::Parser;

use super::{DbArgs, RetryArgs};

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DbArgs,

    #[command(flatten)]
    pub retry: RetryArgs,
}

/// Create the books table, retrying while the database starts
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let pool = create_pool(&args.db.db_config(), args.db.pool_settings());
    let store = PgBookStore::new(pool.clone());

    let result = initialize(&store, &args.retry.policy(ExhaustionPolicy::Abort))
        .await
        .context("Database initialization failed");

    pool.close().await;

    let outcome = result?;
    println!("Database ready ({:?})", outcome);
    Ok(())
}
