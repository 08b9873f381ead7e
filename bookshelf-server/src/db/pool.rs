//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool connects lazily:
//! reachability is established by the connection initializer, not here.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::DbConfig;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time a caller waits for a connection before the store counts as unavailable.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool sizing and timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

/// Create a PostgreSQL connection pool without connecting.
///
/// Must be called from within a tokio runtime.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DbConfig::default(), PoolSettings::default());
/// ```
pub fn create_pool(config: &DbConfig, settings: PoolSettings) -> PgPool {
    tracing::info!(
        target_url = %config.redacted_url(),
        max_connections = settings.max_connections,
        "Configuring database pool"
    );

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_lazy_with(config.connect_options())
}
