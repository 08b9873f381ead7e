//! Subcommand implementations and their shared arguments

pub mod init_db;
pub mod serve;

use std::time::Duration;

use bookshelf_server::db::config::{
    DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_USER,
};
use bookshelf_server::db::pool::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
use bookshelf_server::db::{DbConfig, PoolSettings};
use bookshelf_server::init::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use bookshelf_server::{ExhaustionPolicy, RetryPolicy};
use clap::Args;

/// Database connection arguments
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database host
    #[arg(long, env = "POSTGRES_HOST", default_value = DEFAULT_HOST)]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "POSTGRES_PORT", default_value_t = DEFAULT_PORT)]
    pub db_port: u16,

    /// Database name
    #[arg(long, env = "POSTGRES_DB", default_value = DEFAULT_DATABASE)]
    pub db_name: String,

    /// Database user
    #[arg(long, env = "POSTGRES_USER", default_value = DEFAULT_USER)]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "POSTGRES_PASSWORD", default_value = DEFAULT_PASSWORD, hide_env_values = true)]
    pub db_password: String,

    /// Maximum pooled connections
    #[arg(long, env = "BOOKSHELF_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection before reporting the database unavailable
    #[arg(
        long,
        env = "BOOKSHELF_ACQUIRE_TIMEOUT_SECS",
        default_value_t = DEFAULT_ACQUIRE_TIMEOUT.as_secs()
    )]
    pub acquire_timeout_secs: u64,
}

impl DbArgs {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            database: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
        }
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}

/// Startup retry arguments
#[derive(Args, Debug, Clone)]
pub struct RetryArgs {
    /// Schema setup attempts before giving up
    #[arg(long, env = "BOOKSHELF_INIT_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub init_attempts: u32,

    /// Seconds between schema setup attempts
    #[arg(
        long,
        env = "BOOKSHELF_RETRY_DELAY_SECS",
        default_value_t = DEFAULT_RETRY_DELAY.as_secs()
    )]
    pub retry_delay_secs: u64,
}

impl RetryArgs {
    pub fn policy(&self, on_exhausted: ExhaustionPolicy) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.init_attempts,
            retry_delay: Duration::from_secs(self.retry_delay_secs),
            on_exhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        db: DbArgs,

        #[command(flatten)]
        retry: RetryArgs,
    }

    #[test]
    fn defaults_match_library() {
        let args = Harness::try_parse_from(["bookshelf"]).unwrap();

        assert_eq!(args.db.pool_settings(), PoolSettings::default());
        assert_eq!(
            args.retry.policy(ExhaustionPolicy::Continue),
            RetryPolicy::default()
        );
    }
}
