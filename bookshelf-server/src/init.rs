//! Connection initializer
//!
//! Runs `ensure_schema` before the server takes traffic, tolerating a database
//! that is still starting. Only `StoreError::Unavailable` is retried; the delay
//! between attempts is fixed.
//!
//! ```text
//! Attempting --ok--> Succeeded
//!     |
//!     +--unavailable, attempts left--> (sleep retry_delay) --> Attempting
//!     +--unavailable, none left------> ExhaustedRetries
//!     +--other error-----------------> error returned immediately
//! ```

use std::time::Duration;

use crate::store::{BookStore, StoreError};

/// Default number of `ensure_schema` attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default pause between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// What to do once every attempt has failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustionPolicy {
    /// Log and keep starting; data operations report the store as unavailable.
    #[default]
    Continue,
    /// Return [`InitError::Exhausted`] so the caller can stop the process.
    Abort,
}

/// Retry settings for the initializer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub on_exhausted: ExhaustionPolicy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            on_exhausted: ExhaustionPolicy::default(),
        }
    }
}

/// Terminal state of the initializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Succeeded { attempts: u32 },
    ExhaustedRetries { attempts: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("store still unavailable after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: StoreError },

    #[error("schema setup failed: {0}")]
    Schema(StoreError),
}

/// Ensure the store schema exists, retrying while the store is unreachable.
///
/// With [`ExhaustionPolicy::Continue`] this only fails on non-connectivity errors.
pub async fn initialize(
    store: &dyn BookStore,
    policy: &RetryPolicy,
) -> Result<InitOutcome, InitError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        tracing::info!(attempt, max_attempts, "Checking database schema");

        let last = match store.ensure_schema().await {
            Ok(()) => {
                tracing::info!(attempt, "Database schema ready");
                return Ok(InitOutcome::Succeeded { attempts: attempt });
            }
            Err(e @ StoreError::Unavailable(_)) => e,
            Err(e @ StoreError::Write(_)) => {
                tracing::error!(error = %e, "Database schema setup failed");
                return Err(InitError::Schema(e));
            }
        };

        if attempt >= max_attempts {
            tracing::error!(
                attempts = attempt,
                error = %last,
                "FATAL: could not reach the database after {} attempts",
                attempt
            );
            return match policy.on_exhausted {
                ExhaustionPolicy::Continue => {
                    tracing::warn!("Continuing startup; data requests will fail until the database is reachable");
                    Ok(InitOutcome::ExhaustedRetries { attempts: attempt })
                }
                ExhaustionPolicy::Abort => Err(InitError::Exhausted {
                    attempts: attempt,
                    last,
                }),
            };
        }

        tracing::warn!(
            error = %last,
            "Database unreachable, retrying in {}s ({}/{})",
            policy.retry_delay.as_secs(),
            attempt,
            max_attempts
        );
        tokio::time::sleep(policy.retry_delay).await;
    }
}
