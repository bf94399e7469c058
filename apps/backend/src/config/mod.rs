//! Environment-backed engine configuration.

use std::env;
use std::time::Duration;

use crate::error::AppError;

/// Default silent grace before the countdown broadcast, seconds.
pub const DEFAULT_TIMER_GRACE_SECS: u64 = 10;
/// Default visible countdown before auto-action, seconds.
pub const DEFAULT_TIMER_COUNTDOWN_SECS: u64 = 10;
/// Default pause before `clear_table_cards` is broadcast, milliseconds.
pub const DEFAULT_TRICK_CLEAR_DELAY_MS: u64 = 1500;
/// Default pause after `round_complete` before bot-only rooms continue, ms.
pub const DEFAULT_ROUND_SUMMARY_DELAY_MS: u64 = 3000;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub database_url: String,
    pub redis_url: String,
    pub timer_grace: Duration,
    pub timer_countdown: Duration,
    pub trick_clear_delay: Duration,
    pub round_summary_delay: Duration,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: must_var("SPADES_DATABASE_URL")?,
            redis_url: must_var("SPADES_REDIS_URL")?,
            timer_grace: Duration::from_secs(secs_var(
                "SPADES_TIMER_GRACE_SECS",
                DEFAULT_TIMER_GRACE_SECS,
            )?),
            timer_countdown: Duration::from_secs(secs_var(
                "SPADES_TIMER_COUNTDOWN_SECS",
                DEFAULT_TIMER_COUNTDOWN_SECS,
            )?),
            trick_clear_delay: Duration::from_millis(secs_var(
                "SPADES_TRICK_CLEAR_DELAY_MS",
                DEFAULT_TRICK_CLEAR_DELAY_MS,
            )?),
            round_summary_delay: Duration::from_millis(secs_var(
                "SPADES_ROUND_SUMMARY_DELAY_MS",
                DEFAULT_ROUND_SUMMARY_DELAY_MS,
            )?),
        })
    }

    /// Defaults with explicit endpoints, for tests and embedding hosts.
    pub fn with_endpoints(database_url: String, redis_url: String) -> Self {
        Self {
            database_url,
            redis_url,
            timer_grace: Duration::from_secs(DEFAULT_TIMER_GRACE_SECS),
            timer_countdown: Duration::from_secs(DEFAULT_TIMER_COUNTDOWN_SECS),
            trick_clear_delay: Duration::from_millis(DEFAULT_TRICK_CLEAR_DELAY_MS),
            round_summary_delay: Duration::from_millis(DEFAULT_ROUND_SUMMARY_DELAY_MS),
        }
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

fn secs_var(name: &str, default: u64) -> Result<u64, AppError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("'{name}' must be an integer, got '{raw}'"))),
    }
}
