#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod cache;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod protocol;
pub mod repos;
pub mod services;
pub mod telemetry;
pub mod utils;

// Re-exports for public API
pub use spades_migration as migration;

pub use cache::GameCache;
pub use config::EngineConfig;
pub use error::AppError;
pub use errors::DomainError;
pub use infra::db::connect_db;
pub use protocol::{NullBroadcaster, RoomBroadcaster, ServerEvent};
pub use services::room::RoomService;
pub use telemetry::init_tracing;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
