//! Redis read-through cache for room snapshots.
//!
//! The relational store is authoritative. Cache writes happen after a
//! committed transaction; cache failures degrade to store reads and are
//! never surfaced to callers.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::AppError;

/// Seconds before a cached snapshot expires on its own.
pub const CACHE_TTL_SECS: u64 = 3600;

#[derive(Clone)]
pub struct GameCache {
    conn: ConnectionManager,
}

impl GameCache {
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url).map_err(|err| AppError::Config {
            detail: format!("Invalid redis URL: {err}"),
        })?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|err| AppError::Config {
                detail: format!("Unable to initialize redis connection manager: {err}"),
            })?;
        Ok(Self { conn })
    }

    pub async fn read_state<T: DeserializeOwned>(&self, game_id: i64) -> Option<T> {
        self.read_json(state_key(game_id)).await
    }

    pub async fn write_state<T: Serialize>(&self, game_id: i64, value: &T) {
        self.write_json(state_key(game_id), value).await;
    }

    pub async fn read_hands<T: DeserializeOwned>(&self, game_id: i64) -> Option<T> {
        self.read_json(hands_key(game_id)).await
    }

    pub async fn write_hands<T: Serialize>(&self, game_id: i64, value: &T) {
        self.write_json(hands_key(game_id), value).await;
    }

    pub async fn read_bids<T: DeserializeOwned>(&self, game_id: i64) -> Option<T> {
        self.read_json(bids_key(game_id)).await
    }

    pub async fn write_bids<T: Serialize>(&self, game_id: i64, value: &T) {
        self.write_json(bids_key(game_id), value).await;
    }

    pub async fn read_trick<T: DeserializeOwned>(&self, game_id: i64) -> Option<T> {
        self.read_json(trick_key(game_id)).await
    }

    pub async fn write_trick<T: Serialize>(&self, game_id: i64, value: &T) {
        self.write_json(trick_key(game_id), value).await;
    }

    /// Drop every cached key for a game. Used on round boundaries and when a
    /// game reaches a terminal state.
    pub async fn clear_game(&self, game_id: i64) {
        let keys = [
            state_key(game_id),
            hands_key(game_id),
            bids_key(game_id),
            trick_key(game_id),
        ];
        let mut conn = self.conn.clone();
        if let Err(err) = conn.del::<_, ()>(&keys).await {
            warn!(game_id, error = %err, "Cache clear failed");
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: String) -> Option<T> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = match conn.get(&key).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key = %key, error = %err, "Cache read failed");
                return None;
            }
        };
        let raw = raw?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                // A payload we cannot decode is stale by definition.
                warn!(key = %key, error = %err, "Cache payload decode failed, evicting");
                if let Err(del_err) = conn.del::<_, ()>(&key).await {
                    warn!(key = %key, error = %del_err, "Cache eviction failed");
                }
                None
            }
        }
    }

    async fn write_json<T: Serialize>(&self, key: String, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(key = %key, error = %err, "Cache payload encode failed");
                return;
            }
        };
        let mut conn = self.conn.clone();
        if let Err(err) = conn.set_ex::<_, _, ()>(&key, encoded, CACHE_TTL_SECS).await {
            warn!(key = %key, error = %err, "Cache write failed");
        }
    }
}

fn state_key(game_id: i64) -> String {
    format!("game:state:{game_id}")
}

fn hands_key(game_id: i64) -> String {
    format!("game:hands:{game_id}")
}

fn bids_key(game_id: i64) -> String {
    format!("game:bids:{game_id}")
}

fn trick_key(game_id: i64) -> String {
    format!("game:trick:{game_id}")
}
