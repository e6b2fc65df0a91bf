//! Side-channel cache for active holds. Never load-bearing for
//! correctness — arbiter state always comes from the seat store — this
//! only warms lookups (e.g. "what does session X currently hold") that
//! would otherwise re-scan the seat table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use boxoffice_core::cache::HoldCache;

#[derive(Serialize, Deserialize)]
struct CachedHold {
    seat_ids: Vec<String>,
    expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct RedisHoldCache {
    conn_manager: ConnectionManager,
}

impl RedisHoldCache {
    pub async fn new(redis_url: &str) -> anyhow::Result<Self> {
        let client = Client::open(redis_url)?;
        let conn_manager = ConnectionManager::new(client).await?;
        Ok(Self { conn_manager })
    }

    fn key(hold_id: Uuid) -> String {
        format!("hold:{hold_id}")
    }
}

#[async_trait]
impl HoldCache for RedisHoldCache {
    async fn put(&self, hold_id: Uuid, seat_ids: &[String], expires_at: DateTime<Utc>) {
        let ttl_seconds = (expires_at - Utc::now()).num_seconds().max(1) as u64;
        let payload = CachedHold {
            seat_ids: seat_ids.to_vec(),
            expires_at,
        };

        let Ok(bytes) = serde_json::to_vec(&payload) else {
            return;
        };

        let mut conn = self.conn_manager.clone();
        if let Err(err) = conn.set_ex::<_, _, ()>(Self::key(hold_id), bytes, ttl_seconds).await {
            tracing::warn!(hold_id = %hold_id, error = %err, "failed to warm hold cache");
        }
    }

    async fn invalidate(&self, hold_id: Uuid) {
        let mut conn = self.conn_manager.clone();
        if let Err(err) = conn.del::<_, ()>(Self::key(hold_id)).await {
            tracing::warn!(hold_id = %hold_id, error = %err, "failed to invalidate hold cache entry");
        }
    }
}
