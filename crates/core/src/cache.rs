//! Side-channel mirror of live Hold records. Every call site treats a
//! cache miss or cache error identically to a disabled cache: log and
//! fall through to the store of record. Never load-bearing for
//! correctness — only the Hold/SeatState tables are authoritative.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait HoldCache: Send + Sync {
    async fn put(&self, hold_id: Uuid, seat_ids: &[String], expires_at: DateTime<Utc>);

    async fn invalidate(&self, hold_id: Uuid);
}

/// Used when `CACHE_URL` is unset. A real `redis`-backed implementation
/// lives in `boxoffice-integrations::cache`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

#[async_trait]
impl HoldCache for NullCache {
    async fn put(&self, _hold_id: Uuid, _seat_ids: &[String], _expires_at: DateTime<Utc>) {}

    async fn invalidate(&self, _hold_id: Uuid) {}
}
