//! The broadcaster is treated as a pluggable sink: one real implementation
//! in production (`boxoffice-realtime`, wired in at `boxoffice-api`'s
//! startup), an in-memory sink in tests. The core never talks to a
//! WebSocket directly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use boxoffice_types::enums::SeatStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatDelta {
    pub seat_id: String,
    pub status: SeatStatus,
}

#[async_trait]
pub trait SeatBroadcaster: Send + Sync {
    async fn publish_availability_update(
        &self,
        event_id: Uuid,
        updates: Vec<SeatDelta>,
        timestamp: DateTime<Utc>,
    );

    async fn publish_hold_expired(&self, event_id: Uuid, seat_ids: Vec<String>, timestamp: DateTime<Utc>);
}

/// Swallows every publish. Used where a broadcaster hasn't been wired in
/// (e.g. standalone jobs binary invocations) — broadcast failures are
/// best-effort and never block the core operation they decorate.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBroadcaster;

#[async_trait]
impl SeatBroadcaster for NullBroadcaster {
    async fn publish_availability_update(
        &self,
        _event_id: Uuid,
        _updates: Vec<SeatDelta>,
        _timestamp: DateTime<Utc>,
    ) {
    }

    async fn publish_hold_expired(&self, _event_id: Uuid, _seat_ids: Vec<String>, _timestamp: DateTime<Utc>) {}
}

/// Records every publish call for assertion in tests (Testable Property 7,
/// "round-trip": exactly one broadcast event per observed transition).
#[derive(Debug, Default)]
pub struct TestSinkBroadcaster {
    pub events: std::sync::Mutex<Vec<BroadcastEvent>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastEvent {
    AvailabilityUpdate { event_id: Uuid, updates: Vec<SeatDelta> },
    HoldExpired { event_id: Uuid, seat_ids: Vec<String> },
}

impl TestSinkBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeatBroadcaster for TestSinkBroadcaster {
    async fn publish_availability_update(
        &self,
        event_id: Uuid,
        updates: Vec<SeatDelta>,
        _timestamp: DateTime<Utc>,
    ) {
        self.events
            .lock()
            .unwrap()
            .push(BroadcastEvent::AvailabilityUpdate { event_id, updates });
    }

    async fn publish_hold_expired(&self, event_id: Uuid, seat_ids: Vec<String>, _timestamp: DateTime<Utc>) {
        self.events
            .lock()
            .unwrap()
            .push(BroadcastEvent::HoldExpired { event_id, seat_ids });
    }
}
