use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::SeatStatus;

/// One seat's new status, as carried by `seat_availability_update`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
pub struct SeatUpdate {
    pub seat_id: String,
    pub status: SeatStatus,
}

/// Messages pushed from the realtime broadcaster to room subscribers.
///
/// Delivery is best-effort, at-least-once; clients must treat each update as
/// an idempotent state application rather than an event to be counted.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    SeatAvailabilityUpdate {
        event_id: Uuid,
        updates: Vec<SeatUpdate>,
        timestamp: DateTime<Utc>,
    },
    HoldExpired {
        event_id: Uuid,
        seat_ids: Vec<String>,
        timestamp: DateTime<Utc>,
    },
    HoldExpiringSoon {
        event_id: Uuid,
        expires_at: DateTime<Utc>,
        message: String,
    },
    ViewersUpdate {
        event_id: Uuid,
        count: usize,
    },
    JoinedEvent {
        event_id: Uuid,
        message: String,
    },
    Error {
        message: String,
    },
}

/// Messages a client may send over the WebSocket connection.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    JoinEvent { event_id: Uuid },
    LeaveEvent { event_id: Uuid },
}
