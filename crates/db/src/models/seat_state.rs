use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One `(event_id, seat_id)` row as stored in `event_seats`.
#[derive(Debug, Clone, FromRow)]
pub struct SeatState {
    pub event_id: Uuid,
    pub seat_id: String,
    pub status: String,
    pub hold_ref: Option<Uuid>,
    pub order_ref: Option<Uuid>,
    pub version: i64,
    pub last_updated: DateTime<Utc>,
}
