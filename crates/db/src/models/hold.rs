use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of `seat_holds`: a session's temporary claim on a set of seats.
#[derive(Debug, Clone, FromRow)]
pub struct Hold {
    pub id: Uuid,
    pub event_id: Uuid,
    pub seat_ids: Vec<String>,
    pub session_id: String,
    pub user_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
