use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One seat's ticket, minted at `finalize_order`. `ticket_code` is the
/// opaque payload a `QrCodeEncoder` would render; this crate never renders
/// the image itself.
#[derive(Debug, Clone, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub order_id: Uuid,
    pub event_id: Uuid,
    pub seat_id: String,
    pub ticket_code: String,
    pub created_at: DateTime<Utc>,
}
