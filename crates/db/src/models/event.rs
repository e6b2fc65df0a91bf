use sqlx::FromRow;
use uuid::Uuid;

/// Minimal slice of the external venue/event catalog this subsystem reads
/// from: status gating and the seat index. Full CRUD and SVG authoring
/// live outside this crate's scope.
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub seat_index: Vec<String>,
    pub svg: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PricingZone {
    pub event_id: Uuid,
    pub section_code: String,
    pub name: String,
    pub price_cents: i64,
    pub currency: String,
}
