use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub event_id: Uuid,
    pub seat_ids: Vec<String>,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub user_id: Option<Uuid>,
    pub payment_status: String,
    pub payment_intent_id: Option<String>,
    pub subtotal_cents: i64,
    pub fees_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub ticket_refs: Vec<Uuid>,
    pub mock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
