use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::enums::PaymentStatus;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
pub struct CustomerInfo {
    #[validate(email)]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// `POST /orders/checkout-intent` request body.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCheckoutIntentRequest {
    pub event_id: Uuid,
    pub seat_ids: Vec<String>,
    #[validate(nested)]
    pub customer_info: CustomerInfo,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
pub struct PriceBreakdown {
    pub subtotal_cents: i64,
    pub fees_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub event_id: Uuid,
    pub seat_ids: Vec<String>,
    pub customer_email: String,
    pub payment_status: PaymentStatus,
    pub payment_intent_id: Option<String>,
    pub breakdown: PriceBreakdown,
    pub ticket_refs: Vec<Uuid>,
    /// True if this order was finalized synchronously in mock-payment mode
    /// rather than via a webhook-driven `finalize`.
    pub mock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `POST /orders/checkout-intent` response.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
pub struct CheckoutIntentResponse {
    pub order: OrderResponse,
    pub client_secret: Option<String>,
}
