//! Conversions from DB models to API response types, centralized here so
//! route handlers and core services don't each reimplement the mapping.

use std::str::FromStr;

use crate::models::{Hold, Order};
use boxoffice_types::{
    api::{HoldResponse, OrderResponse, PriceBreakdown},
    enums::PaymentStatus,
};

impl From<Hold> for HoldResponse {
    fn from(h: Hold) -> Self {
        Self {
            hold_id: h.id,
            event_id: h.event_id,
            seat_ids: h.seat_ids,
            session_id: h.session_id,
            user_id: h.user_id,
            expires_at: h.expires_at,
            created_at: h.created_at,
        }
    }
}

impl From<&Hold> for HoldResponse {
    fn from(h: &Hold) -> Self {
        Self {
            hold_id: h.id,
            event_id: h.event_id,
            seat_ids: h.seat_ids.clone(),
            session_id: h.session_id.clone(),
            user_id: h.user_id,
            expires_at: h.expires_at,
            created_at: h.created_at,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            order_number: o.order_number,
            event_id: o.event_id,
            seat_ids: o.seat_ids,
            customer_email: o.customer_email,
            payment_status: PaymentStatus::from_str(&o.payment_status).unwrap_or_default(),
            payment_intent_id: o.payment_intent_id,
            breakdown: PriceBreakdown {
                subtotal_cents: o.subtotal_cents,
                fees_cents: o.fees_cents,
                tax_cents: o.tax_cents,
                total_cents: o.total_cents,
            },
            ticket_refs: o.ticket_refs,
            mock: o.mock,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}
