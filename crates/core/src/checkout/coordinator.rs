use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use boxoffice_types::{
    enums::{PaymentStatus, SeatStatus},
    AppError, Result,
};

use crate::broadcast::{SeatBroadcaster, SeatDelta};
use crate::codes;
use crate::hold::HoldArbiter;
use crate::notify::Notifier;
use crate::payment::{PaymentGateway, PaymentMetadata};
use crate::pricing::{self, PriceBreakdown};
use crate::store::{EventCatalog, OrderRow, OrderStore, TicketStore};

/// Turns a HELD selection into a SOLD order via an external payment
/// authority, with idempotent finalize semantics.
///
/// `create_checkout_intent` delegates the "seats must be AVAILABLE or
/// already HELD by this session" precondition to the Hold Arbiter itself
/// rather than duplicating its contention algorithm: it calls
/// `hold_seats`, which is a no-op for seats already held by this session
/// and fails with `SEAT_CONFLICT` for anything held live by someone else.
pub struct CheckoutCoordinator {
    arbiter: Arc<HoldArbiter>,
    orders: Arc<dyn OrderStore>,
    tickets: Arc<dyn TicketStore>,
    catalog: Arc<dyn EventCatalog>,
    seats: Arc<dyn crate::store::SeatStore>,
    gateway: Arc<dyn PaymentGateway>,
    notifier: Arc<dyn Notifier>,
    broadcaster: Arc<dyn SeatBroadcaster>,
}

impl CheckoutCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        arbiter: Arc<HoldArbiter>,
        orders: Arc<dyn OrderStore>,
        tickets: Arc<dyn TicketStore>,
        catalog: Arc<dyn EventCatalog>,
        seats: Arc<dyn crate::store::SeatStore>,
        gateway: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn Notifier>,
        broadcaster: Arc<dyn SeatBroadcaster>,
    ) -> Self {
        Self {
            arbiter,
            orders,
            tickets,
            catalog,
            seats,
            gateway,
            notifier,
            broadcaster,
        }
    }

    pub fn orders(&self) -> &Arc<dyn OrderStore> {
        &self.orders
    }

    pub async fn create_checkout_intent(
        &self,
        event_id: Uuid,
        seat_ids: Vec<String>,
        customer_email: String,
        session_id: String,
        user_id: Option<Uuid>,
    ) -> Result<(OrderRow, Option<String>)> {
        self.arbiter
            .hold_seats(event_id, seat_ids.clone(), session_id.clone(), user_id)
            .await?;

        let breakdown: PriceBreakdown = pricing::price_seats(self.catalog.as_ref(), event_id, &seat_ids).await?;

        let order_id = Uuid::new_v4();
        let order_number = codes::generate_order_number();

        let intent = self
            .gateway
            .create_intent(
                breakdown.total_cents,
                PaymentMetadata {
                    event_id,
                    seat_ids: seat_ids.clone(),
                    order_number: order_number.clone(),
                    customer_email: customer_email.clone(),
                    session_id: Some(session_id),
                    user_id,
                },
            )
            .await?;

        let order = self
            .orders
            .insert(
                order_id,
                &order_number,
                event_id,
                &seat_ids,
                &customer_email,
                Some(&intent.id),
                breakdown.subtotal_cents,
                breakdown.fees_cents,
                breakdown.tax_cents,
                breakdown.total_cents,
                self.gateway.is_mock(),
            )
            .await?;

        if self.gateway.is_mock() {
            let order = self.finalize_order(order.id).await?;
            return Ok((order, intent.client_secret));
        }

        Ok((order, intent.client_secret))
    }

    /// Idempotent: returns the order unchanged if it's already `SUCCEEDED`.
    pub async fn finalize_order(&self, order_id: Uuid) -> Result<OrderRow> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        if order.payment_status == PaymentStatus::Succeeded {
            return Ok(order);
        }

        let sold = self.seats.mark_sold(order.event_id, &order.seat_ids, order.id).await?;
        if sold.len() != order.seat_ids.len() {
            return Err(AppError::SeatConflict(order.seat_ids.join(",")));
        }

        let mut ticket_refs = Vec::with_capacity(sold.len());
        for seat_id in &sold {
            let ticket_id = Uuid::new_v4();
            let ticket_code = codes::generate_ticket_code();
            let ticket = self
                .tickets
                .insert(ticket_id, order.id, order.event_id, seat_id, &ticket_code)
                .await?;
            ticket_refs.push(ticket.id);
        }

        let order = self.orders.mark_succeeded(order.id, &ticket_refs).await?;

        self.notifier
            .notify_order_confirmed(order.id, &order.customer_email, ticket_refs.len())
            .await;

        let updates = sold
            .into_iter()
            .map(|seat_id| SeatDelta {
                seat_id,
                status: SeatStatus::Sold,
            })
            .collect();
        self.broadcaster
            .publish_availability_update(order.event_id, updates, Utc::now())
            .await;

        Ok(order)
    }

    /// Webhook path: locates the order by `payment_intent_id` and finalizes
    /// it. Idempotent against duplicate webhook deliveries.
    pub async fn on_payment_success(&self, payment_intent_id: &str) -> Result<OrderRow> {
        let order = self
            .orders
            .find_by_payment_intent(payment_intent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        self.finalize_order(order.id).await
    }

    /// Marks the order `FAILED`. Does not release the held seats — the
    /// Hold's TTL reclaims them, avoiding a race with a late-arriving
    /// success.
    pub async fn on_payment_failure(&self, payment_intent_id: &str) -> Result<OrderRow> {
        let order = self
            .orders
            .find_by_payment_intent(payment_intent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        self.orders.mark_failed(order.id).await
    }
}
