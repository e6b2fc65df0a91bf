use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use boxoffice_db::{models, queries, PgPool};
use boxoffice_types::{
    enums::{EventStatus, SeatStatus},
    AppError, Result,
};

use super::{
    EventCatalog, EventRow, HoldRow, HoldStore, OrderRow, OrderStore, PricingZoneRow, SeatRow, SeatStore,
    TicketRow, TicketStore,
};

pub struct PgSeatStore {
    pub pool: PgPool,
}

fn row_from_model(m: models::SeatState) -> SeatRow {
    SeatRow {
        seat_id: m.seat_id,
        status: SeatStatus::from_str(&m.status).unwrap_or_default(),
        hold_ref: m.hold_ref,
        order_ref: m.order_ref,
        last_updated: m.last_updated,
    }
}

#[async_trait]
impl SeatStore for PgSeatStore {
    async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<SeatRow>> {
        let rows = queries::seat_state::list_for_event(&self.pool, event_id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(rows.into_iter().map(row_from_model).collect())
    }

    async fn find_many(&self, event_id: Uuid, seat_ids: &[String]) -> Result<Vec<SeatRow>> {
        let rows = queries::seat_state::find_many(&self.pool, event_id, seat_ids)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(rows.into_iter().map(row_from_model).collect())
    }

    async fn try_hold(&self, event_id: Uuid, seat_ids: &[String], hold_id: Uuid) -> Result<Vec<String>> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let granted = queries::seat_state::try_hold_seats(&mut tx, event_id, seat_ids, hold_id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        if granted.len() != seat_ids.len() {
            // Partial grant: compensate within the same transaction so no
            // seat is left dangling in `held` under a hold the caller will
            // never persist.
            queries::seat_state::release_held_by(&mut tx, event_id, hold_id)
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            tx.commit().await.map_err(AppError::Database)?;
            return Ok(Vec::new());
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(granted)
    }

    async fn release_held_by(&self, event_id: Uuid, hold_id: Uuid) -> Result<Vec<String>> {
        queries::seat_state::release_held_by_pool(&self.pool, event_id, hold_id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    async fn mark_sold(&self, event_id: Uuid, seat_ids: &[String], order_id: Uuid) -> Result<Vec<String>> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let sold = queries::seat_state::mark_sold(&mut tx, event_id, seat_ids, order_id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(sold)
    }
}

pub struct PgHoldStore {
    pub pool: PgPool,
}

fn hold_row_from_model(m: models::Hold) -> HoldRow {
    HoldRow {
        id: m.id,
        event_id: m.event_id,
        seat_ids: m.seat_ids,
        session_id: m.session_id,
        user_id: m.user_id,
        expires_at: m.expires_at,
        created_at: m.created_at,
    }
}

#[async_trait]
impl HoldStore for PgHoldStore {
    async fn insert(
        &self,
        id: Uuid,
        event_id: Uuid,
        seat_ids: &[String],
        session_id: &str,
        user_id: Option<Uuid>,
        expires_at: DateTime<Utc>,
    ) -> Result<HoldRow> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let hold = queries::holds::insert(&mut tx, id, event_id, seat_ids, session_id, user_id, expires_at)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(hold_row_from_model(hold))
    }

    async fn extend(&self, id: Uuid, seat_ids: &[String], expires_at: DateTime<Utc>) -> Result<HoldRow> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let hold = queries::holds::extend(&mut tx, id, seat_ids, expires_at)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(hold_row_from_model(hold))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HoldRow>> {
        let hold = queries::holds::find_by_id(&self.pool, id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(hold.map(hold_row_from_model))
    }

    async fn find_by_session(&self, event_id: Uuid, session_id: &str) -> Result<Option<HoldRow>> {
        let hold = queries::holds::find_by_session(&self.pool, event_id, session_id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(hold.map(hold_row_from_model))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        queries::holds::delete(&self.pool, id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    async fn find_expired(&self, before: DateTime<Utc>) -> Result<Vec<HoldRow>> {
        let holds = queries::holds::find_expired(&self.pool, before)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(holds.into_iter().map(hold_row_from_model).collect())
    }
}

pub struct PgOrderStore {
    pub pool: PgPool,
}

fn order_row_from_model(m: models::Order) -> OrderRow {
    OrderRow {
        id: m.id,
        order_number: m.order_number,
        event_id: m.event_id,
        seat_ids: m.seat_ids,
        customer_email: m.customer_email,
        payment_status: m.payment_status.parse().unwrap_or_default(),
        payment_intent_id: m.payment_intent_id,
        subtotal_cents: m.subtotal_cents,
        fees_cents: m.fees_cents,
        tax_cents: m.tax_cents,
        total_cents: m.total_cents,
        ticket_refs: m.ticket_refs,
        mock: m.mock,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert(
        &self,
        id: Uuid,
        order_number: &str,
        event_id: Uuid,
        seat_ids: &[String],
        customer_email: &str,
        payment_intent_id: Option<&str>,
        subtotal_cents: i64,
        fees_cents: i64,
        tax_cents: i64,
        total_cents: i64,
        mock: bool,
    ) -> Result<OrderRow> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let order = queries::orders::insert(
            &mut tx,
            id,
            order_number,
            event_id,
            seat_ids,
            customer_email,
            None,
            None,
            None,
            "pending",
            payment_intent_id,
            subtotal_cents,
            fees_cents,
            tax_cents,
            total_cents,
            mock,
        )
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(order_row_from_model(order))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderRow>> {
        let order = queries::orders::find_by_id(&self.pool, id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(order.map(order_row_from_model))
    }

    async fn find_by_payment_intent(&self, payment_intent_id: &str) -> Result<Option<OrderRow>> {
        let order = queries::orders::find_by_payment_intent(&self.pool, payment_intent_id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(order.map(order_row_from_model))
    }

    async fn mark_succeeded(&self, id: Uuid, ticket_refs: &[Uuid]) -> Result<OrderRow> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let order = queries::orders::mark_succeeded(&mut tx, id, ticket_refs)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(order_row_from_model(order))
    }

    async fn mark_failed(&self, id: Uuid) -> Result<OrderRow> {
        let order = queries::orders::mark_failed(&self.pool, id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(order_row_from_model(order))
    }
}

pub struct PgEventCatalog {
    pub pool: PgPool,
}

#[async_trait]
impl EventCatalog for PgEventCatalog {
    async fn find_event(&self, event_id: Uuid) -> Result<Option<EventRow>> {
        let event = queries::events::find_by_id(&self.pool, event_id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(event.map(|e| EventRow {
            id: e.id,
            name: e.name,
            status: EventStatus::from_str(&e.status).unwrap_or_default(),
            seat_index: e.seat_index,
            svg: e.svg,
        }))
    }

    async fn find_pricing_zone(&self, event_id: Uuid, section_code: &str) -> Result<Option<PricingZoneRow>> {
        let zones = queries::events::list_pricing_zones(&self.pool, event_id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(zones.into_iter().find(|z| z.section_code == section_code).map(|z| PricingZoneRow {
            section_code: z.section_code,
            name: z.name,
            price_cents: z.price_cents,
            currency: z.currency,
        }))
    }
}

pub struct PgTicketStore {
    pub pool: PgPool,
}

fn ticket_row_from_model(m: models::Ticket) -> TicketRow {
    TicketRow {
        id: m.id,
        order_id: m.order_id,
        event_id: m.event_id,
        seat_id: m.seat_id,
        ticket_code: m.ticket_code,
    }
}

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn insert(&self, id: Uuid, order_id: Uuid, event_id: Uuid, seat_id: &str, ticket_code: &str) -> Result<TicketRow> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let ticket = queries::tickets::insert(&mut tx, id, order_id, event_id, seat_id, ticket_code)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(ticket_row_from_model(ticket))
    }

    async fn find_by_order(&self, order_id: Uuid) -> Result<Vec<TicketRow>> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let tickets = queries::tickets::find_by_order(&mut tx, order_id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(tickets.into_iter().map(ticket_row_from_model).collect())
    }
}
