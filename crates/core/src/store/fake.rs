//! In-memory test doubles for `SeatStore`/`HoldStore`/`OrderStore`. These
//! exist to drive real concurrent `tokio::spawn` tasks through the Hold
//! Arbiter and Checkout Coordinator without a live Postgres, so the
//! no-double-sell and grant-is-all-or-nothing invariants can be asserted
//! under actual contention.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use boxoffice_types::{
    enums::{EventStatus, SeatStatus},
    AppError, Result,
};

use super::{
    EventCatalog, EventRow, HoldRow, HoldStore, OrderRow, OrderStore, PricingZoneRow, SeatRow, SeatStore,
    TicketRow, TicketStore,
};

#[derive(Default)]
pub struct FakeSeatStore {
    // keyed by (event_id, seat_id)
    rows: Mutex<HashMap<(Uuid, String), SeatRow>>,
}

impl FakeSeatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test fixture seeding: inserts `available` rows for a seat index.
    pub fn seed_available(&self, event_id: Uuid, seat_ids: &[String]) {
        let mut rows = self.rows.lock().unwrap();
        for seat_id in seat_ids {
            rows.entry((event_id, seat_id.clone())).or_insert(SeatRow {
                seat_id: seat_id.clone(),
                status: SeatStatus::Available,
                hold_ref: None,
                order_ref: None,
                last_updated: Utc::now(),
            });
        }
    }
}

#[async_trait]
impl SeatStore for FakeSeatStore {
    async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<SeatRow>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|((eid, _), _)| *eid == event_id)
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn find_many(&self, event_id: Uuid, seat_ids: &[String]) -> Result<Vec<SeatRow>> {
        let rows = self.rows.lock().unwrap();
        Ok(seat_ids
            .iter()
            .filter_map(|seat_id| rows.get(&(event_id, seat_id.clone())).cloned())
            .collect())
    }

    async fn try_hold(&self, event_id: Uuid, seat_ids: &[String], hold_id: Uuid) -> Result<Vec<String>> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();

        let all_available = seat_ids.iter().all(|seat_id| {
            rows.get(&(event_id, seat_id.clone()))
                .map(|r| r.status == SeatStatus::Available)
                .unwrap_or(false)
        });

        if !all_available {
            return Ok(Vec::new());
        }

        for seat_id in seat_ids {
            if let Some(row) = rows.get_mut(&(event_id, seat_id.clone())) {
                row.status = SeatStatus::Held;
                row.hold_ref = Some(hold_id);
                row.last_updated = now;
            }
        }

        Ok(seat_ids.to_vec())
    }

    async fn release_held_by(&self, event_id: Uuid, hold_id: Uuid) -> Result<Vec<String>> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let mut released = Vec::new();

        for ((eid, seat_id), row) in rows.iter_mut() {
            if *eid == event_id && row.hold_ref == Some(hold_id) && row.status == SeatStatus::Held {
                row.status = SeatStatus::Available;
                row.hold_ref = None;
                row.last_updated = now;
                released.push(seat_id.clone());
            }
        }

        Ok(released)
    }

    async fn mark_sold(&self, event_id: Uuid, seat_ids: &[String], order_id: Uuid) -> Result<Vec<String>> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let mut sold = Vec::new();

        for seat_id in seat_ids {
            if let Some(row) = rows.get_mut(&(event_id, seat_id.clone())) {
                if row.status != SeatStatus::Sold || row.order_ref == Some(order_id) {
                    row.status = SeatStatus::Sold;
                    row.hold_ref = None;
                    row.order_ref = Some(order_id);
                    row.last_updated = now;
                    sold.push(seat_id.clone());
                }
            }
        }

        Ok(sold)
    }
}

#[derive(Default)]
pub struct FakeHoldStore {
    holds: Mutex<HashMap<Uuid, HoldRow>>,
}

impl FakeHoldStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HoldStore for FakeHoldStore {
    async fn insert(
        &self,
        id: Uuid,
        event_id: Uuid,
        seat_ids: &[String],
        session_id: &str,
        user_id: Option<Uuid>,
        expires_at: DateTime<Utc>,
    ) -> Result<HoldRow> {
        let row = HoldRow {
            id,
            event_id,
            seat_ids: seat_ids.to_vec(),
            session_id: session_id.to_string(),
            user_id,
            expires_at,
            created_at: Utc::now(),
        };
        self.holds.lock().unwrap().insert(id, row.clone());
        Ok(row)
    }

    async fn extend(&self, id: Uuid, seat_ids: &[String], expires_at: DateTime<Utc>) -> Result<HoldRow> {
        let mut holds = self.holds.lock().unwrap();
        let hold = holds
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("hold".to_string()))?;
        hold.seat_ids = seat_ids.to_vec();
        hold.expires_at = expires_at;
        Ok(hold.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HoldRow>> {
        Ok(self.holds.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_session(&self, event_id: Uuid, session_id: &str) -> Result<Option<HoldRow>> {
        Ok(self
            .holds
            .lock()
            .unwrap()
            .values()
            .find(|h| h.event_id == event_id && h.session_id == session_id)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.holds.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn find_expired(&self, before: DateTime<Utc>) -> Result<Vec<HoldRow>> {
        Ok(self
            .holds
            .lock()
            .unwrap()
            .values()
            .filter(|h| h.expires_at < before)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakeOrderStore {
    orders: Mutex<HashMap<Uuid, OrderRow>>,
    next_err: Mutex<Option<AppError>>,
}

impl FakeOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for FakeOrderStore {
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
        let now = Utc::now();
        let row = OrderRow {
            id,
            order_number: order_number.to_string(),
            event_id,
            seat_ids: seat_ids.to_vec(),
            customer_email: customer_email.to_string(),
            payment_status: boxoffice_types::enums::PaymentStatus::Pending,
            payment_intent_id: payment_intent_id.map(str::to_string),
            subtotal_cents,
            fees_cents,
            tax_cents,
            total_cents,
            ticket_refs: Vec::new(),
            mock,
            created_at: now,
            updated_at: now,
        };
        self.orders.lock().unwrap().insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderRow>> {
        Ok(self.orders.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_payment_intent(&self, payment_intent_id: &str) -> Result<Option<OrderRow>> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .values()
            .find(|o| o.payment_intent_id.as_deref() == Some(payment_intent_id))
            .cloned())
    }

    async fn mark_succeeded(&self, id: Uuid, ticket_refs: &[Uuid]) -> Result<OrderRow> {
        if let Some(err) = self.next_err.lock().unwrap().take() {
            return Err(err);
        }
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("order".to_string()))?;
        order.payment_status = boxoffice_types::enums::PaymentStatus::Succeeded;
        order.ticket_refs = ticket_refs.to_vec();
        order.updated_at = Utc::now();
        Ok(order.clone())
    }

    async fn mark_failed(&self, id: Uuid) -> Result<OrderRow> {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("order".to_string()))?;
        order.payment_status = boxoffice_types::enums::PaymentStatus::Failed;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}

#[derive(Default)]
pub struct FakeEventCatalog {
    events: Mutex<HashMap<Uuid, EventRow>>,
    zones: Mutex<HashMap<(Uuid, String), PricingZoneRow>>,
}

impl FakeEventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_event(&self, id: Uuid, name: &str, status: EventStatus, seat_index: Vec<String>) {
        self.events.lock().unwrap().insert(
            id,
            EventRow {
                id,
                name: name.to_string(),
                status,
                seat_index,
                svg: None,
            },
        );
    }

    pub fn seed_zone(&self, event_id: Uuid, section_code: &str, name: &str, price_cents: i64, currency: &str) {
        self.zones.lock().unwrap().insert(
            (event_id, section_code.to_string()),
            PricingZoneRow {
                section_code: section_code.to_string(),
                name: name.to_string(),
                price_cents,
                currency: currency.to_string(),
            },
        );
    }
}

#[async_trait]
impl EventCatalog for FakeEventCatalog {
    async fn find_event(&self, event_id: Uuid) -> Result<Option<EventRow>> {
        Ok(self.events.lock().unwrap().get(&event_id).cloned())
    }

    async fn find_pricing_zone(&self, event_id: Uuid, section_code: &str) -> Result<Option<PricingZoneRow>> {
        Ok(self
            .zones
            .lock()
            .unwrap()
            .get(&(event_id, section_code.to_string()))
            .cloned())
    }
}

#[derive(Default)]
pub struct FakeTicketStore {
    tickets: Mutex<HashMap<Uuid, TicketRow>>,
}

impl FakeTicketStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketStore for FakeTicketStore {
    async fn insert(&self, id: Uuid, order_id: Uuid, event_id: Uuid, seat_id: &str, ticket_code: &str) -> Result<TicketRow> {
        let row = TicketRow {
            id,
            order_id,
            event_id,
            seat_id: seat_id.to_string(),
            ticket_code: ticket_code.to_string(),
        };
        self.tickets.lock().unwrap().insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_order(&self, order_id: Uuid) -> Result<Vec<TicketRow>> {
        Ok(self
            .tickets
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.order_id == order_id)
            .cloned()
            .collect())
    }
}
