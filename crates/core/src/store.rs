//! Trait seams the Hold Arbiter and Checkout Coordinator are written
//! against. The Postgres-backed implementations live in `pg.rs`, backed by
//! `boxoffice_db::queries`; an in-memory fake used only by tests lives in
//! `fake.rs`. Both satisfy the same contract, so the contention algorithm
//! in `hold::arbiter` and `checkout::coordinator` runs unmodified against
//! either.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use boxoffice_types::Result;

pub mod fake;
pub mod pg;

pub use fake::{FakeEventCatalog, FakeHoldStore, FakeOrderStore, FakeSeatStore, FakeTicketStore};
pub use pg::{PgEventCatalog, PgHoldStore, PgOrderStore, PgSeatStore, PgTicketStore};

/// The seat-state side of a single event: the set of `(event_id, seat_id)`
/// rows and their availability.
#[async_trait]
pub trait SeatStore: Send + Sync {
    async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<SeatRow>>;

    async fn find_many(&self, event_id: Uuid, seat_ids: &[String]) -> Result<Vec<SeatRow>>;

    /// Attempts to flip every seat in `seat_ids` from `available` to
    /// `held`, atomically with respect to every other call on this
    /// store. Returns exactly the seat_ids that flipped.
    async fn try_hold(&self, event_id: Uuid, seat_ids: &[String], hold_id: Uuid) -> Result<Vec<String>>;

    /// Releases whatever this `hold_id` currently holds, back to
    /// `available`. Returns the seat_ids released.
    async fn release_held_by(&self, event_id: Uuid, hold_id: Uuid) -> Result<Vec<String>>;

    /// Flips `seat_ids` to `sold` under `order_id`, conditioned only on not
    /// already being sold under a different order. Returns the seat_ids
    /// that flipped; a short count means some seats were no longer
    /// available to this order (sold elsewhere, or never held) when the
    /// call ran — the caller surfaces `SEAT_CONFLICT`. Idempotent: a seat
    /// already sold under this same `order_id` still counts as flipped.
    async fn mark_sold(&self, event_id: Uuid, seat_ids: &[String], order_id: Uuid) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRow {
    pub seat_id: String,
    pub status: boxoffice_types::enums::SeatStatus,
    pub hold_ref: Option<Uuid>,
    pub order_ref: Option<Uuid>,
    pub last_updated: DateTime<Utc>,
}

#[async_trait]
pub trait HoldStore: Send + Sync {
    async fn insert(
        &self,
        id: Uuid,
        event_id: Uuid,
        seat_ids: &[String],
        session_id: &str,
        user_id: Option<Uuid>,
        expires_at: DateTime<Utc>,
    ) -> Result<HoldRow>;

    /// Augments an existing Hold with a new (unioned) seat set and resets
    /// `expires_at`.
    async fn extend(&self, id: Uuid, seat_ids: &[String], expires_at: DateTime<Utc>) -> Result<HoldRow>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HoldRow>>;

    async fn find_by_session(&self, event_id: Uuid, session_id: &str) -> Result<Option<HoldRow>>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn find_expired(&self, before: DateTime<Utc>) -> Result<Vec<HoldRow>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub seat_ids: Vec<String>,
    pub session_id: String,
    pub user_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<OrderRow>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderRow>>;

    async fn find_by_payment_intent(&self, payment_intent_id: &str) -> Result<Option<OrderRow>>;

    async fn mark_succeeded(&self, id: Uuid, ticket_refs: &[Uuid]) -> Result<OrderRow>;

    async fn mark_failed(&self, id: Uuid) -> Result<OrderRow>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub event_id: Uuid,
    pub seat_ids: Vec<String>,
    pub customer_email: String,
    pub payment_status: boxoffice_types::enums::PaymentStatus,
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

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn insert(&self, id: Uuid, order_id: Uuid, event_id: Uuid, seat_id: &str, ticket_code: &str) -> Result<TicketRow>;

    async fn find_by_order(&self, order_id: Uuid) -> Result<Vec<TicketRow>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub event_id: Uuid,
    pub seat_id: String,
    pub ticket_code: String,
}

/// Minimal read-only slice of the external venue/event catalog: status
/// gating and the pricing-zone lookup Checkout needs. Full CRUD, SVG
/// authoring, and seat-map layout live outside this crate's scope.
#[async_trait]
pub trait EventCatalog: Send + Sync {
    async fn find_event(&self, event_id: Uuid) -> Result<Option<EventRow>>;

    async fn find_pricing_zone(&self, event_id: Uuid, section_code: &str) -> Result<Option<PricingZoneRow>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub id: Uuid,
    pub name: String,
    pub status: boxoffice_types::enums::EventStatus,
    pub seat_index: Vec<String>,
    pub svg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingZoneRow {
    pub section_code: String,
    pub name: String,
    pub price_cents: i64,
    pub currency: String,
}
