//! Exercises the Checkout Coordinator against the in-memory fakes: the
//! mock-payment happy path, idempotent/webhook finalize, and the
//! store-level-anomaly conflict scenario (S6).

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use boxoffice_core::broadcast::{BroadcastEvent, TestSinkBroadcaster};
use boxoffice_core::cache::NullCache;
use boxoffice_core::checkout::CheckoutCoordinator;
use boxoffice_core::hold::HoldArbiter;
use boxoffice_core::notify::LoggingNotifier;
use boxoffice_core::payment::MockPaymentGateway;
use boxoffice_core::store::{
    FakeEventCatalog, FakeHoldStore, FakeOrderStore, FakeSeatStore, FakeTicketStore, OrderStore, SeatStore,
};
use boxoffice_types::enums::{EventStatus, PaymentStatus, SeatStatus};
use boxoffice_types::AppError;

struct Harness {
    arbiter: Arc<HoldArbiter>,
    coordinator: CheckoutCoordinator,
    seats: Arc<FakeSeatStore>,
    orders: Arc<FakeOrderStore>,
    broadcaster: Arc<TestSinkBroadcaster>,
}

fn wire(event_id: Uuid, seat_ids: &[&str]) -> Harness {
    let catalog = Arc::new(FakeEventCatalog::new());
    catalog.seed_event(
        event_id,
        "E1",
        EventStatus::Published,
        seat_ids.iter().map(|s| s.to_string()).collect(),
    );
    catalog.seed_zone(event_id, "A", "Orchestra", 1_000, "USD");

    let seats = Arc::new(FakeSeatStore::new());
    seats.seed_available(event_id, &seat_ids.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    let holds = Arc::new(FakeHoldStore::new());
    let orders = Arc::new(FakeOrderStore::new());
    let tickets = Arc::new(FakeTicketStore::new());
    let broadcaster = Arc::new(TestSinkBroadcaster::new());

    let arbiter = Arc::new(HoldArbiter::new(
        seats.clone(),
        holds,
        catalog.clone(),
        broadcaster.clone(),
        Arc::new(NullCache),
        10,
        Duration::from_secs(600),
    ));

    let coordinator = CheckoutCoordinator::new(
        arbiter.clone(),
        orders.clone(),
        tickets,
        catalog,
        seats.clone(),
        Arc::new(MockPaymentGateway),
        Arc::new(LoggingNotifier),
        broadcaster.clone(),
    );

    Harness {
        arbiter,
        coordinator,
        seats,
        orders,
        broadcaster,
    }
}

#[tokio::test]
async fn s1_happy_path_mock_payment() {
    let event_id = Uuid::new_v4();
    let h = wire(event_id, &["A-R1-S1", "A-R1-S2", "A-R1-S3"]);

    let (order, client_secret) = h
        .coordinator
        .create_checkout_intent(
            event_id,
            vec!["A-R1-S1".to_string()],
            "a@b.com".to_string(),
            "sess1".to_string(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(order.payment_status, PaymentStatus::Succeeded);
    assert!(order.mock);
    assert_eq!(order.ticket_refs.len(), 1);
    assert_eq!(order.subtotal_cents, 1_000);
    assert_eq!(order.fees_cents, 50);
    assert_eq!(order.tax_cents, 80);
    assert_eq!(order.total_cents, 1_130);
    assert!(client_secret.is_none());

    let rows = h.seats.find_many(event_id, &["A-R1-S1".to_string()]).await.unwrap();
    assert_eq!(rows[0].status, SeatStatus::Sold);
    assert_eq!(rows[0].order_ref, Some(order.id));

    let events = h.broadcaster.events.lock().unwrap();
    let sold_update_seen = events.iter().any(|e| match e {
        BroadcastEvent::AvailabilityUpdate { updates, .. } => {
            updates.iter().any(|u| u.seat_id == "A-R1-S1" && u.status == SeatStatus::Sold)
        }
        _ => false,
    });
    assert!(sold_update_seen, "expected a SOLD broadcast for A-R1-S1");
}

#[tokio::test]
async fn finalize_is_idempotent_and_does_not_double_issue_tickets() {
    let event_id = Uuid::new_v4();
    let h = wire(event_id, &["A-R1-S1"]);

    let (order, _) = h
        .coordinator
        .create_checkout_intent(
            event_id,
            vec!["A-R1-S1".to_string()],
            "a@b.com".to_string(),
            "sess1".to_string(),
            None,
        )
        .await
        .unwrap();

    let refinalized = h.coordinator.finalize_order(order.id).await.unwrap();
    assert_eq!(refinalized.ticket_refs, order.ticket_refs);
    assert_eq!(refinalized.ticket_refs.len(), 1);
}

#[tokio::test]
async fn s6_finalize_after_someone_else_sold() {
    let event_id = Uuid::new_v4();
    let h = wire(event_id, &["A-R1-S1"]);

    h.arbiter
        .hold_seats(event_id, vec!["A-R1-S1".to_string()], "sess1".to_string(), None)
        .await
        .unwrap();

    // An order gets created against the held seat, as createCheckoutIntent
    // would leave it: PENDING, seats still HELD (not yet finalized).
    let order = h
        .orders
        .insert(
            Uuid::new_v4(),
            "BX-TEST0001",
            event_id,
            &["A-R1-S1".to_string()],
            "a@b.com",
            None,
            1_000,
            50,
            80,
            1_130,
            false,
        )
        .await
        .unwrap();

    // Force the seat to SOLD under a different order, bypassing Checkout
    // entirely (a store-level anomaly per spec's framing).
    h.seats
        .mark_sold(event_id, &["A-R1-S1".to_string()], Uuid::new_v4())
        .await
        .unwrap();

    let err = h.coordinator.finalize_order(order.id).await.unwrap_err();
    assert!(matches!(err, AppError::SeatConflict(_)));

    let refetched = h.orders.find_by_id(order.id).await.unwrap().unwrap();
    assert_eq!(refetched.payment_status, PaymentStatus::Pending, "order stays PENDING");
    assert!(refetched.ticket_refs.is_empty(), "no tickets created");
}
