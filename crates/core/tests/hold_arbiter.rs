//! Exercises the Hold Arbiter's contention algorithm against the
//! in-memory fakes, including real concurrent `tokio::spawn` races, so the
//! no-double-sell/all-or-nothing/hold-exclusivity invariants hold under
//! actual parallelism rather than only under sequential calls.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use boxoffice_core::broadcast::NullBroadcaster;
use boxoffice_core::cache::NullCache;
use boxoffice_core::hold::HoldArbiter;
use boxoffice_core::store::{FakeEventCatalog, FakeHoldStore, FakeSeatStore, HoldStore, SeatStore};
use boxoffice_types::enums::{EventStatus, SeatStatus};
use boxoffice_types::AppError;

fn arbiter(catalog: Arc<FakeEventCatalog>, seats: Arc<FakeSeatStore>, holds: Arc<FakeHoldStore>) -> HoldArbiter {
    HoldArbiter::new(
        seats,
        holds,
        catalog,
        Arc::new(NullBroadcaster),
        Arc::new(NullCache),
        10,
        Duration::from_secs(600),
    )
}

fn published_event(seat_ids: &[&str]) -> (Uuid, FakeEventCatalog) {
    let event_id = Uuid::new_v4();
    let catalog = FakeEventCatalog::new();
    catalog.seed_event(
        event_id,
        "E1",
        EventStatus::Published,
        seat_ids.iter().map(|s| s.to_string()).collect(),
    );
    catalog.seed_zone(event_id, "A", "Orchestra", 1_000, "USD");
    (event_id, catalog)
}

#[tokio::test]
async fn s1_happy_path_grant() {
    let (event_id, catalog) = published_event(&["A-R1-S1", "A-R1-S2", "A-R1-S3"]);
    let seats = Arc::new(FakeSeatStore::new());
    seats.seed_available(event_id, &["A-R1-S1".to_string(), "A-R1-S2".to_string(), "A-R1-S3".to_string()]);
    let holds = Arc::new(FakeHoldStore::new());
    let arb = arbiter(Arc::new(catalog), seats.clone(), holds);

    let hold = arb
        .hold_seats(event_id, vec!["A-R1-S1".to_string()], "sess1".to_string(), None)
        .await
        .unwrap();

    assert_eq!(hold.seat_ids, vec!["A-R1-S1".to_string()]);
    let rows = seats.find_many(event_id, &["A-R1-S1".to_string()]).await.unwrap();
    assert_eq!(rows[0].status, SeatStatus::Held);
    assert_eq!(rows[0].hold_ref, Some(hold.id));
}

#[tokio::test]
async fn s2_two_sessions_race_one_seat() {
    let (event_id, catalog) = published_event(&["A-R1-S1"]);
    let seats = Arc::new(FakeSeatStore::new());
    seats.seed_available(event_id, &["A-R1-S1".to_string()]);
    let holds = Arc::new(FakeHoldStore::new());
    let catalog = Arc::new(catalog);

    let arb1 = Arc::new(arbiter(catalog.clone(), seats.clone(), holds.clone()));
    let arb2 = arb1.clone();

    let t1 = tokio::spawn(async move {
        arb1.hold_seats(event_id, vec!["A-R1-S1".to_string()], "sess1".to_string(), None)
            .await
    });
    let t2 = tokio::spawn(async move {
        arb2.hold_seats(event_id, vec!["A-R1-S1".to_string()], "sess2".to_string(), None)
            .await
    });

    let (r1, r2) = (t1.await.unwrap(), t2.await.unwrap());
    let successes = [&r1, &r2].iter().filter(|r| r.is_ok()).count();
    let conflicts = [&r1, &r2]
        .iter()
        .filter(|r| matches!(r, Err(AppError::SeatConflict(_))))
        .count();

    assert_eq!(successes, 1, "exactly one session should win the seat");
    assert_eq!(conflicts, 1, "the loser must see SEAT_CONFLICT");

    let rows = seats.find_many(event_id, &["A-R1-S1".to_string()]).await.unwrap();
    assert_eq!(rows[0].status, SeatStatus::Held);

    let winner_id = r1.as_ref().ok().map(|h| h.id).or_else(|| r2.as_ref().ok().map(|h| h.id));
    assert_eq!(rows[0].hold_ref, winner_id);
}

#[tokio::test]
async fn s3_partial_hold_rolls_back() {
    let (event_id, catalog) = published_event(&["A-R1-S1", "A-R1-S2", "A-R1-S3"]);
    let seats = Arc::new(FakeSeatStore::new());
    seats.seed_available(
        event_id,
        &["A-R1-S1".to_string(), "A-R1-S2".to_string(), "A-R1-S3".to_string()],
    );
    let holds = Arc::new(FakeHoldStore::new());
    let arb = arbiter(Arc::new(catalog), seats.clone(), holds);

    arb.hold_seats(
        event_id,
        vec!["A-R1-S1".to_string(), "A-R1-S2".to_string()],
        "sess1".to_string(),
        None,
    )
    .await
    .unwrap();

    let err = arb
        .hold_seats(
            event_id,
            vec!["A-R1-S2".to_string(), "A-R1-S3".to_string()],
            "sess2".to_string(),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SeatConflict(_)));

    let rows = seats.find_many(event_id, &["A-R1-S3".to_string()]).await.unwrap();
    assert_eq!(rows[0].status, SeatStatus::Available, "no partial hold for sess2");
}

#[tokio::test]
async fn s4_hold_extension_unions_seats() {
    let (event_id, catalog) = published_event(&["A-R1-S1", "A-R1-S2"]);
    let seats = Arc::new(FakeSeatStore::new());
    seats.seed_available(event_id, &["A-R1-S1".to_string(), "A-R1-S2".to_string()]);
    let holds = Arc::new(FakeHoldStore::new());
    let arb = arbiter(Arc::new(catalog), seats.clone(), holds.clone());

    let first = arb
        .hold_seats(event_id, vec!["A-R1-S1".to_string()], "sess1".to_string(), None)
        .await
        .unwrap();

    let second = arb
        .hold_seats(event_id, vec!["A-R1-S2".to_string()], "sess1".to_string(), None)
        .await
        .unwrap();

    assert_eq!(second.id, first.id, "extension reuses the same hold");
    assert_eq!(second.seat_ids.len(), 2);
    assert!(second.seat_ids.contains(&"A-R1-S1".to_string()));
    assert!(second.seat_ids.contains(&"A-R1-S2".to_string()));
    assert!(second.expires_at >= first.expires_at);
}

#[tokio::test]
async fn s5_expiration_reclaims_then_regrants() {
    let (event_id, catalog) = published_event(&["A-R1-S1"]);
    let seats = Arc::new(FakeSeatStore::new());
    seats.seed_available(event_id, &["A-R1-S1".to_string()]);
    let holds = Arc::new(FakeHoldStore::new());
    let catalog = Arc::new(catalog);
    let broadcaster = Arc::new(boxoffice_core::broadcast::TestSinkBroadcaster::new());
    let cache = Arc::new(NullCache);

    let arb = HoldArbiter::new(
        seats.clone(),
        holds.clone(),
        catalog,
        broadcaster.clone(),
        cache.clone(),
        10,
        Duration::from_millis(1),
    );

    let hold = arb
        .hold_seats(event_id, vec!["A-R1-S1".to_string()], "sess1".to_string(), None)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let reclaimed = boxoffice_core::expiration::reclaim_expired_holds(
        seats.as_ref(),
        holds.as_ref(),
        cache.as_ref(),
        broadcaster.as_ref(),
    )
    .await
    .unwrap();
    assert_eq!(reclaimed, 1);

    assert!(holds.find_by_id(hold.id).await.unwrap().is_none());
    let rows = seats.find_many(event_id, &["A-R1-S1".to_string()]).await.unwrap();
    assert_eq!(rows[0].status, SeatStatus::Available);

    let new_hold = arb
        .hold_seats(event_id, vec!["A-R1-S1".to_string()], "sess2".to_string(), None)
        .await
        .unwrap();
    assert_ne!(new_hold.id, hold.id);
}

#[tokio::test]
async fn sold_seat_is_always_a_conflict() {
    let (event_id, catalog) = published_event(&["A-R1-S1"]);
    let seats = Arc::new(FakeSeatStore::new());
    seats.seed_available(event_id, &["A-R1-S1".to_string()]);
    let holds = Arc::new(FakeHoldStore::new());

    let hold_id = Uuid::new_v4();
    seats.try_hold(event_id, &["A-R1-S1".to_string()], hold_id).await.unwrap();
    seats.mark_sold(event_id, &["A-R1-S1".to_string()], Uuid::new_v4()).await.unwrap();

    let arb = arbiter(Arc::new(catalog), seats, holds);
    let err = arb
        .hold_seats(event_id, vec!["A-R1-S1".to_string()], "sess1".to_string(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SeatConflict(_)));
}

#[tokio::test]
async fn unpublished_event_is_invalid_state() {
    let event_id = Uuid::new_v4();
    let catalog = FakeEventCatalog::new();
    catalog.seed_event(event_id, "E1", EventStatus::Draft, vec!["A-R1-S1".to_string()]);
    let seats = Arc::new(FakeSeatStore::new());
    let holds = Arc::new(FakeHoldStore::new());

    let arb = arbiter(Arc::new(catalog), seats, holds);
    let err = arb
        .hold_seats(event_id, vec!["A-R1-S1".to_string()], "sess1".to_string(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn release_seats_requires_owning_session() {
    let (event_id, catalog) = published_event(&["A-R1-S1"]);
    let seats = Arc::new(FakeSeatStore::new());
    seats.seed_available(event_id, &["A-R1-S1".to_string()]);
    let holds = Arc::new(FakeHoldStore::new());
    let arb = arbiter(Arc::new(catalog), seats, holds);

    let hold = arb
        .hold_seats(event_id, vec!["A-R1-S1".to_string()], "sess1".to_string(), None)
        .await
        .unwrap();

    let err = arb.release_seats(hold.id, "sess2").await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    arb.release_seats(hold.id, "sess1").await.unwrap();
}

/// Invariant 3 (hold exclusivity) and invariant 8 (conservation), checked
/// against a small fleet of concurrent holders contending for a shared
/// seat pool.
#[tokio::test]
async fn concurrent_holds_never_double_grant_a_seat() {
    let seat_ids: Vec<String> = (0..5).map(|i| format!("A-R1-S{i}")).collect();
    let (event_id, catalog) = published_event(
        &seat_ids.iter().map(String::as_str).collect::<Vec<_>>(),
    );
    let seats = Arc::new(FakeSeatStore::new());
    seats.seed_available(event_id, &seat_ids);
    let holds = Arc::new(FakeHoldStore::new());
    let arb = Arc::new(arbiter(Arc::new(catalog), seats.clone(), holds.clone()));

    let mut tasks = Vec::new();
    for i in 0..5 {
        let arb = arb.clone();
        let seat_ids = seat_ids.clone();
        tasks.push(tokio::spawn(async move {
            arb.hold_seats(event_id, seat_ids, format!("sess{i}"), None).await
        }));
    }

    let results: Vec<_> = futures_join_all(tasks).await;
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "only one session can hold the whole pool at once");

    let rows = seats.list_for_event(event_id).await.unwrap();
    assert_eq!(rows.iter().filter(|r| r.status == SeatStatus::Held).count(), 5);
    assert_eq!(rows.len(), 5, "conservation: no seat appears or disappears");
}

async fn futures_join_all<T>(tasks: Vec<tokio::task::JoinHandle<T>>) -> Vec<T> {
    let mut out = Vec::with_capacity(tasks.len());
    for t in tasks {
        out.push(t.await.unwrap());
    }
    out
}
