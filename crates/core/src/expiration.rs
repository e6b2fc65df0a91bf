//! Bounds the blast radius of abandoned holds. Runs on a schedule from
//! `boxoffice-jobs`; safe to run from multiple nodes because every
//! reclamation is a conditional update keyed on the hold/seat rows, never
//! a lock held across the tick.

use chrono::Utc;
use uuid::Uuid;

use boxoffice_types::{enums::SeatStatus, Result};

use crate::broadcast::{SeatBroadcaster, SeatDelta};
use crate::cache::HoldCache;
use crate::store::{HoldRow, HoldStore, SeatStore};

/// Releases whatever `hold` currently holds back to `available`, deletes
/// the hold row, and invalidates its cache entry. Returns the seat_ids
/// actually released (a hold whose seats were already sold or reclaimed
/// out from under it releases nothing, which is not an error).
///
/// Shared by the scheduled tick below and by the Hold Arbiter's
/// opportunistic reclamation of a stale hold encountered mid-`hold_seats`,
/// so both paths apply the exact same conditional-update discipline.
pub async fn reclaim_hold(
    seats: &dyn SeatStore,
    holds: &dyn HoldStore,
    cache: &dyn HoldCache,
    hold: &HoldRow,
) -> Result<Vec<String>> {
    let released = seats.release_held_by(hold.event_id, hold.id).await?;
    holds.delete(hold.id).await?;
    cache.invalidate(hold.id).await;
    Ok(released)
}

/// One tick of the Expiration Worker: selects every hold past its
/// `expires_at`, reclaims its seats, and emits one broadcast per affected
/// event. A single hold's failure is logged by the caller and does not
/// stop the tick from reclaiming the rest.
pub async fn reclaim_expired_holds(
    seats: &dyn SeatStore,
    holds: &dyn HoldStore,
    cache: &dyn HoldCache,
    broadcaster: &dyn SeatBroadcaster,
) -> Result<usize> {
    let now = Utc::now();
    let expired = holds.find_expired(now).await?;

    let mut reclaimed_by_event: std::collections::HashMap<Uuid, Vec<String>> = std::collections::HashMap::new();

    for hold in &expired {
        match reclaim_hold(seats, holds, cache, hold).await {
            Ok(released) => {
                if !released.is_empty() {
                    reclaimed_by_event.entry(hold.event_id).or_default().extend(released);
                }
            }
            Err(err) => {
                tracing::error!(hold_id = %hold.id, error = %err, "failed to reclaim expired hold");
            }
        }
    }

    for (event_id, seat_ids) in &reclaimed_by_event {
        broadcaster
            .publish_hold_expired(*event_id, seat_ids.clone(), now)
            .await;

        let updates = seat_ids
            .iter()
            .map(|seat_id| SeatDelta {
                seat_id: seat_id.clone(),
                status: SeatStatus::Available,
            })
            .collect();
        broadcaster.publish_availability_update(*event_id, updates, now).await;
    }

    Ok(expired.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::{BroadcastEvent, TestSinkBroadcaster};
    use crate::cache::NullCache;
    use crate::store::{FakeHoldStore, FakeSeatStore};
    use chrono::Duration;

    #[tokio::test]
    async fn reclaims_expired_hold_and_broadcasts() {
        let seats = FakeSeatStore::new();
        let holds = FakeHoldStore::new();
        let cache = NullCache;
        let broadcaster = TestSinkBroadcaster::new();

        let event_id = Uuid::new_v4();
        let seat_ids = vec!["A-R1-S1".to_string()];
        seats.seed_available(event_id, &seat_ids);

        let hold_id = Uuid::new_v4();
        seats.try_hold(event_id, &seat_ids, hold_id).await.unwrap();
        holds
            .insert(
                hold_id,
                event_id,
                &seat_ids,
                "sess1",
                None,
                Utc::now() - Duration::minutes(1),
            )
            .await
            .unwrap();

        let count = reclaim_expired_holds(&seats, &holds, &cache, &broadcaster).await.unwrap();
        assert_eq!(count, 1);

        let rows = seats.find_many(event_id, &seat_ids).await.unwrap();
        assert_eq!(rows[0].status, SeatStatus::Available);
        assert!(holds.find_by_id(hold_id).await.unwrap().is_none());

        let events = broadcaster.events.lock().unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, BroadcastEvent::HoldExpired { .. })));
    }

    #[tokio::test]
    async fn unexpired_holds_are_left_alone() {
        let seats = FakeSeatStore::new();
        let holds = FakeHoldStore::new();
        let cache = NullCache;
        let broadcaster = TestSinkBroadcaster::new();

        let event_id = Uuid::new_v4();
        let seat_ids = vec!["A-R1-S1".to_string()];
        seats.seed_available(event_id, &seat_ids);
        let hold_id = Uuid::new_v4();
        seats.try_hold(event_id, &seat_ids, hold_id).await.unwrap();
        holds
            .insert(hold_id, event_id, &seat_ids, "sess1", None, Utc::now() + Duration::minutes(10))
            .await
            .unwrap();

        let count = reclaim_expired_holds(&seats, &holds, &cache, &broadcaster).await.unwrap();
        assert_eq!(count, 0);
        assert!(holds.find_by_id(hold_id).await.unwrap().is_some());
    }
}
