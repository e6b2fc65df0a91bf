use std::sync::Arc;

use boxoffice_core::broadcast::SeatBroadcaster;
use boxoffice_core::cache::HoldCache;
use boxoffice_core::expiration::reclaim_expired_holds;
use boxoffice_core::store::{HoldStore, SeatStore};

/// One Expiration Worker tick: reclaim every hold past `expires_at`.
/// Runs on `SEAT_HOLD_EXPIRY_CHECK_SECONDS`.
pub async fn run(
    seats: &Arc<dyn SeatStore>,
    holds: &Arc<dyn HoldStore>,
    cache: &Arc<dyn HoldCache>,
    broadcaster: &Arc<dyn SeatBroadcaster>,
) -> anyhow::Result<usize> {
    let reclaimed = reclaim_expired_holds(seats.as_ref(), holds.as_ref(), cache.as_ref(), broadcaster.as_ref()).await?;
    Ok(reclaimed)
}
