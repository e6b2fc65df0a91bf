//! Adapts `boxoffice-core`'s internal `SeatDelta` to the wire-level
//! `SeatUpdate` shared with `boxoffice-api`. Message shapes themselves
//! (`ServerMessage`, `ClientMessage`) live in `boxoffice-types::api::realtime`
//! so the API and realtime crates agree on one definition.

use boxoffice_core::broadcast::SeatDelta;
use boxoffice_types::SeatUpdate;

pub fn to_wire(delta: &SeatDelta) -> SeatUpdate {
    SeatUpdate {
        seat_id: delta.seat_id.clone(),
        status: delta.status,
    }
}
