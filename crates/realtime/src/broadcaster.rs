//! `RealtimeBroadcaster` is the production `SeatBroadcaster`: it turns a
//! core-level publish call into a wire message fanned out to the room's
//! WebSocket subscribers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use boxoffice_core::broadcast::{SeatBroadcaster, SeatDelta};
use boxoffice_types::ServerMessage;

use crate::protocol::to_wire;
use crate::rooms::RoomRegistry;

#[derive(Clone)]
pub struct RealtimeBroadcaster {
    rooms: RoomRegistry,
}

impl RealtimeBroadcaster {
    pub fn new(rooms: RoomRegistry) -> Self {
        Self { rooms }
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }
}

#[async_trait]
impl SeatBroadcaster for RealtimeBroadcaster {
    async fn publish_availability_update(&self, event_id: Uuid, updates: Vec<SeatDelta>, timestamp: DateTime<Utc>) {
        let updates = updates.iter().map(to_wire).collect();
        self.rooms
            .publish(
                event_id,
                ServerMessage::SeatAvailabilityUpdate {
                    event_id,
                    updates,
                    timestamp,
                },
            )
            .await;
    }

    async fn publish_hold_expired(&self, event_id: Uuid, seat_ids: Vec<String>, timestamp: DateTime<Utc>) {
        self.rooms
            .publish(
                event_id,
                ServerMessage::HoldExpired {
                    event_id,
                    seat_ids,
                    timestamp,
                },
            )
            .await;
    }
}
