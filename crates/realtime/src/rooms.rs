//! Per-event broadcast rooms, one `tokio::sync::broadcast` channel per
//! `event:{eventId}` topic, created lazily on first publish or subscribe.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use boxoffice_types::ServerMessage;

const ROOM_CAPACITY: usize = 1024;

type RoomsMap = Arc<RwLock<HashMap<Uuid, broadcast::Sender<ServerMessage>>>>;

/// Single-writer fan-out: publishing never blocks on slow subscribers, and
/// a lagging client just misses messages (tolerated — updates are
/// idempotent state applications per client).
#[derive(Clone)]
pub struct RoomRegistry {
    rooms: RoomsMap,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn publish(&self, event_id: Uuid, message: ServerMessage) {
        let sender = self.sender_for(event_id).await;
        // No receivers is not an error; the room is just empty right now.
        let _ = sender.send(message);
    }

    pub async fn subscribe(&self, event_id: Uuid) -> broadcast::Receiver<ServerMessage> {
        self.sender_for(event_id).await.subscribe()
    }

    pub async fn viewer_count(&self, event_id: Uuid) -> usize {
        let rooms = self.rooms.read().await;
        rooms.get(&event_id).map(|s| s.receiver_count()).unwrap_or(0)
    }

    async fn sender_for(&self, event_id: Uuid) -> broadcast::Sender<ServerMessage> {
        {
            let rooms = self.rooms.read().await;
            if let Some(sender) = rooms.get(&event_id) {
                return sender.clone();
            }
        }

        let mut rooms = self.rooms.write().await;
        rooms
            .entry(event_id)
            .or_insert_with(|| broadcast::channel(ROOM_CAPACITY).0)
            .clone()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rooms_are_isolated_by_event() {
        let registry = RoomRegistry::new();
        let event_a = Uuid::new_v4();
        let event_b = Uuid::new_v4();

        let mut rx_a = registry.subscribe(event_a).await;
        let mut rx_b = registry.subscribe(event_b).await;

        registry
            .publish(
                event_a,
                ServerMessage::JoinedEvent {
                    event_id: event_a,
                    message: "hi".to_string(),
                },
            )
            .await;

        rx_a.recv().await.expect("event_a subscriber should receive");
        assert!(rx_b.try_recv().is_err(), "event_b must not see event_a's messages");
    }

    #[tokio::test]
    async fn viewer_count_tracks_live_subscribers() {
        let registry = RoomRegistry::new();
        let event_id = Uuid::new_v4();
        assert_eq!(registry.viewer_count(event_id).await, 0);

        let rx = registry.subscribe(event_id).await;
        assert_eq!(registry.viewer_count(event_id).await, 1);
        drop(rx);
    }
}
