//! Axum WebSocket upgrade and per-connection event loop. A connection may
//! join multiple event rooms over its lifetime; each `JoinEvent` spawns a
//! forwarder task for that room, torn down on `LeaveEvent` or disconnect.

use std::collections::HashMap;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use boxoffice_types::ClientMessage;

use crate::rooms::RoomRegistry;

#[derive(Debug, Deserialize)]
pub struct HandshakeParams {
    #[allow(dead_code)]
    pub token: Option<String>,
    pub session_id: String,
}

pub async fn upgrade(
    ws: WebSocketUpgrade,
    State(rooms): State<RoomRegistry>,
    Query(handshake): Query<HandshakeParams>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, rooms, handshake))
}

async fn handle_socket(socket: WebSocket, rooms: RoomRegistry, handshake: HandshakeParams) {
    tracing::info!(session_id = %handshake.session_id, "realtime connection established");
    let (mut sender, mut receiver) = socket.split();

    // Messages from any joined room converge on this channel before being
    // written to the socket, so one task owns the sender half.
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Message>();
    let mut forwarders: HashMap<Uuid, tokio::task::JoinHandle<()>> = HashMap::new();

    let writer = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::JoinEvent { event_id }) => {
                    if forwarders.contains_key(&event_id) {
                        continue;
                    }
                    forwarders.insert(event_id, spawn_forwarder(event_id, &rooms, out_tx.clone()).await);
                }
                Ok(ClientMessage::LeaveEvent { event_id }) => {
                    if let Some(handle) = forwarders.remove(&event_id) {
                        handle.abort();
                    }
                }
                Err(err) => {
                    tracing::debug!(error = %err, "discarding malformed client message");
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    for (_, handle) in forwarders {
        handle.abort();
    }
    writer.abort();
    tracing::info!(session_id = %handshake.session_id, "realtime connection closed");
}

async fn spawn_forwarder(
    event_id: Uuid,
    rooms: &RoomRegistry,
    out_tx: mpsc::UnboundedSender<Message>,
) -> tokio::task::JoinHandle<()> {
    let mut rx = rooms.subscribe(event_id).await;
    let joined = serde_json::to_string(&boxoffice_types::ServerMessage::JoinedEvent {
        event_id,
        message: "subscribed".to_string(),
    })
    .unwrap_or_default();
    let _ = out_tx.send(Message::Text(joined));

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(message) => {
                    let Ok(json) = serde_json::to_string(&message) else { continue };
                    if out_tx.send(Message::Text(json)).is_err() {
                        break;
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(event_id = %event_id, skipped, "realtime subscriber lagged, messages dropped");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

pub fn router(rooms: RoomRegistry) -> axum::Router {
    use axum::routing::get;
    axum::Router::new().route("/ws", get(upgrade)).with_state(rooms)
}
