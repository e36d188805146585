// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket handler for the presence/chat transport.
//!
//! Client -> Server (JSON):
//! ```json
//! {"type": "join", "identity": "alice@x.com"}
//! {"type": "send_message", "sender": "bob@x.com", "receiver": "alice@x.com", "text": "hi"}
//! ```
//!
//! Server -> Client (JSON):
//! ```json
//! {"type": "receive_message", "sender": "bob@x.com", "text": "hi"}
//! {"type": "chat_started", "with": "alice@x.com", "report_id": "..."}
//! ```

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use fixline_core::events::{ClientEvent, ServerEvent};
use fixline_core::types::Identity;
use fixline_presence::ConnectionId;

use crate::server::GatewayState;

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<GatewayState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
///
/// Spawns a sender task that serializes [`ServerEvent`]s onto the socket,
/// then reads client events until close. The connection is anonymous
/// until its first valid join; the returned canonical identity is held
/// locally as the reverse pointer for disconnect cleanup.
async fn handle_socket(socket: WebSocket, state: GatewayState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let conn_id = ConnectionId::new();

    let (tx, mut rx) = mpsc::channel::<ServerEvent>(64);

    let sender_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize outbound event");
                    continue;
                }
            };
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut joined: Option<Identity> = None;

    while let Some(Ok(msg)) = ws_receiver.next().await {
        match msg {
            Message::Text(text) => {
                let text_str: &str = &text;
                let event: ClientEvent = match serde_json::from_str(text_str) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!(conn_id = %conn_id, error = %e, "invalid client event");
                        continue;
                    }
                };
                handle_event(&state, &conn_id, &tx, &mut joined, event);
            }
            Message::Close(_) => break,
            _ => {} // Ignore binary; ping/pong handled by the tungstenite layer.
        }
    }

    state.presence.on_disconnect(&conn_id, joined.as_ref());
    sender_task.abort();
}

fn handle_event(
    state: &GatewayState,
    conn_id: &ConnectionId,
    tx: &mpsc::Sender<ServerEvent>,
    joined: &mut Option<Identity>,
    event: ClientEvent,
) {
    match event {
        ClientEvent::Join { identity } => {
            if let Some(identity) = state.presence.on_join(conn_id, &identity, tx.clone()) {
                *joined = Some(identity);
            }
        }
        ClientEvent::SendMessage {
            sender,
            receiver,
            text,
        } => {
            let (Some(sender), Some(receiver)) =
                (Identity::parse(&sender), Identity::parse(&receiver))
            else {
                tracing::warn!(conn_id = %conn_id, "send_message with malformed identity dropped");
                return;
            };
            state.router.deliver(&sender, &receiver, text);
        }
        ClientEvent::StartChat { from, to } => {
            // Advisory: a client opened its chat view. No server state changes.
            tracing::debug!(conn_id = %conn_id, from, to, "chat view opened");
        }
    }
}
