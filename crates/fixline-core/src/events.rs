// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire event contracts for the WebSocket chat transport.
//!
//! Client -> Server (JSON):
//! ```json
//! {"type": "join", "identity": "alice@x.com"}
//! {"type": "send_message", "sender": "bob@x.com", "receiver": "alice@x.com", "text": "hi"}
//! {"type": "start_chat", "from": "bob@x.com", "to": "alice@x.com"}
//! ```
//!
//! Server -> Client (JSON):
//! ```json
//! {"type": "receive_message", "sender": "bob@x.com", "text": "hi"}
//! {"type": "chat_started", "with": "alice@x.com", "report_id": "r-1"}
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Identity, ReportId};

/// Events received from a connected client.
///
/// Identities arrive as raw strings and are validated/normalized by the
/// presence handler, not during deserialization: a malformed join is
/// logged and ignored rather than failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Register presence under an identity. Safe to repeat on reconnect.
    Join { identity: String },
    /// Route one chat message to a receiver identity.
    SendMessage {
        sender: String,
        receiver: String,
        text: String,
    },
    /// Advisory only: a client opened a chat view. No server-side state change.
    StartChat { from: String, to: String },
}

/// Events pushed to a connected client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A chat message delivered to the receiver's (and sender's) connection.
    ReceiveMessage { sender: Identity, text: String },
    /// A chat channel was opened by a successful accept; `with` is the
    /// counterpart identity.
    ChatStarted {
        with: Identity,
        report_id: ReportId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_deserializes() {
        let json = r#"{"type": "join", "identity": "alice@x.com"}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            ClientEvent::Join {
                identity: "alice@x.com".to_string()
            }
        );
    }

    #[test]
    fn send_message_deserializes() {
        let json = r#"{
            "type": "send_message",
            "sender": "bob@x.com",
            "receiver": "alice@x.com",
            "text": "hi"
        }"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        match event {
            ClientEvent::SendMessage {
                sender,
                receiver,
                text,
            } => {
                assert_eq!(sender, "bob@x.com");
                assert_eq!(receiver, "alice@x.com");
                assert_eq!(text, "hi");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn unknown_type_fails_to_parse() {
        let json = r#"{"type": "teleport", "identity": "alice@x.com"}"#;
        assert!(serde_json::from_str::<ClientEvent>(json).is_err());
    }

    #[test]
    fn chat_started_wire_shape() {
        let event = ServerEvent::ChatStarted {
            with: Identity::parse("alice@x.com").unwrap(),
            report_id: ReportId("r-1".to_string()),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"chat_started\""));
        assert!(json.contains("\"with\":\"alice@x.com\""));
        assert!(json.contains("\"report_id\":\"r-1\""));
    }

    #[test]
    fn receive_message_round_trips() {
        let event = ServerEvent::ReceiveMessage {
            sender: Identity::parse("bob@x.com").unwrap(),
            text: "hello".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: ServerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
