// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat session state machine: one local transcript per peer.

use fixline_core::events::{ClientEvent, ServerEvent};
use fixline_core::types::{ChatMessage, Identity};

/// In-memory transcript of a two-party chat.
///
/// The transcript is optimistic: composing appends the outgoing message
/// immediately, and the server's echo of our own messages is dropped on
/// arrival so each message appears exactly once. Messages from identities
/// other than the peer are ignored; they belong to a different session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    me: Identity,
    peer: Identity,
    transcript: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(me: Identity, peer: Identity) -> Self {
        Self {
            me,
            peer,
            transcript: Vec::new(),
        }
    }

    pub fn me(&self) -> &Identity {
        &self.me
    }

    pub fn peer(&self) -> &Identity {
        &self.peer
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Append an outgoing message to the transcript and produce the wire
    /// event to send.
    pub fn compose(&mut self, text: impl Into<String>) -> ClientEvent {
        let text = text.into();
        self.transcript.push(ChatMessage {
            sender: self.me.clone(),
            text: text.clone(),
        });
        ClientEvent::SendMessage {
            sender: self.me.to_string(),
            receiver: self.peer.to_string(),
            text,
        }
    }

    /// Fold an incoming server event into the transcript.
    ///
    /// Returns `true` when the transcript changed.
    pub fn apply(&mut self, event: &ServerEvent) -> bool {
        match event {
            ServerEvent::ReceiveMessage { sender, text } => {
                if *sender == self.me {
                    // Server echo of our own message; already appended at
                    // compose time.
                    return false;
                }
                if *sender != self.peer {
                    tracing::debug!(sender = %sender, "message from another session ignored");
                    return false;
                }
                self.transcript.push(ChatMessage {
                    sender: sender.clone(),
                    text: text.clone(),
                });
                true
            }
            ServerEvent::ChatStarted { .. } => false,
        }
    }
}
