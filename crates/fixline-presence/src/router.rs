// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort direct message routing between connected identities.

use std::sync::Arc;

use fixline_core::events::ServerEvent;
use fixline_core::types::{ChatMessage, Identity};

use crate::registry::ConnectionRegistry;

/// Routes a direct message to the receiver's live connection, echoing a
/// copy back to the sender so their transcript stays consistent.
///
/// Delivery is at-most-once with no persistence: an offline receiver, a
/// full outbound queue, or a connection torn down mid-send all drop the
/// message silently. The sender gets no delivery receipt either way.
#[derive(Clone)]
pub struct MessageRouter {
    registry: Arc<dyn ConnectionRegistry>,
}

impl MessageRouter {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver `message` from `sender` to `receiver`.
    ///
    /// The echo is skipped when sender and receiver are the same identity,
    /// otherwise a self-message would arrive twice on one connection.
    pub fn deliver(&self, sender: &Identity, receiver: &Identity, text: String) {
        let message = ChatMessage {
            sender: sender.clone(),
            text,
        };

        match self.registry.lookup(receiver) {
            Some(out) => self.send_to(receiver, &out, &message),
            None => {
                tracing::debug!(
                    sender = %sender,
                    receiver = %receiver,
                    "receiver offline, message dropped"
                );
            }
        }

        if sender != receiver {
            if let Some(out) = self.registry.lookup(sender) {
                self.send_to(sender, &out, &message);
            }
        }
    }

    fn send_to(
        &self,
        target: &Identity,
        out: &tokio::sync::mpsc::Sender<ServerEvent>,
        message: &ChatMessage,
    ) {
        let event = ServerEvent::ReceiveMessage {
            sender: message.sender.clone(),
            text: message.text.clone(),
        };
        if let Err(e) = out.try_send(event) {
            tracing::debug!(target = %target, error = %e, "outbound queue rejected message");
        }
    }
}
