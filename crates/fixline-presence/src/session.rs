// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presence session lifecycle: wires transport connect/disconnect/join
//! events to the connection registry.

use std::sync::Arc;

use fixline_core::types::Identity;

use crate::registry::{ConnectionId, ConnectionRegistry, ConnectionSession, OutboundSender};

/// Handles join/disconnect events for transport connections.
///
/// The only writer to the registry: the router and notifier read, the
/// assignment service never touches it.
#[derive(Clone)]
pub struct PresenceHandler {
    registry: Arc<dyn ConnectionRegistry>,
}

impl PresenceHandler {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Register a connection under an identity.
    ///
    /// Returns the canonical identity on success so the transport task can
    /// hold it as the reverse pointer for disconnect cleanup. A malformed
    /// identity is logged and ignored: the connection stays open but is
    /// unreachable for messaging until it joins with a valid email.
    /// Safe to call repeatedly for the same connection (reconnect storms,
    /// duplicate client-side joins); each call simply re-registers.
    pub fn on_join(
        &self,
        conn_id: &ConnectionId,
        raw_identity: &str,
        sender: OutboundSender,
    ) -> Option<Identity> {
        let Some(identity) = Identity::parse(raw_identity) else {
            tracing::warn!(
                conn_id = %conn_id,
                raw = raw_identity,
                "join with malformed identity ignored"
            );
            return None;
        };

        self.registry.register(
            identity.clone(),
            ConnectionSession::new(conn_id.clone(), sender),
        );
        tracing::info!(identity = %identity, conn_id = %conn_id, "presence registered");
        Some(identity)
    }

    /// Remove the connection's registry entry on transport disconnect.
    ///
    /// `identity` is the reverse pointer captured at join time; `None`
    /// means the connection never joined and there is nothing to clean up.
    /// The guarded unregister makes a delayed disconnect from an evicted
    /// connection a no-op.
    pub fn on_disconnect(&self, conn_id: &ConnectionId, identity: Option<&Identity>) {
        if let Some(identity) = identity {
            self.registry.unregister(identity, conn_id);
            tracing::info!(identity = %identity, conn_id = %conn_id, "presence unregistered");
        } else {
            tracing::debug!(conn_id = %conn_id, "disconnect before join, nothing to unregister");
        }
    }
}
