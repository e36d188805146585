// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection registry: the single source of truth mapping a durable
//! identity (email) to its one live transport connection.
//!
//! The registry is deliberately trait-abstracted: the in-process DashMap
//! implementation below is sufficient for a single server instance, and a
//! multi-instance deployment can back the same interface with a shared
//! key-value store without touching the router, notifier, or session
//! handler.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::mpsc;

use fixline_core::events::ServerEvent;
use fixline_core::types::Identity;

/// Opaque identifier for one transport connection. A reconnect gets a new
/// one; the registry uses it to tell a stale disconnect from a live session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new() -> Self {
        ConnectionId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Channel for pushing events to one connected client.
pub type OutboundSender = mpsc::Sender<ServerEvent>;

/// Ephemeral binding of an identity to one live connection.
#[derive(Clone)]
pub struct ConnectionSession {
    pub conn_id: ConnectionId,
    pub sender: OutboundSender,
    pub established_at: DateTime<Utc>,
}

impl ConnectionSession {
    pub fn new(conn_id: ConnectionId, sender: OutboundSender) -> Self {
        Self {
            conn_id,
            sender,
            established_at: Utc::now(),
        }
    }
}

/// Identity -> live connection map.
///
/// Invariant: at most one session per identity at any instant.
/// `register` is last-register-wins; `unregister` is guarded so a delayed
/// disconnect from an evicted connection cannot remove its replacement.
pub trait ConnectionRegistry: Send + Sync + 'static {
    /// Bind `identity` to a session, silently evicting any prior one.
    fn register(&self, identity: Identity, session: ConnectionSession);

    /// Current outbound channel for `identity`. `None` means offline --
    /// a normal, expected outcome, never an error.
    fn lookup(&self, identity: &Identity) -> Option<OutboundSender>;

    /// Remove the entry for `identity` only if it still belongs to
    /// `conn_id`. No-op when the identity has since re-registered on a
    /// different connection.
    fn unregister(&self, identity: &Identity, conn_id: &ConnectionId);

    /// Identities currently online.
    fn connected(&self) -> Vec<Identity>;
}

/// Process-local registry backed by a DashMap.
#[derive(Default)]
pub struct InMemoryRegistry {
    sessions: DashMap<Identity, ConnectionSession>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl ConnectionRegistry for InMemoryRegistry {
    fn register(&self, identity: Identity, session: ConnectionSession) {
        if let Some(prior) = self.sessions.insert(identity.clone(), session) {
            tracing::debug!(
                identity = %identity,
                evicted = %prior.conn_id,
                "re-register evicted prior connection"
            );
        }
    }

    fn lookup(&self, identity: &Identity) -> Option<OutboundSender> {
        self.sessions.get(identity).map(|s| s.sender.clone())
    }

    fn unregister(&self, identity: &Identity, conn_id: &ConnectionId) {
        // remove_if keeps the guard atomic with the removal: a concurrent
        // re-register either lands before (guard fails, no-op) or after
        // (entry re-inserted) the removal, never half-way.
        let removed = self
            .sessions
            .remove_if(identity, |_, session| session.conn_id == *conn_id);
        if removed.is_none() {
            tracing::debug!(
                identity = %identity,
                conn_id = %conn_id,
                "stale unregister ignored"
            );
        }
    }

    fn connected(&self) -> Vec<Identity> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }
}
