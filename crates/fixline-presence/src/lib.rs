// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory presence tracking and best-effort message delivery.
//!
//! One live connection per identity, keyed by normalized email. A later
//! register for the same identity evicts the earlier connection's entry;
//! unregister is guarded by connection id so a stale disconnect never
//! evicts a fresh session. All delivery here is fire-and-forget: nothing
//! is queued for offline parties.

pub mod notifier;
pub mod registry;
pub mod router;
pub mod session;

pub use notifier::ChannelNotifier;
pub use registry::{
    ConnectionId, ConnectionRegistry, ConnectionSession, InMemoryRegistry, OutboundSender,
};
pub use router::MessageRouter;
pub use session::PresenceHandler;
