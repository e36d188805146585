// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side chat consumer: a WebSocket connection to the gateway plus
//! a per-peer transcript state machine. No rendering; a UI drives
//! [`ChatSession::compose`] and folds events in with [`ChatSession::apply`].

pub mod connection;
pub mod session;

pub use connection::ChatConnection;
pub use session::ChatSession;
