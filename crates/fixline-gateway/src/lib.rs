// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/WebSocket gateway for the Fixline platform.
//!
//! Serves the report REST API and the `/ws` presence/chat transport from
//! one axum server. HTTP handlers go through the assignment service and
//! the store; the WebSocket path feeds the presence handler and message
//! router. The two meet only at the chat-channel notification on accept.

pub mod auth;
pub mod handlers;
pub mod server;
pub mod ws;

pub use server::{start_server, GatewayConfig, GatewayState};
