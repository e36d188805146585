// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report assignment lifecycle.
//!
//! Sits between the HTTP handlers and the store: resolves worker
//! references, classifies transition failures, and opens the chat
//! channel between reporter and worker on a successful accept.

pub mod service;

pub use service::AssignmentService;
