// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Fixline platform.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed CRUD
//! operations for issue reports and the worker directory. The accept
//! race guard lives here: assignment is a conditioned UPDATE executed on
//! the single writer thread.

pub mod database;
pub mod migrations;
pub mod queries;
pub mod store;

pub use database::Database;
pub use store::SqliteStore;
