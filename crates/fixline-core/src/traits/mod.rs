// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Fixline's external collaborators.
//!
//! The assignment core talks to persistence and the worker directory only
//! through these seams, so either can be backed by a different store
//! without touching callers.

pub mod directory;
pub mod store;

pub use directory::WorkerDirectory;
pub use store::{NewReport, ReportStore};
