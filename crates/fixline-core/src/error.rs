// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Fixline platform.

use thiserror::Error;

use crate::types::ReportStatus;

/// The primary error type used across Fixline's storage, assignment, and
/// gateway operations.
///
/// The four domain variants (`ReportNotFound`, `WorkerNotFound`,
/// `InvalidTransition`, `AlreadyAssigned`) are recoverable and surface to
/// HTTP callers as 4xx with a `kind` discriminator. `Storage` surfaces as
/// 5xx. An offline chat peer is never represented as an error anywhere.
#[derive(Debug, Error)]
pub enum FixlineError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The requested issue report does not exist.
    #[error("report not found: {id}")]
    ReportNotFound { id: String },

    /// A worker reference (display name or identity) could not be resolved.
    #[error("worker not found: {reference}")]
    WorkerNotFound { reference: String },

    /// A state-machine precondition was violated (e.g. accepting a resolved report).
    #[error("invalid transition for report {id}: {from} -> {to}")]
    InvalidTransition {
        id: String,
        from: ReportStatus,
        to: ReportStatus,
    },

    /// Lost a concurrent-accept race: the report was claimed between
    /// precondition check and the conditioned update.
    #[error("report already assigned: {id}")]
    AlreadyAssigned { id: String },

    /// Transport plumbing errors (bind failure, server error). Not used for
    /// offline peers: those are a normal lookup miss, not an error.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FixlineError {
    /// Machine-readable discriminator used in HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            FixlineError::ReportNotFound { .. } => "not_found",
            FixlineError::WorkerNotFound { .. } => "worker_not_found",
            FixlineError::InvalidTransition { .. } => "invalid_transition",
            FixlineError::AlreadyAssigned { .. } => "already_assigned",
            FixlineError::Config(_)
            | FixlineError::Storage { .. }
            | FixlineError::Transport { .. }
            | FixlineError::Internal(_) => "internal",
        }
    }

    /// True for errors a caller can act on (surfaced as 4xx).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FixlineError::ReportNotFound { .. }
                | FixlineError::WorkerNotFound { .. }
                | FixlineError::InvalidTransition { .. }
                | FixlineError::AlreadyAssigned { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinguishable() {
        let not_found = FixlineError::ReportNotFound { id: "r1".into() };
        let invalid = FixlineError::InvalidTransition {
            id: "r1".into(),
            from: ReportStatus::Resolved,
            to: ReportStatus::InProgress,
        };
        let raced = FixlineError::AlreadyAssigned { id: "r1".into() };
        let no_worker = FixlineError::WorkerNotFound {
            reference: "Alice".into(),
        };
        let storage = FixlineError::Storage {
            source: Box::new(std::io::Error::other("disk")),
        };

        assert_eq!(not_found.kind(), "not_found");
        assert_eq!(no_worker.kind(), "worker_not_found");
        assert_eq!(invalid.kind(), "invalid_transition");
        assert_eq!(raced.kind(), "already_assigned");
        assert_eq!(storage.kind(), "internal");
    }

    #[test]
    fn recoverable_split_matches_http_mapping() {
        assert!(FixlineError::AlreadyAssigned { id: "r".into() }.is_recoverable());
        assert!(!FixlineError::Internal("boom".into()).is_recoverable());
    }

    #[test]
    fn display_includes_report_id() {
        let err = FixlineError::ReportNotFound { id: "r-42".into() };
        assert!(err.to_string().contains("r-42"));
    }
}
