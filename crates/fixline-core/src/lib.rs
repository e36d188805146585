// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Fixline facility-maintenance platform.
//!
//! This crate provides the domain types, wire event contracts, error
//! taxonomy, and adapter traits used throughout the Fixline workspace.

pub mod error;
pub mod events;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FixlineError;
pub use events::{ClientEvent, ServerEvent};
pub use types::{
    ChatMessage, Identity, IssueReport, ReportId, ReportStatus, WorkerProfile, WorkerRef,
};

// Re-export adapter traits at crate root.
pub use traits::{NewReport, ReportStore, WorkerDirectory};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_match_http_contract() {
        // The HTTP contract promises five distinguishable kinds.
        let kinds = [
            FixlineError::ReportNotFound { id: "r".into() }.kind(),
            FixlineError::InvalidTransition {
                id: "r".into(),
                from: ReportStatus::Unassigned,
                to: ReportStatus::Resolved,
            }
            .kind(),
            FixlineError::WorkerNotFound {
                reference: "Alice".into(),
            }
            .kind(),
            FixlineError::AlreadyAssigned { id: "r".into() }.kind(),
            FixlineError::Internal("x".into()).kind(),
        ];
        assert_eq!(
            kinds,
            [
                "not_found",
                "invalid_transition",
                "worker_not_found",
                "already_assigned",
                "internal"
            ]
        );
    }

    #[test]
    fn status_has_no_backward_wire_aliases() {
        // Wire names are exactly the three states, nothing legacy.
        for (status, wire) in [
            (ReportStatus::Unassigned, "unassigned"),
            (ReportStatus::InProgress, "in_progress"),
            (ReportStatus::Resolved, "resolved"),
        ] {
            assert_eq!(status.to_string(), wire);
        }
    }
}
