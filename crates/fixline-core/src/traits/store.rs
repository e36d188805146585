// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Issue-report store trait for persistence backends.

use async_trait::async_trait;

use crate::error::FixlineError;
use crate::types::{Identity, IssueReport, ReportId};

/// Fields needed to create a report; id, status, and timestamp are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub reporter: Identity,
    pub category: String,
    pub label: String,
    pub address: String,
    pub phone: String,
}

/// Adapter for issue-report persistence.
///
/// The two transition operations are compare-and-swap style: they update
/// only if the report is still in the expected prior state, and report
/// how many rows changed so callers can detect a lost race.
#[async_trait]
pub trait ReportStore: Send + Sync + 'static {
    /// Insert a new report in `Unassigned` state. Returns the stored report.
    async fn create(&self, report: NewReport) -> Result<IssueReport, FixlineError>;

    /// Fetch a report by id. `None` when absent.
    async fn find(&self, id: &ReportId) -> Result<Option<IssueReport>, FixlineError>;

    /// List all reports, newest first.
    async fn list(&self) -> Result<Vec<IssueReport>, FixlineError>;

    /// List reports assigned to a worker, newest first.
    async fn list_assigned(&self, worker: &Identity) -> Result<Vec<IssueReport>, FixlineError>;

    /// Conditioned transition `Unassigned -> InProgress`, binding the
    /// worker. Returns `true` if the row was updated, `false` if the
    /// report was no longer unassigned at write time.
    async fn assign(&self, id: &ReportId, worker: &Identity) -> Result<bool, FixlineError>;

    /// Conditioned transition `InProgress -> Resolved`. Returns `true` if
    /// the row was updated.
    async fn resolve(&self, id: &ReportId) -> Result<bool, FixlineError>;
}
