// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assignment state machine over the report store.

use std::sync::Arc;

use fixline_core::error::FixlineError;
use fixline_core::traits::directory::WorkerDirectory;
use fixline_core::traits::store::ReportStore;
use fixline_core::types::{Identity, IssueReport, ReportId, ReportStatus, WorkerRef};
use fixline_presence::ChannelNotifier;

/// Drives the `unassigned -> in_progress -> resolved` lifecycle.
///
/// Transitions are enforced twice: a precondition read classifies the
/// failure mode for the caller, then the store's conditioned update is
/// the actual serialization point. A passing precondition followed by a
/// zero-row update means another worker won the race.
pub struct AssignmentService {
    store: Arc<dyn ReportStore>,
    directory: Arc<dyn WorkerDirectory>,
    notifier: ChannelNotifier,
}

impl AssignmentService {
    pub fn new(
        store: Arc<dyn ReportStore>,
        directory: Arc<dyn WorkerDirectory>,
        notifier: ChannelNotifier,
    ) -> Self {
        Self {
            store,
            directory,
            notifier,
        }
    }

    /// Accept a report on behalf of a worker.
    ///
    /// A display-name reference is resolved through the worker directory
    /// and fails with `WorkerNotFound` on a miss. An identity reference is
    /// taken at face value: callers authenticate out of band, and a bogus
    /// identity only produces an assignment nobody will ever list.
    ///
    /// On success both parties are notified that a chat channel is open.
    /// Notification is best effort and never fails the accept.
    pub async fn accept(
        &self,
        id: &ReportId,
        worker: WorkerRef,
    ) -> Result<IssueReport, FixlineError> {
        let worker = self.resolve_worker(worker).await?;

        let report = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| FixlineError::ReportNotFound { id: id.0.clone() })?;

        if report.status != ReportStatus::Unassigned {
            return Err(FixlineError::InvalidTransition {
                id: id.0.clone(),
                from: report.status,
                to: ReportStatus::InProgress,
            });
        }

        if !self.store.assign(id, &worker).await? {
            // Claimed between the read above and the conditioned update.
            return Err(FixlineError::AlreadyAssigned { id: id.0.clone() });
        }

        tracing::info!(report_id = %id.0, worker = %worker, "report accepted");
        self.notifier
            .notify_channel_opened(id, &report.reporter, &worker);

        Ok(IssueReport {
            status: ReportStatus::InProgress,
            assigned_to: Some(worker),
            ..report
        })
    }

    /// Mark an in-progress report resolved.
    pub async fn complete(&self, id: &ReportId) -> Result<IssueReport, FixlineError> {
        let report = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| FixlineError::ReportNotFound { id: id.0.clone() })?;

        if report.status != ReportStatus::InProgress {
            return Err(FixlineError::InvalidTransition {
                id: id.0.clone(),
                from: report.status,
                to: ReportStatus::Resolved,
            });
        }

        if !self.store.resolve(id).await? {
            // Another caller resolved it first; the end state is the one
            // they asked for, but the transition they observed is stale.
            return Err(FixlineError::InvalidTransition {
                id: id.0.clone(),
                from: ReportStatus::Resolved,
                to: ReportStatus::Resolved,
            });
        }

        tracing::info!(report_id = %id.0, "report resolved");
        Ok(IssueReport {
            status: ReportStatus::Resolved,
            ..report
        })
    }

    /// Reports currently or previously assigned to a worker, newest first.
    pub async fn assigned_to(&self, worker: &Identity) -> Result<Vec<IssueReport>, FixlineError> {
        self.store.list_assigned(worker).await
    }

    async fn resolve_worker(&self, worker: WorkerRef) -> Result<Identity, FixlineError> {
        match worker {
            WorkerRef::ByIdentity(identity) => Ok(identity),
            WorkerRef::ByDisplayName(name) => self
                .directory
                .find_by_name(&name)
                .await?
                .ok_or(FixlineError::WorkerNotFound { reference: name }),
        }
    }
}
