// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort chat-channel notifications.

use std::sync::Arc;

use fixline_core::events::ServerEvent;
use fixline_core::types::{Identity, ReportId};

use crate::registry::ConnectionRegistry;

/// Tells both parties of a fresh assignment that a chat channel is open.
///
/// Notification is side-band to the assignment itself: the state change
/// has already committed by the time this runs, so failure to reach an
/// offline party never rolls anything back or surfaces as an error.
#[derive(Clone)]
pub struct ChannelNotifier {
    registry: Arc<dyn ConnectionRegistry>,
}

impl ChannelNotifier {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Notify `reporter` and `worker` that a chat channel opened for
    /// `report_id`. Each party learns the other's identity; delivery to
    /// either is independent of the other.
    pub fn notify_channel_opened(
        &self,
        report_id: &ReportId,
        reporter: &Identity,
        worker: &Identity,
    ) {
        self.notify_one(report_id, reporter, worker);
        self.notify_one(report_id, worker, reporter);
    }

    fn notify_one(&self, report_id: &ReportId, target: &Identity, other: &Identity) {
        let Some(out) = self.registry.lookup(target) else {
            tracing::debug!(
                target = %target,
                report_id = %report_id.0,
                "party offline, chat notification dropped"
            );
            return;
        };
        let event = ServerEvent::ChatStarted {
            with: other.clone(),
            report_id: report_id.clone(),
        };
        if let Err(e) = out.try_send(event) {
            tracing::debug!(target = %target, error = %e, "chat notification rejected");
        }
    }
}
