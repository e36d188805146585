// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Worker-profile lookup trait.

use async_trait::async_trait;

use crate::error::FixlineError;
use crate::types::{Identity, WorkerProfile};

/// Read-only directory of worker profiles, used for display-name
/// resolution at accept time and for annotating report listings.
#[async_trait]
pub trait WorkerDirectory: Send + Sync + 'static {
    /// Resolve a display name to an identity. `None` on a miss; the
    /// caller decides whether a miss is an error.
    async fn find_by_name(&self, name: &str) -> Result<Option<Identity>, FixlineError>;

    /// Fetch a full profile by identity.
    async fn find_by_identity(
        &self,
        identity: &Identity,
    ) -> Result<Option<WorkerProfile>, FixlineError>;

    /// Register a worker profile (admin approval flow's storage effect).
    async fn upsert(&self, profile: WorkerProfile) -> Result<(), FixlineError>;
}
