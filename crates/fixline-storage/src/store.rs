// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ReportStore and WorkerDirectory traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use fixline_config::model::StorageConfig;
use fixline_core::traits::{NewReport, ReportStore, WorkerDirectory};
use fixline_core::types::{Identity, IssueReport, ReportId, ReportStatus, WorkerProfile};
use fixline_core::FixlineError;

use crate::database::Database;
use crate::queries;

/// SQLite-backed store for issue reports and worker profiles.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database, apply pragmas, and run pending migrations.
    pub async fn initialize(&self) -> Result<(), FixlineError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| {
            FixlineError::Internal("storage already initialized".to_string())
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Checkpoint the WAL and release the connection.
    pub async fn close(&self) -> Result<(), FixlineError> {
        self.db()?.close().await
    }

    fn db(&self) -> Result<&Database, FixlineError> {
        self.db.get().ok_or_else(|| {
            FixlineError::Internal("storage not initialized -- call initialize() first".to_string())
        })
    }
}

#[async_trait]
impl ReportStore for SqliteStore {
    async fn create(&self, report: NewReport) -> Result<IssueReport, FixlineError> {
        let stored = IssueReport {
            id: ReportId(uuid::Uuid::new_v4().to_string()),
            reporter: report.reporter,
            category: report.category,
            label: report.label,
            address: report.address,
            phone: report.phone,
            status: ReportStatus::Unassigned,
            assigned_to: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        queries::reports::insert_report(self.db()?, &stored).await?;
        Ok(stored)
    }

    async fn find(&self, id: &ReportId) -> Result<Option<IssueReport>, FixlineError> {
        queries::reports::get_report(self.db()?, id).await
    }

    async fn list(&self) -> Result<Vec<IssueReport>, FixlineError> {
        queries::reports::list_reports(self.db()?).await
    }

    async fn list_assigned(&self, worker: &Identity) -> Result<Vec<IssueReport>, FixlineError> {
        queries::reports::list_assigned(self.db()?, worker).await
    }

    async fn assign(&self, id: &ReportId, worker: &Identity) -> Result<bool, FixlineError> {
        queries::reports::assign_report(self.db()?, id, worker).await
    }

    async fn resolve(&self, id: &ReportId) -> Result<bool, FixlineError> {
        queries::reports::resolve_report(self.db()?, id).await
    }
}

#[async_trait]
impl WorkerDirectory for SqliteStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Identity>, FixlineError> {
        queries::workers::find_by_name(self.db()?, name).await
    }

    async fn find_by_identity(
        &self,
        identity: &Identity,
    ) -> Result<Option<WorkerProfile>, FixlineError> {
        queries::workers::find_by_identity(self.db()?, identity).await
    }

    async fn upsert(&self, profile: WorkerProfile) -> Result<(), FixlineError> {
        queries::workers::upsert_worker(self.db()?, &profile).await
    }
}
