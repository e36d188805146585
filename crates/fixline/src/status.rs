// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `fixline status` command implementation.
//!
//! Offline summary read straight from the database; does not require a
//! running server.

use fixline_config::model::FixlineConfig;
use fixline_core::traits::ReportStore;
use fixline_core::types::ReportStatus;
use fixline_core::FixlineError;
use fixline_storage::SqliteStore;

/// Runs the `fixline status` command.
pub async fn run_status(config: FixlineConfig) -> Result<(), FixlineError> {
    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;

    let reports = store.list().await?;
    let count_with = |status: ReportStatus| reports.iter().filter(|r| r.status == status).count();

    println!("database: {}", config.storage.database_path);
    println!("reports:  {}", reports.len());
    println!("  unassigned:  {}", count_with(ReportStatus::Unassigned));
    println!("  in_progress: {}", count_with(ReportStatus::InProgress));
    println!("  resolved:    {}", count_with(ReportStatus::Resolved));

    store.close().await?;
    Ok(())
}
