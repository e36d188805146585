// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Issue-report CRUD and conditioned state transitions.
//!
//! The transition updates are compare-and-swap style: the `WHERE` clause
//! pins the expected prior status, so a report claimed by a concurrent
//! accept yields zero affected rows instead of a silent overwrite.

use rusqlite::params;

use fixline_core::types::{Identity, IssueReport, ReportId, ReportStatus};
use fixline_core::FixlineError;

use crate::database::Database;

const REPORT_COLUMNS: &str =
    "id, reporter_email, category, label, address, phone, status, assigned_to, created_at";

fn row_to_report(row: &rusqlite::Row<'_>) -> rusqlite::Result<IssueReport> {
    let reporter_raw: String = row.get(1)?;
    let reporter = Identity::parse(&reporter_raw).ok_or_else(|| malformed_email(1))?;

    let status_raw: String = row.get(6)?;
    let status = status_raw.parse::<ReportStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let assigned_raw: Option<String> = row.get(7)?;
    let assigned_to = match assigned_raw {
        Some(raw) => Some(Identity::parse(&raw).ok_or_else(|| malformed_email(7))?),
        None => None,
    };

    Ok(IssueReport {
        id: ReportId(row.get(0)?),
        reporter,
        category: row.get(2)?,
        label: row.get(3)?,
        address: row.get(4)?,
        phone: row.get(5)?,
        status,
        assigned_to,
        created_at: row.get(8)?,
    })
}

fn malformed_email(idx: usize) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        "malformed email address in stored row".into(),
    )
}

/// Insert a new report row.
pub async fn insert_report(db: &Database, report: &IssueReport) -> Result<(), FixlineError> {
    let report = report.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reports (id, reporter_email, category, label, address, phone,
                                      status, assigned_to, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    report.id.0,
                    report.reporter.as_str(),
                    report.category,
                    report.label,
                    report.address,
                    report.phone,
                    report.status.to_string(),
                    report.assigned_to.as_ref().map(|i| i.as_str().to_string()),
                    report.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a report by id.
pub async fn get_report(
    db: &Database,
    id: &ReportId,
) -> Result<Option<IssueReport>, FixlineError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REPORT_COLUMNS} FROM reports WHERE id = ?1"
            ))?;
            match stmt.query_row(params![id], row_to_report) {
                Ok(report) => Ok(Some(report)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all reports, newest first.
pub async fn list_reports(db: &Database) -> Result<Vec<IssueReport>, FixlineError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REPORT_COLUMNS} FROM reports ORDER BY created_at DESC"
            ))?;
            let rows = stmt.query_map([], row_to_report)?;
            let mut reports = Vec::new();
            for row in rows {
                reports.push(row?);
            }
            Ok(reports)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List reports assigned to a worker, newest first.
pub async fn list_assigned(
    db: &Database,
    worker: &Identity,
) -> Result<Vec<IssueReport>, FixlineError> {
    let worker = worker.as_str().to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REPORT_COLUMNS} FROM reports
                 WHERE assigned_to = ?1 ORDER BY created_at DESC"
            ))?;
            let rows = stmt.query_map(params![worker], row_to_report)?;
            let mut reports = Vec::new();
            for row in rows {
                reports.push(row?);
            }
            Ok(reports)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Conditioned transition `unassigned -> in_progress`, binding the worker.
///
/// Returns `true` if the row was updated, `false` if the report was no
/// longer unassigned at write time (lost race, or already moved on).
pub async fn assign_report(
    db: &Database,
    id: &ReportId,
    worker: &Identity,
) -> Result<bool, FixlineError> {
    let id = id.0.clone();
    let worker = worker.as_str().to_string();
    db.connection()
        .call(move |conn| {
            let affected = conn.execute(
                "UPDATE reports SET status = 'in_progress', assigned_to = ?1
                 WHERE id = ?2 AND status = 'unassigned'",
                params![worker, id],
            )?;
            Ok(affected > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Conditioned transition `in_progress -> resolved`.
pub async fn resolve_report(db: &Database, id: &ReportId) -> Result<bool, FixlineError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let affected = conn.execute(
                "UPDATE reports SET status = 'resolved'
                 WHERE id = ?1 AND status = 'in_progress'",
                params![id],
            )?;
            Ok(affected > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
