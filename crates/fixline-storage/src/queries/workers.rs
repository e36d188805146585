// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Worker directory lookups.

use rusqlite::params;

use fixline_core::types::{Identity, WorkerProfile};
use fixline_core::FixlineError;

use crate::database::Database;

fn row_to_profile(row: &rusqlite::Row<'_>) -> rusqlite::Result<WorkerProfile> {
    let email_raw: String = row.get(0)?;
    let identity = Identity::parse(&email_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            "malformed email address in workers row".into(),
        )
    })?;
    Ok(WorkerProfile {
        identity,
        name: row.get(1)?,
        field: row.get(2)?,
        phone: row.get(3)?,
    })
}

/// Resolve a display name to an identity. Names are matched exactly; when
/// several workers share a name the earliest registration wins.
pub async fn find_by_name(db: &Database, name: &str) -> Result<Option<Identity>, FixlineError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT email FROM workers WHERE name = ?1 ORDER BY created_at ASC LIMIT 1",
            )?;
            match stmt.query_row(params![name], |row| row.get::<_, String>(0)) {
                Ok(email) => Ok(Identity::parse(&email)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch a full profile by identity.
pub async fn find_by_identity(
    db: &Database,
    identity: &Identity,
) -> Result<Option<WorkerProfile>, FixlineError> {
    let email = identity.as_str().to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT email, name, field, phone FROM workers WHERE email = ?1",
            )?;
            match stmt.query_row(params![email], row_to_profile) {
                Ok(profile) => Ok(Some(profile)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or update a worker profile.
pub async fn upsert_worker(db: &Database, profile: &WorkerProfile) -> Result<(), FixlineError> {
    let profile = profile.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO workers (email, name, field, phone, created_at)
                 VALUES (?1, ?2, ?3, ?4, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(email) DO UPDATE SET
                     name = excluded.name,
                     field = excluded.field,
                     phone = excluded.phone",
                params![
                    profile.identity.as_str(),
                    profile.name,
                    profile.field,
                    profile.phone,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
