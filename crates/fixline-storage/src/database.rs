// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes: the
//! compare-and-swap assignment update relies on this single-writer model.

use tokio_rusqlite::Connection;

use fixline_core::FixlineError;

use crate::migrations;

/// Handle to the SQLite database.
///
/// Wraps a `tokio_rusqlite::Connection` whose background thread serializes
/// all access. Cloneable senders into that thread are obtained via
/// [`Database::connection`].
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path`, apply PRAGMAs,
    /// and run any pending migrations.
    ///
    /// `wal_mode` selects the journal mode: WAL when true, rollback
    /// journal otherwise.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Database, FixlineError> {
        let conn = Connection::open(path).await.map_err(|e| FixlineError::Storage {
            source: Box::new(e),
        })?;

        let journal_mode = if wal_mode { "WAL" } else { "DELETE" };
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(&format!(
                "PRAGMA journal_mode = {journal_mode};
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            ))?;
            migrations::run_migrations(conn)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        Ok(Database { conn })
    }

    /// Returns the underlying tokio-rusqlite connection handle.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the background thread.
    pub async fn close(&self) -> Result<(), FixlineError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Map a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> FixlineError {
    FixlineError::Storage {
        source: Box::new(e),
    }
}
