// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Fixline workspace.
//!
//! The routing key for presence and messaging is [`Identity`], a
//! case-normalized email address. There is no separate user ID: the email
//! *is* the key, everywhere.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Canonical email identity used as the routing key for presence,
/// messaging, and assignment.
///
/// Construct through [`Identity::parse`], which validates the shape and
/// lowercases, so two registrations of `Bob@X.com` and `bob@x.com` land on
/// the same registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

fn email_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Same loose shape the report intake validates against: one '@' with
    // non-whitespace around it and a dot in the domain part.
    RE.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("static regex"))
}

impl Identity {
    /// Parse and normalize an email identity. Returns `None` for anything
    /// that is not email-shaped.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if email_shape().is_match(trimmed) {
            Some(Identity(trimmed.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// True when the string would parse as an identity. Used to classify
    /// worker references at the HTTP boundary.
    pub fn is_email_shaped(raw: &str) -> bool {
        email_shape().is_match(raw.trim())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for an issue report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Assignment lifecycle of an issue report.
///
/// Transitions are monotonic: `Unassigned -> InProgress -> Resolved`, no
/// skips, no way back.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Unassigned,
    InProgress,
    Resolved,
}

/// One maintenance issue report.
///
/// Invariant: `assigned_to` is `None` exactly when `status` is
/// `Unassigned`. The category is immutable after creation; it drives which
/// workers see the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueReport {
    pub id: ReportId,
    /// Identity of the reporting user.
    pub reporter: Identity,
    /// Worker-field classification, e.g. "electrician".
    pub category: String,
    /// Short descriptive label (usually the classifier output).
    pub label: String,
    pub address: String,
    pub phone: String,
    pub status: ReportStatus,
    pub assigned_to: Option<Identity>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Tagged worker reference supplied to `accept`.
///
/// The "is this string an email" classification happens exactly once, at
/// the boundary; everything downstream dispatches on the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerRef {
    ByIdentity(Identity),
    ByDisplayName(String),
}

impl WorkerRef {
    /// Classify a raw `assigned_to` value: email-shaped strings become
    /// identities, everything else is treated as a display name.
    pub fn parse(raw: &str) -> Self {
        match Identity::parse(raw) {
            Some(identity) => WorkerRef::ByIdentity(identity),
            None => WorkerRef::ByDisplayName(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for WorkerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerRef::ByIdentity(identity) => f.write_str(identity.as_str()),
            WorkerRef::ByDisplayName(name) => f.write_str(name),
        }
    }
}

/// Worker directory entry (read-only to the assignment core).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerProfile {
    pub identity: Identity,
    pub name: String,
    /// Trade field, matched against report categories.
    pub field: String,
    pub phone: String,
}

/// A transient chat message. Never persisted by the server: history lives
/// only in each connected client's in-memory session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Identity,
    pub text: String,
}
