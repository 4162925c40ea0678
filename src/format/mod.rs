// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire formats: stored/exported JSON and CSV.
//!
//! Everything read from outside goes through a lenient raw shape first and is normalized into
//! the model here, so legacy files (flat `type`, missing `sessionId`, odd ids) load cleanly.

pub mod csv;
pub mod json;

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::truncate_to_millis;

pub use csv::{export_csv, parse_csv};
pub use json::{
    decode_log, decode_records, encode_records, EnvelopeExtras, ExportEnvelope, FieldProblem,
    ImportDocument, LastMatchType, PendingRecord, RawMatchRecord, RecordProblem, StoredMatch,
    StoredSession, Strictness,
};

#[derive(Debug)]
pub enum FormatError {
    Json(serde_json::Error),
    UnsupportedVersion(String),
    InvalidShape(&'static str),
    MissingColumns(Vec<&'static str>),
    Empty,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported export version {version} (expected 1)")
            }
            Self::InvalidShape(expected) => write!(f, "invalid document: expected {expected}"),
            Self::MissingColumns(columns) => {
                write!(f, "CSV must have {} columns", columns.join(" and "))
            }
            Self::Empty => f.write_str("CSV file is empty or has no data rows"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2026-05-01T19:30:00.000Z`.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|parsed| truncate_to_millis(parsed.with_timezone(&Utc)))
}
