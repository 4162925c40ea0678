// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! State operations outside the focus engine: startup, import, export, and sessions.
//!
//! Imports parse the whole document before touching state, so a malformed file changes nothing;
//! individual invalid or duplicate records are skipped and reported.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::format::{
    decode_records, export_csv, parse_csv, EnvelopeExtras, ExportEnvelope, FormatError,
    ImportDocument, PendingRecord, RecordProblem,
};
use crate::model::{
    resume_or_reset, Catalog, CharacterId, MatchLog, MatchRecord, RecentCharacters, RecordId,
    Session, SessionSummary, Settings,
};
use crate::state::AppState;
use crate::store::LoadedData;

/// Errors listed individually in an import report; beyond this only the count is shown.
pub const MAX_LISTED_IMPORT_ERRORS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub duplicates: usize,
    pub errors: Vec<RecordProblem>,
    pub settings_imported: bool,
    pub ui_state_imported: bool,
}

impl ImportReport {
    pub fn skipped(&self) -> usize {
        self.duplicates + self.errors.len()
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Import complete: {} matches imported, {} skipped ({} duplicate, {} invalid).",
            self.imported,
            self.skipped(),
            self.duplicates,
            self.errors.len()
        )?;
        if self.settings_imported {
            write!(f, "\nSettings imported.")?;
        }
        if self.ui_state_imported {
            write!(f, "\nUI state imported (recent characters, session, preferences).")?;
        }
        if self.errors.len() > MAX_LISTED_IMPORT_ERRORS {
            write!(f, "\n\n{} matches had errors.", self.errors.len())?;
        } else if !self.errors.is_empty() {
            write!(f, "\n\nErrors:")?;
            for problem in &self.errors {
                write!(f, "\n{problem}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ExportError {
    NoMatches,
    Format(FormatError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatches => f.write_str("no matches to export"),
            Self::Format(err) => write!(f, "cannot encode export: {err}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoMatches => None,
            Self::Format(err) => Some(err),
        }
    }
}

impl From<FormatError> for ExportError {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}

/// Result of assembling state at launch.
#[derive(Debug, Clone)]
pub struct Startup {
    pub state: AppState,
    /// The stored session that was auto-reset, if any.
    pub ended_session: Option<SessionSummary>,
}

/// Builds the application state from what the data folder held.
pub fn startup(catalog: Catalog, loaded: LoadedData, now: DateTime<Utc>) -> Startup {
    let LoadedData {
        settings,
        log,
        recent,
        last_match_type,
        session,
    } = loaded;

    let start = resume_or_reset(session.start(), settings.session_auto_reset, now, &log);
    let mut state = AppState::new(catalog, settings, start.session.start());
    state.log = log;
    state.recent = recent;
    state.ui.stats_view = session.stats_view().unwrap_or_default();
    state.ui.history_view = session.history_view().unwrap_or_default();

    if let Some((parent, child)) = last_match_type
        .as_ref()
        .and_then(|last| last.resolve(&state.catalog))
    {
        state
            .selection
            .restore_match_type(&state.catalog, &parent, child.as_ref());
    }

    if let Some(ended) = &start.ended {
        tracing::info!(
            matches = ended.matches,
            wins = ended.wins,
            "previous session ended by auto reset"
        );
    }

    Startup {
        state,
        ended_session: start.ended,
    }
}

/// Starts a fresh session now and summarizes the one it replaces.
pub fn start_new_session(state: &mut AppState, now: DateTime<Utc>) -> SessionSummary {
    let summary = state.session.summarize(&state.log);
    state.session = Session::starting_at(now);
    state.ui.history_page = 0;
    tracing::info!(
        matches = summary.matches,
        wins = summary.wins,
        "new session started"
    );
    summary
}

/// Imports `text` in `format` into `state`.
///
/// A document that cannot be parsed as a whole returns an error and leaves `state` unchanged.
pub fn import_text(
    state: &mut AppState,
    format: ImportFormat,
    text: &str,
    now: DateTime<Utc>,
) -> Result<ImportReport, FormatError> {
    let report = match format {
        ImportFormat::Json => {
            let document = ImportDocument::parse(text)?;
            import_document(state, document, now)
        }
        ImportFormat::Csv => {
            let decoded = parse_csv(text, &state.catalog)?;
            let mut report = ImportReport::default();
            merge_records(state, decoded, now, &mut report);
            report
        }
    };
    state.ui.history_page = 0;
    tracing::info!(
        imported = report.imported,
        duplicates = report.duplicates,
        invalid = report.errors.len(),
        "import finished"
    );
    Ok(report)
}

pub fn import_document(
    state: &mut AppState,
    document: ImportDocument,
    now: DateTime<Utc>,
) -> ImportReport {
    let mut report = ImportReport::default();
    if let Some(extras) = document.envelope {
        apply_envelope(state, extras, &mut report);
    }
    let decoded = decode_records(&document.matches, &state.catalog);
    merge_records(state, decoded, now, &mut report);
    report
}

/// Full-state JSON export.
pub fn export_json(state: &AppState, now: DateTime<Utc>) -> Result<String, ExportError> {
    if state.log.is_empty() {
        return Err(ExportError::NoMatches);
    }
    Ok(ExportEnvelope::from_state(state, now).to_pretty_json()?)
}

/// Match-only CSV export.
pub fn export_csv_text(state: &AppState) -> Result<String, ExportError> {
    if state.log.is_empty() {
        return Err(ExportError::NoMatches);
    }
    Ok(export_csv(&state.log, &state.catalog))
}

// Record merging and envelope application used by the import entry points.
include!("ops_impl.rs");
