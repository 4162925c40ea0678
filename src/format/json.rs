// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    Catalog, CharacterId, LogScope, MatchLog, MatchRecord, MatchTypeId, Outcome, RecordId,
    SessionId,
};
use crate::state::AppState;

use super::{format_timestamp, parse_timestamp, FormatError};

pub const EXPORT_VERSION: u64 = 1;

/// A match record as found on disk or in an import, before validation.
///
/// Every field is optional so that one malformed field is reported instead of failing the
/// whole document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatchRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub parent_type: Option<String>,
    #[serde(default)]
    pub child_type: Option<String>,
    /// Flat match type used before parent/child types existed.
    #[serde(default, rename = "type")]
    pub legacy_type: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub heroes: Option<Vec<String>>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub session_id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Malformed(String),
    MissingTimestamp,
    InvalidTimestamp(String),
    InvalidResult(Option<String>),
    MissingMatchType,
    InvalidParent(String),
    InvalidChild(String),
    UnknownCharacter(String),
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "Malformed record ({err})"),
            Self::MissingTimestamp => f.write_str("Missing timestamp"),
            Self::InvalidTimestamp(raw) => write!(f, "Invalid timestamp: {raw}"),
            Self::InvalidResult(None) => f.write_str("Invalid or missing result"),
            Self::InvalidResult(Some(raw)) => write!(f, "Invalid or missing result: {raw}"),
            Self::MissingMatchType => f.write_str("Missing match type"),
            Self::InvalidParent(raw) => write!(f, "Invalid parent type: {raw}"),
            Self::InvalidChild(raw) => write!(f, "Invalid child type: {raw}"),
            Self::UnknownCharacter(raw) => write!(f, "Unknown hero: {raw}"),
        }
    }
}

/// Why the record at `position` (1-based) was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordProblem {
    pub position: usize,
    pub problems: Vec<FieldProblem>,
}

impl fmt::Display for RecordProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Match {}: ", self.position)?;
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{problem}")?;
        }
        Ok(())
    }
}

/// A validated record that may still need an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord {
    /// `None` when the source id was missing or not an integer.
    pub id: Option<RecordId>,
    pub parent: MatchTypeId,
    pub child: Option<MatchTypeId>,
    pub result: Outcome,
    pub characters: Vec<CharacterId>,
    pub timestamp: DateTime<Utc>,
    pub session: Option<SessionId>,
}

impl PendingRecord {
    pub fn into_record(self, id: RecordId) -> MatchRecord {
        MatchRecord {
            id,
            parent: self.parent,
            child: self.child,
            result: self.result,
            characters: self.characters,
            timestamp: self.timestamp,
            session: self.session,
        }
    }
}

/// How strictly a raw record is checked against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Imports: every field must resolve.
    Import,
    /// The app's own stored matches: catalog drift keeps the record. Unknown characters are
    /// kept as-is and an unknown child type falls back to its parent.
    Stored,
}

impl RawMatchRecord {
    /// Validates against `catalog` and maps legacy shapes onto parent/child types.
    pub fn normalize(&self, catalog: &Catalog) -> Result<PendingRecord, Vec<FieldProblem>> {
        self.normalize_with(catalog, Strictness::Import)
    }

    pub fn normalize_with(
        &self,
        catalog: &Catalog,
        strictness: Strictness,
    ) -> Result<PendingRecord, Vec<FieldProblem>> {
        let mut problems = Vec::new();

        let timestamp = match &self.timestamp {
            None | Some(Value::Null) => {
                problems.push(FieldProblem::MissingTimestamp);
                None
            }
            Some(Value::String(raw)) if raw.trim().is_empty() => {
                problems.push(FieldProblem::MissingTimestamp);
                None
            }
            Some(Value::String(raw)) => {
                let parsed = parse_timestamp(raw);
                if parsed.is_none() {
                    problems.push(FieldProblem::InvalidTimestamp(raw.clone()));
                }
                parsed
            }
            Some(Value::Number(number)) => {
                let parsed = number
                    .as_i64()
                    .and_then(|millis| Utc.timestamp_millis_opt(millis).single());
                if parsed.is_none() {
                    problems.push(FieldProblem::InvalidTimestamp(number.to_string()));
                }
                parsed
            }
            Some(other) => {
                problems.push(FieldProblem::InvalidTimestamp(other.to_string()));
                None
            }
        };

        let result = match self.result.as_deref().map(str::trim) {
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "win" => Some(Outcome::Win),
                "loss" => Some(Outcome::Loss),
                "draw" => Some(Outcome::Draw),
                _ => {
                    problems.push(FieldProblem::InvalidResult(Some(raw.to_owned())));
                    None
                }
            },
            None => {
                problems.push(FieldProblem::InvalidResult(None));
                None
            }
        };

        let match_type = self.match_type(catalog, strictness, &mut problems);

        let mut characters: Vec<CharacterId> = Vec::new();
        for raw in self.heroes.iter().flatten() {
            let id = match (catalog.character(raw.trim()), strictness) {
                (Some(character), _) => character.id().clone(),
                (None, Strictness::Stored) => match CharacterId::new(raw.trim()) {
                    Ok(id) => id,
                    Err(_) => continue,
                },
                (None, Strictness::Import) => {
                    problems.push(FieldProblem::UnknownCharacter(raw.clone()));
                    continue;
                }
            };
            if !characters.contains(&id) {
                characters.push(id);
            }
        }

        let (Some(timestamp), Some(result), Some((parent, child))) =
            (timestamp, result, match_type)
        else {
            return Err(problems);
        };
        if !problems.is_empty() {
            return Err(problems);
        }

        Ok(PendingRecord {
            id: self.id.as_ref().and_then(parse_record_id),
            parent,
            child,
            result,
            characters,
            timestamp,
            session: self.session_id.as_ref().and_then(parse_session_id),
        })
    }

    fn match_type(
        &self,
        catalog: &Catalog,
        strictness: Strictness,
        problems: &mut Vec<FieldProblem>,
    ) -> Option<(MatchTypeId, Option<MatchTypeId>)> {
        let non_empty = |raw: &Option<String>| {
            raw.as_deref()
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .map(str::to_owned)
        };

        match (non_empty(&self.parent_type), non_empty(&self.legacy_type)) {
            (Some(parent_raw), _) => {
                let Some(parent) = catalog.parent(&parent_raw) else {
                    problems.push(FieldProblem::InvalidParent(parent_raw));
                    return None;
                };
                let child = match non_empty(&self.child_type) {
                    Some(child_raw) if !parent.is_leaf() => match parent.child(&child_raw) {
                        Some(child) => Some(child.id().clone()),
                        None if strictness == Strictness::Stored => None,
                        None => {
                            problems.push(FieldProblem::InvalidChild(child_raw));
                            return None;
                        }
                    },
                    _ => None,
                };
                Some((parent.id().clone(), child))
            }
            (None, Some(flat)) => match catalog.resolve_flat_type(&flat) {
                Some((parent, child)) => {
                    Some((parent.id().clone(), child.map(|child| child.id().clone())))
                }
                None => {
                    problems.push(FieldProblem::InvalidParent(flat));
                    None
                }
            },
            (None, None) => {
                problems.push(FieldProblem::MissingMatchType);
                None
            }
        }
    }
}

fn parse_record_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(number) => number.as_u64().map(RecordId::new),
        Value::String(raw) => raw.trim().parse::<u64>().ok().map(RecordId::new),
        _ => None,
    }
}

fn parse_session_id(value: &Value) -> Option<SessionId> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|millis| millis as i64))
            .map(SessionId::from_millis),
        Value::String(raw) => raw
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| parse_timestamp(raw).map(|ts| ts.timestamp_millis()))
            .map(SessionId::from_millis),
        _ => None,
    }
}

/// Normalizes every record, keeping its 1-based position for error reports.
pub fn decode_records(
    values: &[Value],
    catalog: &Catalog,
) -> Vec<Result<PendingRecord, RecordProblem>> {
    decode_records_with(values, catalog, Strictness::Import)
}

fn decode_records_with(
    values: &[Value],
    catalog: &Catalog,
    strictness: Strictness,
) -> Vec<Result<PendingRecord, RecordProblem>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let problem = |problems| RecordProblem {
                position: i + 1,
                problems,
            };
            let raw = RawMatchRecord::deserialize(value)
                .map_err(|err| problem(vec![FieldProblem::Malformed(err.to_string())]))?;
            raw.normalize_with(catalog, strictness).map_err(problem)
        })
        .collect()
}

/// Rebuilds the match log from stored records; missing or clashing ids are reassigned.
///
/// Only records without a usable timestamp, result, or parent type are dropped.
pub fn decode_log(
    values: &[Value],
    catalog: &Catalog,
    now: DateTime<Utc>,
) -> (MatchLog, Vec<RecordProblem>) {
    let mut log = MatchLog::default();
    let mut problems = Vec::new();
    for decoded in decode_records_with(values, catalog, Strictness::Stored) {
        match decoded {
            Ok(pending) => {
                let id = pending
                    .id
                    .filter(|id| !log.contains_id(*id))
                    .unwrap_or_else(|| log.next_record_id(now));
                log.append(pending.into_record(id));
            }
            Err(problem) => problems.push(problem),
        }
    }
    log.merge_sorted(Vec::new());
    (log, problems)
}

/// The stored and exported shape of a match record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMatch<'a> {
    pub id: u64,
    pub parent_type: &'a str,
    pub child_type: Option<&'a str>,
    pub result: Outcome,
    pub heroes: Vec<&'a str>,
    pub timestamp: String,
    pub session_id: Option<i64>,
}

impl<'a> From<&'a MatchRecord> for StoredMatch<'a> {
    fn from(record: &'a MatchRecord) -> Self {
        Self {
            id: record.id.get(),
            parent_type: record.parent.as_str(),
            child_type: record.child.as_ref().map(|child| child.as_str()),
            result: record.result,
            heroes: record.characters.iter().map(|id| id.as_str()).collect(),
            timestamp: format_timestamp(record.timestamp),
            session_id: record.session.map(SessionId::millis),
        }
    }
}

pub fn encode_records(log: &MatchLog) -> Vec<StoredMatch<'_>> {
    log.all().iter().map(StoredMatch::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMatchType {
    pub parent_type: String,
    #[serde(default)]
    pub child_type: Option<String>,
}

impl LastMatchType {
    pub fn from_state(state: &AppState) -> Option<Self> {
        let parent = state.selection.parent()?;
        Some(Self {
            parent_type: parent.as_str().to_owned(),
            child_type: state.selection.child().map(|child| child.as_str().to_owned()),
        })
    }

    /// Drops types the catalog no longer knows; an unknown child keeps the parent.
    pub fn resolve(&self, catalog: &Catalog) -> Option<(MatchTypeId, Option<MatchTypeId>)> {
        let parent = catalog.parent(&self.parent_type)?;
        let child = self
            .child_type
            .as_deref()
            .and_then(|child| parent.child(child))
            .map(|child| child.id().clone());
        Some((parent.id().clone(), child))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    #[serde(default)]
    pub session_start_time: Option<String>,
    #[serde(default)]
    pub stats_view: Option<String>,
    #[serde(default)]
    pub match_history_view: Option<String>,
}

impl StoredSession {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            session_start_time: Some(format_timestamp(state.session.start())),
            stats_view: Some(state.ui.stats_view.as_str().to_owned()),
            match_history_view: Some(state.ui.history_view.as_str().to_owned()),
        }
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.session_start_time.as_deref().and_then(parse_timestamp)
    }

    pub fn stats_view(&self) -> Option<LogScope> {
        self.stats_view.as_deref().and_then(LogScope::parse)
    }

    pub fn history_view(&self) -> Option<LogScope> {
        self.match_history_view.as_deref().and_then(LogScope::parse)
    }
}

/// Full-state export document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope<'a> {
    pub version: u64,
    pub export_date: String,
    pub matches: Vec<StoredMatch<'a>>,
    pub settings: Value,
    pub session_start_time: Option<String>,
    pub recent_heroes: Vec<&'a str>,
    pub stats_view: &'static str,
    pub last_match_type: Option<LastMatchType>,
}

impl<'a> ExportEnvelope<'a> {
    pub fn from_state(state: &'a AppState, now: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION,
            export_date: format_timestamp(now),
            matches: encode_records(&state.log),
            settings: state.settings.to_value(),
            session_start_time: Some(format_timestamp(state.session.start())),
            recent_heroes: state.recent.ids().iter().map(|id| id.as_str()).collect(),
            stats_view: state.ui.stats_view.as_str(),
            last_match_type: LastMatchType::from_state(state),
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, FormatError> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }
}

/// Non-match state carried by a version 1 export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvelopeExtras {
    pub settings: Option<Value>,
    pub session_start_time: Option<DateTime<Utc>>,
    pub recent_heroes: Option<Vec<String>>,
    pub stats_view: Option<LogScope>,
    pub last_match_type: Option<LastMatchType>,
}

/// A parsed JSON import: a bare legacy array or a version 1 envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDocument {
    pub matches: Vec<Value>,
    pub envelope: Option<EnvelopeExtras>,
}

impl ImportDocument {
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Array(matches) => Ok(Self {
                matches,
                envelope: None,
            }),
            Value::Object(mut map) => {
                let version = map.get("version").cloned();
                match version {
                    Some(version) if version.as_u64() == Some(EXPORT_VERSION) => {}
                    Some(version) => {
                        return Err(FormatError::UnsupportedVersion(version.to_string()));
                    }
                    None => {
                        return Err(FormatError::InvalidShape(
                            "a matches array or a version 1 export",
                        ));
                    }
                }
                let Some(Value::Array(matches)) = map.remove("matches") else {
                    return Err(FormatError::InvalidShape("a matches array in the export"));
                };

                let extras = EnvelopeExtras {
                    settings: map.remove("settings").filter(Value::is_object),
                    session_start_time: map
                        .get("sessionStartTime")
                        .and_then(Value::as_str)
                        .and_then(parse_timestamp),
                    recent_heroes: map.get("recentHeroes").and_then(Value::as_array).map(
                        |items| {
                            items
                                .iter()
                                .filter_map(Value::as_str)
                                .map(str::to_owned)
                                .collect()
                        },
                    ),
                    stats_view: map
                        .get("statsView")
                        .and_then(Value::as_str)
                        .and_then(LogScope::parse),
                    last_match_type: map
                        .remove("lastMatchType")
                        .and_then(|value| serde_json::from_value(value).ok()),
                };
                Ok(Self {
                    matches,
                    envelope: Some(extras),
                })
            }
            _ => Err(FormatError::InvalidShape(
                "a matches array or a version 1 export",
            )),
        }
    }
}
