// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

use super::ids::{CharacterId, MatchTypeId, RecordId, SessionId};
use super::selection::Outcome;

/// A saved match. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: RecordId,
    pub parent: MatchTypeId,
    pub child: Option<MatchTypeId>,
    pub result: Outcome,
    pub characters: Vec<CharacterId>,
    pub timestamp: DateTime<Utc>,
    /// `None` only for records written before sessions were tracked.
    pub session: Option<SessionId>,
}

impl MatchRecord {
    pub fn belongs_to_session(&self, session: SessionId) -> bool {
        match self.session {
            Some(id) => id == session,
            None => self.timestamp.timestamp_millis() >= session.millis(),
        }
    }
}

/// Truncates to whole milliseconds, the precision records are stored with.
pub fn truncate_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .duration_trunc(TimeDelta::milliseconds(1))
        .unwrap_or(instant)
}

/// Whether statistics and history cover every match or only the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogScope {
    #[default]
    AllTime,
    Session,
}

impl LogScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllTime => "all-time",
            Self::Session => "session",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all-time" => Some(Self::AllTime),
            "session" => Some(Self::Session),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::AllTime => Self::Session,
            Self::Session => Self::AllTime,
        }
    }
}

/// Saved matches, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchLog {
    records: Vec<MatchRecord>,
}

impl MatchLog {
    /// Builds a log from records in any order; they are sorted newest first.
    pub fn from_records(records: Vec<MatchRecord>) -> Self {
        let mut log = Self { records };
        log.sort_newest_first();
        log
    }

    pub fn all(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn append(&mut self, record: MatchRecord) {
        self.records.insert(0, record);
    }

    pub fn remove_by_id(&mut self, id: RecordId) -> Option<MatchRecord> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }

    /// Removes the newest record.
    pub fn undo_last(&mut self) -> Option<MatchRecord> {
        if self.records.is_empty() {
            return None;
        }
        Some(self.records.remove(0))
    }

    pub fn clear_all(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    pub fn filtered_by_session(&self, session: SessionId) -> impl Iterator<Item = &MatchRecord> {
        self.records
            .iter()
            .filter(move |record| record.belongs_to_session(session))
    }

    pub fn scoped(&self, scope: LogScope, session: SessionId) -> Vec<&MatchRecord> {
        match scope {
            LogScope::AllTime => self.records.iter().collect(),
            LogScope::Session => self.filtered_by_session(session).collect(),
        }
    }

    pub fn contains_id(&self, id: RecordId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn contains_timestamp(&self, timestamp: DateTime<Utc>) -> bool {
        self.records.iter().any(|r| r.timestamp == timestamp)
    }

    /// Time-derived id, strictly greater than every id already in the log.
    pub fn next_record_id(&self, now: DateTime<Utc>) -> RecordId {
        let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let next_free = self
            .records
            .iter()
            .map(|r| r.id.get())
            .max()
            .map_or(0, |max| max.saturating_add(1));
        RecordId::new(now_ms.max(next_free))
    }

    /// Adds records and restores newest-first order by timestamp.
    pub fn merge_sorted(&mut self, records: impl IntoIterator<Item = MatchRecord>) {
        self.records.extend(records);
        self.sort_newest_first();
    }

    fn sort_newest_first(&mut self) {
        self.records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
}
