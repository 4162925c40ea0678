// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Local, TimeZone, Utc};

use super::ids::SessionId;
use super::record::{truncate_to_millis, MatchLog};
use super::selection::Outcome;
use super::settings::SessionAutoReset;

/// The current logging session, identified by its start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    start: DateTime<Utc>,
}

impl Session {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start: truncate_to_millis(start),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn id(&self) -> SessionId {
        SessionId::from_millis(self.start.timestamp_millis())
    }

    pub fn summarize(&self, log: &MatchLog) -> SessionSummary {
        let mut summary = SessionSummary::default();
        for record in log.filtered_by_session(self.id()) {
            summary.matches += 1;
            if record.result == Outcome::Win {
                summary.wins += 1;
            }
        }
        summary
    }
}

/// Match count and wins of a session that just ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub matches: usize,
    pub wins: usize,
}

impl SessionSummary {
    pub fn win_rate_percent(&self) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        self.wins as f64 * 100.0 / self.matches as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionStart {
    pub session: Session,
    /// Set when a stored session was replaced.
    pub ended: Option<SessionSummary>,
}

/// Decides at launch whether the stored session continues, using the local calendar for
/// [`SessionAutoReset::Daily`].
pub fn resume_or_reset(
    stored: Option<DateTime<Utc>>,
    policy: SessionAutoReset,
    now: DateTime<Utc>,
    log: &MatchLog,
) -> SessionStart {
    resume_or_reset_in(stored, policy, now, log, &Local)
}

pub fn resume_or_reset_in<Tz: TimeZone>(
    stored: Option<DateTime<Utc>>,
    policy: SessionAutoReset,
    now: DateTime<Utc>,
    log: &MatchLog,
    tz: &Tz,
) -> SessionStart {
    let Some(stored) = stored else {
        return SessionStart {
            session: Session::starting_at(now),
            ended: None,
        };
    };

    let reset = match policy {
        SessionAutoReset::Manual => false,
        SessionAutoReset::OnLaunch => true,
        SessionAutoReset::Daily => {
            stored.with_timezone(tz).date_naive() != now.with_timezone(tz).date_naive()
        }
    };

    let previous = Session::starting_at(stored);
    if reset {
        SessionStart {
            session: Session::starting_at(now),
            ended: Some(previous.summarize(log)),
        }
    } else {
        SessionStart {
            session: previous,
            ended: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{resume_or_reset_in, Session};
    use crate::model::{
        MatchLog, MatchRecord, MatchTypeId, Outcome, RecordId, SessionAutoReset,
    };

    fn log_with(session: &Session, results: &[Outcome]) -> MatchLog {
        let mut log = MatchLog::default();
        for (i, result) in results.iter().enumerate() {
            log.append(MatchRecord {
                id: RecordId::new(i as u64 + 1),
                parent: MatchTypeId::new("arcade").expect("id"),
                child: None,
                result: *result,
                characters: Vec::new(),
                timestamp: session.start(),
                session: Some(session.id()),
            });
        }
        log
    }

    #[test]
    fn daily_keeps_session_on_same_day() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).single().expect("ts");
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 22, 0, 0).single().expect("ts");
        let out = resume_or_reset_in(
            Some(start),
            SessionAutoReset::Daily,
            now,
            &MatchLog::default(),
            &Utc,
        );
        assert_eq!(out.session.start(), start);
        assert!(out.ended.is_none());
    }

    #[test]
    fn daily_resets_on_new_day_and_summarizes() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).single().expect("ts");
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).single().expect("ts");
        let log = log_with(
            &Session::starting_at(start),
            &[Outcome::Win, Outcome::Loss, Outcome::Win, Outcome::Win],
        );
        let out = resume_or_reset_in(Some(start), SessionAutoReset::Daily, now, &log, &Utc);
        assert_eq!(out.session.start(), now);
        let ended = out.ended.expect("summary");
        assert_eq!(ended.matches, 4);
        assert_eq!(ended.wins, 3);
        assert!((ended.win_rate_percent() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn manual_never_resets_and_on_launch_always_does() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().expect("ts");
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("ts");
        let log = MatchLog::default();
        let manual = resume_or_reset_in(Some(start), SessionAutoReset::Manual, now, &log, &Utc);
        assert_eq!(manual.session.start(), start);
        let launch = resume_or_reset_in(Some(now), SessionAutoReset::OnLaunch, now, &log, &Utc);
        assert!(launch.ended.is_some());
    }

    #[test]
    fn missing_session_starts_fresh_without_summary() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("ts");
        let out = resume_or_reset_in(
            None,
            SessionAutoReset::OnLaunch,
            now,
            &MatchLog::default(),
            &Utc,
        );
        assert_eq!(out.session.start(), now);
        assert!(out.ended.is_none());
    }
}
