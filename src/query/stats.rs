// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{LogScope, MatchLog, MatchRecord, Outcome, Session};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl Stats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a MatchRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total += 1;
            match record.result {
                Outcome::Win => stats.wins += 1,
                Outcome::Loss => stats.losses += 1,
                Outcome::Draw => stats.draws += 1,
            }
        }
        stats
    }

    /// Wins over all matches (draws included) in percent; zero for an empty set.
    pub fn win_rate_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.wins as f64 * 100.0 / self.total as f64
    }

    /// Win rate with one decimal, e.g. `"66.7%"`.
    pub fn win_rate_label(&self) -> String {
        format!("{:.1}%", self.win_rate_percent())
    }
}

pub fn stats_for(log: &MatchLog, scope: LogScope, session: &Session) -> Stats {
    Stats::from_records(log.scoped(scope, session.id()))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{stats_for, Stats};
    use crate::model::{
        LogScope, MatchLog, MatchRecord, MatchTypeId, Outcome, RecordId, Session, SessionId,
    };

    fn record(id: u64, result: Outcome, session: Option<i64>, millis: i64) -> MatchRecord {
        MatchRecord {
            id: RecordId::new(id),
            parent: MatchTypeId::new("arcade").expect("id"),
            child: None,
            result,
            characters: Vec::new(),
            timestamp: Utc.timestamp_millis_opt(millis).single().expect("ts"),
            session: session.map(SessionId::from_millis),
        }
    }

    #[test]
    fn scopes_split_all_time_and_session() {
        let session = Session::starting_at(Utc.timestamp_millis_opt(5_000).single().expect("ts"));
        let log = MatchLog::from_records(vec![
            record(1, Outcome::Win, Some(1_000), 1_500),
            record(2, Outcome::Loss, Some(5_000), 5_500),
            record(3, Outcome::Win, Some(5_000), 6_000),
            record(4, Outcome::Draw, None, 7_000),
        ]);

        let all = stats_for(&log, LogScope::AllTime, &session);
        assert_eq!(
            all,
            Stats {
                total: 4,
                wins: 2,
                losses: 1,
                draws: 1
            }
        );
        assert_eq!(all.win_rate_label(), "50.0%");

        let current = stats_for(&log, LogScope::Session, &session);
        assert_eq!(current.total, 3);
        assert_eq!(current.win_rate_label(), "33.3%");
    }

    #[test]
    fn empty_log_has_zero_rate() {
        assert_eq!(Stats::default().win_rate_label(), "0.0%");
    }
}
