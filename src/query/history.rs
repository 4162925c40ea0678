// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{LogScope, MatchLog, MatchRecord, Session};

/// One page of the match history, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPage<'a> {
    pub records: Vec<&'a MatchRecord>,
    /// Zero-based, clamped into range.
    pub page: usize,
    /// At least one, even for an empty history.
    pub page_count: usize,
    pub total: usize,
}

impl HistoryPage<'_> {
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }
}

pub fn history_page<'a>(
    log: &'a MatchLog,
    scope: LogScope,
    session: &Session,
    per_page: usize,
    page: usize,
) -> HistoryPage<'a> {
    let records = log.scoped(scope, session.id());
    let per_page = per_page.max(1);
    let total = records.len();
    let page_count = total.div_ceil(per_page).max(1);
    let page = page.min(page_count - 1);
    let records = records
        .into_iter()
        .skip(page * per_page)
        .take(per_page)
        .collect();
    HistoryPage {
        records,
        page,
        page_count,
        total,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::history_page;
    use crate::model::{LogScope, MatchLog, MatchRecord, MatchTypeId, Outcome, RecordId, Session};

    fn log_of(count: u64) -> MatchLog {
        MatchLog::from_records(
            (1..=count)
                .map(|i| MatchRecord {
                    id: RecordId::new(i),
                    parent: MatchTypeId::new("arcade").expect("id"),
                    child: None,
                    result: Outcome::Win,
                    characters: Vec::new(),
                    timestamp: Utc.timestamp_millis_opt(i as i64 * 1_000).single().expect("ts"),
                    session: None,
                })
                .collect(),
        )
    }

    #[rstest]
    #[case::first(0, 0, &[12, 11, 10, 9, 8])]
    #[case::last(2, 2, &[2, 1])]
    #[case::clamped(9, 2, &[2, 1])]
    fn pages_are_newest_first(#[case] requested: usize, #[case] page: usize, #[case] ids: &[u64]) {
        let log = log_of(12);
        let session = Session::starting_at(Utc.timestamp_millis_opt(0).single().expect("ts"));
        let view = history_page(&log, LogScope::AllTime, &session, 5, requested);
        assert_eq!(view.page, page);
        assert_eq!(view.page_count, 3);
        assert_eq!(view.total, 12);
        let got: Vec<u64> = view.records.iter().map(|r| r.id.get()).collect();
        assert_eq!(got, ids);
    }

    #[test]
    fn empty_history_has_one_page() {
        let log = MatchLog::default();
        let session = Session::starting_at(Utc.timestamp_millis_opt(0).single().expect("ts"));
        let view = history_page(&log, LogScope::Session, &session, 10, 4);
        assert_eq!(view.page, 0);
        assert_eq!(view.page_count, 1);
        assert!(!view.has_previous());
        assert!(!view.has_next());
    }
}
