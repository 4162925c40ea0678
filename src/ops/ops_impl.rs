// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Adds valid, non-duplicate records to the log.
///
/// A record is a duplicate when its id or timestamp is already in the log or earlier in the
/// same batch. Records without a usable id get a fresh one.
fn merge_records(
    state: &mut AppState,
    decoded: Vec<Result<PendingRecord, RecordProblem>>,
    now: DateTime<Utc>,
    report: &mut ImportReport,
) {
    let mut accepted: Vec<MatchRecord> = Vec::new();

    for item in decoded {
        let pending = match item {
            Ok(pending) => pending,
            Err(problem) => {
                tracing::debug!("skipping import record: {problem}");
                report.errors.push(problem);
                continue;
            }
        };

        if is_duplicate(&state.log, &accepted, &pending) {
            report.duplicates += 1;
            continue;
        }

        let id = match pending.id {
            Some(id) => id,
            None => next_free_id(&state.log, &accepted, now),
        };
        accepted.push(pending.into_record(id));
    }

    report.imported = accepted.len();
    state.log.merge_sorted(accepted);
}

fn is_duplicate(log: &MatchLog, accepted: &[MatchRecord], pending: &PendingRecord) -> bool {
    let id_taken = pending
        .id
        .is_some_and(|id| log.contains_id(id) || accepted.iter().any(|r| r.id == id));
    id_taken
        || log.contains_timestamp(pending.timestamp)
        || accepted.iter().any(|r| r.timestamp == pending.timestamp)
}

fn next_free_id(log: &MatchLog, accepted: &[MatchRecord], now: DateTime<Utc>) -> RecordId {
    let from_log = log.next_record_id(now).get();
    let from_batch = accepted
        .iter()
        .map(|r| r.id.get().saturating_add(1))
        .max()
        .unwrap_or(0);
    RecordId::new(from_log.max(from_batch))
}

fn apply_envelope(state: &mut AppState, extras: EnvelopeExtras, report: &mut ImportReport) {
    if let Some(settings) = extras.settings {
        let (merged, merge) = Settings::merged_over_defaults(&settings);
        if !merge.rejected.is_empty() {
            tracing::warn!(keys = ?merge.rejected, "imported settings kept defaults for malformed keys");
        }
        state.settings = merged;
        report.settings_imported = true;
    }

    if let Some(start) = extras.session_start_time {
        state.session = Session::starting_at(start);
    }

    if let Some(ids) = extras.recent_heroes {
        let ids = ids.into_iter().filter_map(|id| CharacterId::new(id).ok());
        state.recent = RecentCharacters::from_ids(ids, &state.catalog);
    }

    if let Some(view) = extras.stats_view {
        state.ui.stats_view = view;
    }

    if let Some((parent, child)) = extras
        .last_match_type
        .as_ref()
        .and_then(|last| last.resolve(&state.catalog))
    {
        state
            .selection
            .restore_match_type(&state.catalog, &parent, child.as_ref());
    }

    report.ui_state_imported = true;
}
