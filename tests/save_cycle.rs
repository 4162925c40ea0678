// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use matchtally::focus::{Activation, Command, Direction, Navigator, Zone};
use matchtally::model::{Catalog, Outcome};
use matchtally::ops::{self, ImportFormat};
use matchtally::state::AppState;
use matchtally::store::DataFolder;
use matchtally::tui::{TuiRenderer, DEFAULT_FORM_WIDTH};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = std::env::temp_dir();
        path.push(format!(
            "matchtally_it_{}_{nanos}_{counter}",
            std::process::id()
        ));
        Self { path }
    }

    fn folder(&self, name: &str) -> DataFolder {
        DataFolder::new(self.path.join(name))
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[fixture]
fn tmp() -> TempDir {
    TempDir::new()
}

fn evening() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 19, 0, 0)
        .single()
        .expect("timestamp")
}

fn launch(folder: &DataFolder, now: DateTime<Utc>) -> AppState {
    let catalog = Catalog::builtin();
    let loaded = folder.load_all(&catalog, now);
    ops::startup(catalog, loaded, now).state
}

/// Plays one match through the navigator the way the keyboard would.
fn record_match(
    state: &mut AppState,
    now: DateTime<Utc>,
    hotkey: char,
    result_index: usize,
) -> Activation {
    let mut renderer = TuiRenderer::new(state, DEFAULT_FORM_WIDTH);
    let mut nav = Navigator::new(state, &mut renderer).at(now);

    nav.dispatch(Command::SelectParentHotkey(hotkey));
    if nav.focus().zone == Some(Zone::ChildTypes) {
        nav.dispatch(Command::Activate);
    }
    nav.dispatch(Command::DirectClick {
        zone: Zone::Result,
        index: result_index,
    });
    nav.dispatch(Command::Activate);
    assert_eq!(nav.focus().zone, Some(Zone::Save));
    nav.dispatch(Command::Activate)
}

#[rstest]
fn saved_matches_survive_a_restart(tmp: TempDir) {
    let folder = tmp.folder("data");
    let mut state = launch(&folder, evening());

    for (offset, (hotkey, result)) in [('1', 0), ('2', 1), ('4', 0)].into_iter().enumerate() {
        let now = evening() + Duration::minutes(offset as i64 * 15);
        let Activation::Saved(record) = record_match(&mut state, now, hotkey, result) else {
            panic!("match {offset} was not saved");
        };
        assert_eq!(record.timestamp, now);
        folder.save_after_match_change(&state).expect("persist");
    }
    folder.save_state(&state).expect("persist");

    let reopened = launch(&folder, evening() + Duration::hours(1));
    assert_eq!(reopened.log, state.log);
    assert_eq!(reopened.log.all()[0].parent.as_str(), "arcade");
    assert_eq!(reopened.log.all()[1].result, Outcome::Loss);
    assert_eq!(
        reopened.log.all()[1].child.as_ref().map(|c| c.as_str()),
        Some("role-queue")
    );
    assert_eq!(
        reopened.selection.parent().map(|p| p.as_str()),
        Some("arcade")
    );
}

#[rstest]
fn undo_then_restart_drops_the_match(tmp: TempDir) {
    let folder = tmp.folder("data");
    let mut state = launch(&folder, evening());
    record_match(&mut state, evening(), '4', 0);
    record_match(&mut state, evening() + Duration::minutes(20), '4', 1);

    let mut renderer = TuiRenderer::new(&state, DEFAULT_FORM_WIDTH);
    let undone = Navigator::new(&mut state, &mut renderer).dispatch(Command::UndoLastMatch);
    assert!(matches!(undone, Activation::Undone(ref record) if record.result == Outcome::Loss));
    folder.save_after_match_change(&state).expect("persist");

    let reopened = launch(&folder, evening() + Duration::hours(1));
    assert_eq!(reopened.log.len(), 1);
    assert_eq!(reopened.log.all()[0].result, Outcome::Win);
}

#[rstest]
fn json_export_imports_into_an_empty_folder(tmp: TempDir) {
    let source = tmp.folder("source");
    let mut state = launch(&source, evening());
    record_match(&mut state, evening(), '3', 0);
    record_match(&mut state, evening() + Duration::minutes(10), '1', 1);
    let exported = ops::export_json(&state, evening() + Duration::hours(1)).expect("export");

    let target = tmp.folder("target");
    let mut fresh = launch(&target, evening());
    let report = ops::import_text(&mut fresh, ImportFormat::Json, &exported, evening())
        .expect("import");
    assert_eq!(report.imported, 2);
    assert_eq!(report.duplicates, 0);
    assert!(report.settings_imported);
    target.save_state(&fresh).expect("persist");

    let reopened = launch(&target, evening());
    assert_eq!(reopened.log, state.log);

    let mut again = reopened.clone();
    let report = ops::import_text(&mut again, ImportFormat::Json, &exported, evening())
        .expect("import");
    assert_eq!(report.imported, 0);
    assert_eq!(report.duplicates, 2);
}

#[rstest]
fn csv_export_round_trips_through_import(tmp: TempDir) {
    let source = tmp.folder("source");
    let mut state = launch(&source, evening());
    record_match(&mut state, evening(), '2', 0);

    let mut renderer = TuiRenderer::new(&state, DEFAULT_FORM_WIDTH);
    let mut nav = Navigator::new(&mut state, &mut renderer).at(evening() + Duration::minutes(5));
    nav.dispatch(Command::SelectParentHotkey('4'));
    nav.dispatch(Command::ToggleCharacters);
    nav.dispatch(Command::DirectClick {
        zone: Zone::CharacterGrid,
        index: 0,
    });
    nav.dispatch(Command::Activate);
    nav.dispatch(Command::SecondaryMove(Direction::Next));
    nav.dispatch(Command::Activate);
    nav.dispatch(Command::DirectClick {
        zone: Zone::Result,
        index: 1,
    });
    nav.dispatch(Command::Activate);
    assert!(matches!(nav.dispatch(Command::Activate), Activation::Saved(_)));
    assert_eq!(state.log.all()[0].characters.len(), 2);

    let csv = ops::export_csv_text(&state).expect("export");
    assert!(csv.starts_with("Timestamp,Match Type,Result,Heroes"));

    let mut fresh = launch(&tmp.folder("target"), evening());
    let report = ops::import_text(&mut fresh, ImportFormat::Csv, &csv, evening()).expect("import");
    assert_eq!(report.imported, 2);
    assert!(report.errors.is_empty());
    for (imported, original) in fresh.log.all().iter().zip(state.log.all()) {
        assert_eq!(imported.parent, original.parent);
        assert_eq!(imported.child, original.child);
        assert_eq!(imported.result, original.result);
        assert_eq!(imported.characters, original.characters);
        assert_eq!(imported.timestamp, original.timestamp);
    }
}

#[rstest]
fn exporting_an_empty_log_is_refused(tmp: TempDir) {
    let state = launch(&tmp.folder("data"), evening());
    assert!(ops::export_json(&state, evening()).is_err());
    assert!(ops::export_csv_text(&state).is_err());
}
