// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::{
    Activation, Command, Direction, ItemKey, ItemPosition, Navigator, Renderer, Surface, Vertical,
    Zone,
};
use crate::model::{
    Catalog, CharacterId, MatchRecord, MatchTypeId, Outcome, RecordId, RestrictionPolicy,
    Settings,
};
use crate::state::AppState;

/// Lays the grid out in rows of `columns`, starting a new row per role.
struct FakeRenderer {
    surface: Surface,
    columns: usize,
    grid: Vec<ItemPosition>,
    visual: Option<(Zone, usize)>,
    refreshes: usize,
}

impl FakeRenderer {
    fn new(state: &AppState, columns: usize) -> Self {
        let mut renderer = Self {
            surface: Surface::default(),
            columns,
            grid: Vec::new(),
            visual: None,
            refreshes: 0,
        };
        renderer.refresh(state);
        renderer
    }
}

impl Renderer for FakeRenderer {
    fn refresh(&mut self, state: &AppState) {
        self.surface = Surface::derive(state);
        self.grid.clear();
        let (mut row, mut col) = (0usize, 0usize);
        let mut role = None;
        for item in self.surface.items(Zone::CharacterGrid) {
            if (role.is_some() && item.role != role && col > 0) || col == self.columns {
                row += 1;
                col = 0;
            }
            role = item.role;
            self.grid.push(ItemPosition {
                x: col as i32 * 10,
                y: row as i32 * 2,
            });
            col += 1;
        }
        self.refreshes += 1;
    }

    fn zone_exists(&self, zone: Zone) -> bool {
        self.surface.exists(zone)
    }

    fn zone_cardinality(&self, zone: Zone) -> usize {
        self.surface.items(zone).len()
    }

    fn item_position(&self, zone: Zone, index: usize) -> Option<ItemPosition> {
        if zone == Zone::CharacterGrid {
            return self.grid.get(index).copied();
        }
        (index < self.zone_cardinality(zone)).then_some(ItemPosition {
            x: index as i32 * 10,
            y: 0,
        })
    }

    fn item_available(&self, zone: Zone, index: usize) -> bool {
        self.surface.item(zone, index).is_some_and(|item| item.available)
    }

    fn item_key(&self, zone: Zone, index: usize) -> Option<ItemKey> {
        self.surface.item(zone, index).map(|item| item.key.clone())
    }

    fn set_focus_visual(&mut self, zone: Zone, index: usize) {
        self.visual = Some((zone, index));
    }

    fn clear_focus_visual(&mut self) {
        self.visual = None;
    }
}

struct Harness {
    state: AppState,
    renderer: FakeRenderer,
    now: DateTime<Utc>,
}

impl Harness {
    fn run(&mut self, command: Command) -> Activation {
        Navigator::new(&mut self.state, &mut self.renderer)
            .at(self.now)
            .dispatch(command)
    }

    fn click(&mut self, zone: Zone, index: usize) {
        self.run(Command::DirectClick { zone, index });
        assert_eq!(self.focus(), Some((zone, index)), "click on {zone}[{index}] did not focus");
    }

    fn focus(&self) -> Option<(Zone, usize)> {
        self.state.focus.zone.map(|zone| (zone, self.state.focus.index))
    }

    /// Re-derive the shape after poking `state` directly.
    fn sync(&mut self) {
        self.renderer.refresh(&self.state);
    }

    fn press(&mut self, command: Command, times: usize) {
        for _ in 0..times {
            self.run(command.clone());
        }
    }

    fn pick_parent(&mut self, id: &str) {
        let catalog = self.state.catalog.clone();
        let id = MatchTypeId::new(id).expect("id");
        let cap = self.state.caps_characters_for(&id);
        assert!(self.state.selection.select_parent(&catalog, &id, cap));
        self.sync();
    }

    fn grid_index(&self, id: &str) -> usize {
        self.renderer
            .surface
            .items(Zone::CharacterGrid)
            .iter()
            .position(|item| item.key == ItemKey::Character(ch(id)))
            .expect("character in grid")
    }
}

fn ch(id: &str) -> CharacterId {
    CharacterId::new(id).expect("id")
}

#[fixture]
fn harness() -> Harness {
    let state = AppState::new(
        Catalog::builtin(),
        Settings::default(),
        Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).single().expect("ts"),
    );
    let renderer = FakeRenderer::new(&state, 5);
    Harness {
        state,
        renderer,
        now: Utc.with_ymd_and_hms(2026, 5, 1, 19, 30, 0).single().expect("ts"),
    }
}

#[rstest]
#[case::parents(Zone::ParentTypes, 4)]
#[case::children(Zone::ChildTypes, 2)]
#[case::results(Zone::Result, 2)]
#[case::results_with_draw(Zone::Result, 3)]
#[case::grid(Zone::CharacterGrid, 44)]
fn secondary_moves_stop_at_last_item(
    mut harness: Harness,
    #[case] zone: Zone,
    #[case] expected: usize,
) {
    harness.state.settings.show_draw = expected == 3;
    harness.state.ui.characters_expanded = true;
    harness.pick_parent("competitive");
    assert_eq!(harness.renderer.zone_cardinality(zone), expected);

    harness.click(zone, 0);
    harness.press(Command::SecondaryMove(Direction::Next), expected - 1);
    assert_eq!(harness.focus(), Some((zone, expected - 1)));
    harness.press(Command::SecondaryMove(Direction::Next), 3);
    assert_eq!(harness.focus(), Some((zone, expected - 1)));

    harness.press(Command::SecondaryMove(Direction::Previous), expected + 2);
    assert_eq!(harness.focus(), Some((zone, 0)));
}

#[rstest]
#[case::toggle(Zone::MatchTypeToggle, false)]
#[case::parents(Zone::ParentTypes, false)]
#[case::character_toggle(Zone::CharacterToggle, false)]
#[case::recent(Zone::RecentCharacters, false)]
#[case::recent_above_open_grid(Zone::RecentCharacters, true)]
#[case::clear_below_open_grid(Zone::ClearCharacters, true)]
fn primary_next_then_previous_returns_home(
    mut harness: Harness,
    #[case] start: Zone,
    #[case] grid_open: bool,
) {
    harness.pick_parent("competitive");
    harness.state.recent.record_played(&[ch("ana"), ch("mercy")], 4);
    harness.state.ui.characters_expanded = grid_open;
    harness.sync();
    if grid_open {
        // Leave the remembered grid slot in a middle row.
        harness.click(Zone::CharacterGrid, 12);
    }

    harness.click(start, 0);
    harness.run(Command::PrimaryMove(Direction::Next));
    assert_ne!(harness.focus().map(|(zone, _)| zone), Some(start));
    harness.run(Command::PrimaryMove(Direction::Previous));
    assert_eq!(harness.focus(), Some((start, 0)));
}

#[rstest]
fn primary_move_skips_absent_zones(mut harness: Harness) {
    harness.pick_parent("arcade");
    harness.click(Zone::ParentTypes, 3);
    harness.run(Command::PrimaryMove(Direction::Next));
    assert_eq!(harness.focus(), Some((Zone::CharacterToggle, 0)));
    harness.run(Command::PrimaryMove(Direction::Next));
    assert_eq!(harness.focus(), Some((Zone::Result, 0)));
    // Save is absent while the selection is incomplete.
    harness.run(Command::PrimaryMove(Direction::Next));
    assert_eq!(harness.focus(), Some((Zone::Result, 0)));
}

#[rstest]
fn primary_move_at_top_is_noop(mut harness: Harness) {
    harness.click(Zone::MatchTypeToggle, 0);
    harness.run(Command::PrimaryMove(Direction::Previous));
    assert_eq!(harness.focus(), Some((Zone::MatchTypeToggle, 0)));
}

#[rstest]
fn leaf_parent_never_focuses_children(mut harness: Harness) {
    harness.click(Zone::ParentTypes, 3);
    let activation = harness.run(Command::Activate);
    assert_eq!(activation, Activation::MatchTypeChanged);
    assert_eq!(harness.state.selection.parent().map(|id| id.as_str()), Some("arcade"));
    assert_ne!(harness.focus().map(|(zone, _)| zone), Some(Zone::ChildTypes));
    assert_eq!(harness.focus(), Some((Zone::CharacterToggle, 0)));
}

#[rstest]
fn branch_parent_focuses_first_child(mut harness: Harness) {
    harness.click(Zone::ParentTypes, 1);
    harness.run(Command::Activate);
    assert_eq!(harness.focus(), Some((Zone::ChildTypes, 0)));
}

#[rstest]
fn default_target_prefers_selected_recent_slot(mut harness: Harness) {
    harness.state.recent.record_played(&[ch("mercy"), ch("ana")], 4);
    harness.state.selection.toggle_character(&ch("mercy"), false);
    harness.sync();

    harness.click(Zone::ParentTypes, 3);
    harness.run(Command::Activate);
    assert_eq!(harness.focus(), Some((Zone::RecentCharacters, 1)));
}

#[rstest]
fn default_target_falls_back_to_grid_then_result(mut harness: Harness) {
    harness.state.settings.always_show_all_characters = true;
    harness.state.selection.toggle_character(&ch("mercy"), false);
    harness.sync();
    let mercy = harness.grid_index("mercy");

    harness.click(Zone::ParentTypes, 3);
    harness.run(Command::Activate);
    assert_eq!(harness.focus(), Some((Zone::CharacterGrid, mercy)));

    harness.state.settings.show_characters = false;
    harness.pick_parent("competitive");
    harness.state.selection.set_result(Some(Outcome::Loss));
    harness.sync();
    harness.click(Zone::ChildTypes, 1);
    harness.run(Command::Activate);
    assert_eq!(harness.focus(), Some((Zone::Result, 1)));
}

#[rstest]
fn toggling_a_character_twice_is_identity(mut harness: Harness) {
    harness.state.ui.characters_expanded = true;
    harness.sync();
    harness.click(Zone::CharacterGrid, 4);
    let selection = harness.state.selection.clone();
    let focus = harness.state.focus;

    assert_eq!(harness.run(Command::Activate), Activation::SelectionChanged);
    assert_eq!(harness.state.selection.characters().len(), 1);
    harness.run(Command::Activate);

    assert_eq!(harness.state.selection, selection);
    assert_eq!(harness.state.focus, focus);
}

#[rstest]
fn restricted_mode_caps_characters_at_one(mut harness: Harness) {
    harness.state.ui.characters_expanded = true;
    harness.pick_parent("stadium");
    let ana = harness.grid_index("ana");
    let mercy = harness.grid_index("mercy");

    harness.click(Zone::CharacterGrid, ana);
    harness.run(Command::Activate);
    harness.click(Zone::CharacterGrid, mercy);
    harness.run(Command::Activate);
    assert_eq!(harness.state.selection.characters(), &[ch("mercy")]);
}

#[rstest]
fn incomplete_save_changes_nothing(mut harness: Harness) {
    harness.pick_parent("competitive");
    harness.state.selection.set_result(Some(Outcome::Win));
    harness.sync();
    harness.state.focus.zone = Some(Zone::Save);
    harness.state.focus.index = 0;
    let focus = harness.state.focus;

    assert_eq!(harness.run(Command::Activate), Activation::None);
    assert!(harness.state.log.is_empty());
    assert_eq!(harness.state.focus, focus);
}

#[rstest]
fn full_save_cycle(mut harness: Harness) {
    harness.click(Zone::ParentTypes, 1);
    harness.run(Command::Activate);
    assert_eq!(harness.focus(), Some((Zone::ChildTypes, 0)));

    assert_eq!(harness.run(Command::Activate), Activation::MatchTypeChanged);
    assert_eq!(harness.state.selection.child().map(|id| id.as_str()), Some("role-queue"));
    assert_eq!(harness.focus(), Some((Zone::CharacterToggle, 0)));

    harness.run(Command::PrimaryMove(Direction::Next));
    assert_eq!(harness.focus(), Some((Zone::Result, 0)));
    harness.run(Command::Activate);
    assert_eq!(harness.state.selection.result(), Some(Outcome::Win));
    assert_eq!(harness.focus(), Some((Zone::Save, 0)));

    let Activation::Saved(record) = harness.run(Command::Activate) else {
        panic!("expected a saved record");
    };
    assert_eq!(harness.state.log.len(), 1);
    assert_eq!(record.result, Outcome::Win);
    assert_eq!(record.parent.as_str(), "competitive");
    assert_eq!(record.child.as_ref().map(|id| id.as_str()), Some("role-queue"));
    assert_eq!(record.timestamp, harness.now);
    assert_eq!(record.session, Some(harness.state.session.id()));
    assert_eq!(harness.state.selection.result(), None);
    assert_eq!(harness.focus(), Some((Zone::Result, 0)));
}

#[rstest]
fn save_updates_recent_and_collapses_sections(mut harness: Harness) {
    harness.state.ui.characters_expanded = true;
    harness.pick_parent("arcade");
    harness.state.selection.toggle_character(&ch("ana"), false);
    harness.state.selection.set_result(Some(Outcome::Loss));
    harness.sync();
    harness.click(Zone::Save, 0);

    assert!(matches!(harness.run(Command::Activate), Activation::Saved(_)));
    assert_eq!(harness.state.recent.ids(), &[ch("ana")]);
    assert!(harness.state.selection.characters().is_empty());
    assert_eq!(harness.state.selection.parent().map(|id| id.as_str()), Some("arcade"));
    assert!(!harness.state.ui.characters_expanded);
    assert!(!harness.state.ui.match_types_expanded);
}

#[rstest]
fn result_toggles_off_and_stays(mut harness: Harness) {
    harness.pick_parent("arcade");
    harness.click(Zone::Result, 1);
    harness.run(Command::Activate);
    assert_eq!(harness.focus(), Some((Zone::Save, 0)));

    harness.click(Zone::Result, 1);
    harness.run(Command::Activate);
    assert_eq!(harness.state.selection.result(), None);
    assert_eq!(harness.focus(), Some((Zone::Result, 1)));
}

#[rstest]
fn grid_down_follows_column(mut harness: Harness) {
    harness.state.ui.characters_expanded = true;
    harness.sync();
    harness.click(Zone::CharacterGrid, 0);
    harness.run(Command::PrimaryMove(Direction::Next));
    assert_eq!(harness.focus(), Some((Zone::CharacterGrid, 5)));

    // Last tank row has three items; the first damage row sits below it.
    harness.click(Zone::CharacterGrid, 12);
    harness.run(Command::PrimaryMove(Direction::Next));
    assert_eq!(harness.focus(), Some((Zone::CharacterGrid, 15)));
}

#[rstest]
fn grid_exit_from_bottom_row_goes_below(mut harness: Harness) {
    harness.state.ui.characters_expanded = true;
    harness.sync();
    let last = harness.renderer.zone_cardinality(Zone::CharacterGrid) - 1;
    harness.click(Zone::CharacterGrid, last);

    Navigator::new(&mut harness.state, &mut harness.renderer).grid_move(Vertical::Down);
    assert_eq!(harness.focus(), Some((Zone::ClearCharacters, 0)));
    assert_eq!(harness.state.focus.last_grid_index, last);
}

#[rstest]
fn grid_exit_from_top_row_goes_above(mut harness: Harness) {
    harness.state.ui.characters_expanded = true;
    harness.sync();
    harness.click(Zone::CharacterGrid, 2);
    harness.run(Command::PrimaryMove(Direction::Previous));
    assert_eq!(harness.focus(), Some((Zone::CharacterToggle, 0)));

    harness.run(Command::PrimaryMove(Direction::Next));
    assert_eq!(harness.focus(), Some((Zone::CharacterGrid, 0)));
}

#[rstest]
fn grid_entry_from_either_side_lands_on_facing_row(mut harness: Harness) {
    harness.state.ui.characters_expanded = true;
    harness.sync();
    let last = harness.renderer.zone_cardinality(Zone::CharacterGrid) - 1;
    harness.click(Zone::CharacterGrid, 12);

    harness.click(Zone::CharacterToggle, 0);
    harness.run(Command::PrimaryMove(Direction::Next));
    assert_eq!(harness.focus(), Some((Zone::CharacterGrid, 0)));

    // Coming up from below ignores a remembered slot outside the bottom row.
    harness.click(Zone::CharacterGrid, 12);
    harness.click(Zone::ClearCharacters, 0);
    harness.run(Command::PrimaryMove(Direction::Previous));
    let (zone, index) = harness.focus().expect("focused");
    assert_eq!(zone, Zone::CharacterGrid);
    let bottom = harness.renderer.item_position(zone, last).expect("laid out").y;
    assert_eq!(harness.renderer.item_position(zone, index).expect("laid out").y, bottom);

    // A remembered slot on the bottom row is restored.
    harness.click(Zone::CharacterGrid, last);
    harness.click(Zone::ClearCharacters, 0);
    harness.run(Command::PrimaryMove(Direction::Previous));
    assert_eq!(harness.focus(), Some((Zone::CharacterGrid, last)));
}

#[rstest]
fn grid_navigation_skips_unavailable(mut harness: Harness) {
    harness.state.ui.characters_expanded = true;
    harness.pick_parent("stadium");
    let dva = harness.grid_index("dva");
    let junker_queen = harness.grid_index("junkerqueen");
    let reinhardt = harness.grid_index("reinhardt");

    harness.click(Zone::CharacterGrid, dva);
    harness.run(Command::SecondaryMove(Direction::Next));
    assert_eq!(harness.focus(), Some((Zone::CharacterGrid, junker_queen)));
    harness.run(Command::SecondaryMove(Direction::Previous));
    assert_eq!(harness.focus(), Some((Zone::CharacterGrid, dva)));

    harness.click(Zone::CharacterGrid, junker_queen);
    harness.run(Command::PrimaryMove(Direction::Next));
    assert_eq!(harness.focus(), Some((Zone::CharacterGrid, reinhardt)));

    let doomfist = harness.grid_index("doomfist");
    assert!(!Navigator::new(&mut harness.state, &mut harness.renderer)
        .on_direct_click(Zone::CharacterGrid, doomfist));
}

#[rstest]
fn grid_expansion_restores_and_snaps_remembered_index(mut harness: Harness) {
    harness.state.focus.last_grid_index = 7;
    harness.click(Zone::CharacterToggle, 0);
    harness.run(Command::ToggleCharacters);
    assert_eq!(harness.focus(), Some((Zone::CharacterGrid, 7)));

    // Roadhog is unavailable in the restricted mode; the cursor snaps to a neighbour.
    harness.pick_parent("stadium");
    let roadhog = harness.grid_index("roadhog");
    harness.state.ui.characters_expanded = false;
    harness.sync();
    harness.state.focus.last_grid_index = roadhog;
    harness.click(Zone::CharacterToggle, 0);
    harness.run(Command::ToggleCharacters);
    let (zone, index) = harness.focus().expect("focused");
    assert_eq!(zone, Zone::CharacterGrid);
    assert!(harness.renderer.item_available(zone, index));
}

#[rstest]
fn defocus_then_refocus_restores_without_activating(mut harness: Harness) {
    harness.click(Zone::ParentTypes, 2);
    harness.run(Command::Defocus);
    assert_eq!(harness.focus(), None);
    assert_eq!(harness.renderer.visual, None);

    harness.run(Command::Activate);
    assert_eq!(harness.focus(), Some((Zone::ParentTypes, 2)));
    assert_eq!(harness.state.selection.parent(), None);

    harness.run(Command::Defocus);
    harness.run(Command::SecondaryMove(Direction::Next));
    assert_eq!(harness.focus(), Some((Zone::ParentTypes, 2)));
    assert_eq!(harness.renderer.visual, Some((Zone::ParentTypes, 2)));
}

#[rstest]
fn refocus_redirects_when_remembered_zone_vanished(mut harness: Harness) {
    harness.pick_parent("competitive");
    harness.click(Zone::ChildTypes, 1);
    harness.run(Command::Defocus);
    harness.pick_parent("arcade");

    harness.run(Command::Refocus);
    assert_eq!(harness.focus(), Some((Zone::CharacterToggle, 0)));
}

#[rstest]
fn collapsing_match_types_moves_focus_off_vanished_zone(mut harness: Harness) {
    harness.pick_parent("arcade");
    harness.click(Zone::ParentTypes, 3);
    assert_eq!(harness.run(Command::ToggleMatchTypes), Activation::SectionToggled);
    assert!(!harness.state.ui.match_types_expanded);
    assert_eq!(harness.focus(), Some((Zone::Result, 0)));

    harness.run(Command::ToggleMatchTypes);
    assert_eq!(harness.focus(), Some((Zone::ParentTypes, 3)));
}

#[rstest]
fn collapsing_an_incomplete_match_type_still_lands_on_result(mut harness: Harness) {
    harness.click(Zone::ParentTypes, 1);
    harness.run(Command::Activate);
    assert_eq!(harness.focus(), Some((Zone::ChildTypes, 0)));
    assert!(!harness
        .state
        .selection
        .is_match_type_complete(&harness.state.catalog));

    harness.run(Command::ToggleMatchTypes);
    assert_eq!(harness.focus(), Some((Zone::Result, 0)));
}

#[rstest]
fn parent_hotkey_expands_and_advances(mut harness: Harness) {
    harness.state.ui.match_types_expanded = false;
    harness.sync();
    assert_eq!(harness.run(Command::SelectParentHotkey('2')), Activation::MatchTypeChanged);
    assert!(harness.state.ui.match_types_expanded);
    assert_eq!(harness.focus(), Some((Zone::ChildTypes, 0)));
    assert_eq!(harness.run(Command::SelectParentHotkey('9')), Activation::None);
}

#[rstest]
fn character_toggle_hotkey_enters_grid_and_collapse_goes_to_save(mut harness: Harness) {
    harness.pick_parent("arcade");
    harness.state.selection.set_result(Some(Outcome::Win));
    harness.sync();

    harness.run(Command::ToggleCharacters);
    assert_eq!(harness.focus(), Some((Zone::CharacterGrid, 0)));
    harness.run(Command::ToggleCharacters);
    assert_eq!(harness.focus(), Some((Zone::Save, 0)));
}

#[rstest]
fn clear_and_undo(mut harness: Harness) {
    assert_eq!(harness.run(Command::UndoLastMatch), Activation::None);

    harness.pick_parent("arcade");
    harness.state.selection.toggle_character(&ch("ana"), false);
    harness.state.selection.set_result(Some(Outcome::Draw));
    harness.sync();
    harness.click(Zone::Save, 0);
    let Activation::Saved(saved) = harness.run(Command::Activate) else {
        panic!("expected save");
    };

    harness.state.selection.toggle_character(&ch("mercy"), false);
    assert_eq!(harness.run(Command::ClearCharacters), Activation::SelectionChanged);
    assert!(harness.state.selection.characters().is_empty());

    assert_eq!(harness.run(Command::UndoLastMatch), Activation::Undone(saved));
    assert!(harness.state.log.is_empty());
}

#[rstest]
fn undo_targets_the_saved_match_after_a_newer_import(mut harness: Harness) {
    harness.pick_parent("arcade");
    harness.state.selection.set_result(Some(Outcome::Win));
    harness.sync();
    harness.click(Zone::Save, 0);
    let Activation::Saved(saved) = harness.run(Command::Activate) else {
        panic!("expected save");
    };

    let imported = MatchRecord {
        id: RecordId::new(saved.id.get() + 1000),
        result: Outcome::Loss,
        timestamp: saved.timestamp + Duration::days(1),
        ..saved.clone()
    };
    harness.state.log.merge_sorted(vec![imported.clone()]);
    assert_eq!(harness.state.log.all()[0].id, imported.id);

    assert_eq!(harness.run(Command::UndoLastMatch), Activation::Undone(saved));
    assert_eq!(harness.state.log.len(), 1);
    assert_eq!(harness.state.log.all()[0].id, imported.id);

    // Nothing saved is left to undo; the newest record goes next.
    assert_eq!(harness.run(Command::UndoLastMatch), Activation::Undone(imported));
    assert!(harness.state.log.is_empty());
}

#[rstest]
fn hiding_restricted_characters_keeps_focus_valid(mut harness: Harness) {
    harness.state.ui.characters_expanded = true;
    harness.state.settings.restriction_policy = RestrictionPolicy::Hide;
    harness.sync();
    let tracer = harness.grid_index("tracer");
    harness.click(Zone::CharacterGrid, tracer);

    harness.click(Zone::ParentTypes, 2);
    harness.run(Command::Activate);
    harness.click(Zone::CharacterToggle, 0);
    harness.run(Command::PrimaryMove(Direction::Next));
    let (zone, index) = harness.focus().expect("focused");
    assert_eq!(zone, Zone::CharacterGrid);
    assert!(index < harness.renderer.zone_cardinality(zone));
    assert!(harness.renderer.item_available(zone, index));
    assert!(harness.renderer.refreshes > 1);
}
