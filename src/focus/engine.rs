// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};

use crate::model::{truncate_to_millis, MatchRecord, MatchTypeId};
use crate::state::AppState;

use super::renderer::{ItemKey, Renderer};
use super::zone::{FocusState, Zone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

impl From<Direction> for Vertical {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Previous => Self::Up,
            Direction::Next => Self::Down,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    PrimaryMove(Direction),
    SecondaryMove(Direction),
    Activate,
    Defocus,
    Refocus,
    DirectClick { zone: Zone, index: usize },
    SelectParentHotkey(char),
    ToggleMatchTypes,
    ToggleCharacters,
    ClearCharacters,
    UndoLastMatch,
}

/// What a command changed beyond the cursor, so the caller knows what to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    None,
    SectionToggled,
    SelectionChanged,
    MatchTypeChanged,
    Saved(MatchRecord),
    Undone(MatchRecord),
}

/// Applies navigation commands to an [`AppState`] against a live [`Renderer`].
pub struct Navigator<'a, R: Renderer + ?Sized> {
    state: &'a mut AppState,
    renderer: &'a mut R,
    now: DateTime<Utc>,
}

impl<'a, R: Renderer + ?Sized> Navigator<'a, R> {
    pub fn new(state: &'a mut AppState, renderer: &'a mut R) -> Self {
        Self {
            state,
            renderer,
            now: Utc::now(),
        }
    }

    /// Pins the clock used for record ids and timestamps.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn focus(&self) -> &FocusState {
        &self.state.focus
    }

    pub fn dispatch(&mut self, command: Command) -> Activation {
        match command {
            Command::PrimaryMove(direction) => {
                self.on_primary_axis_move(direction);
                Activation::None
            }
            Command::SecondaryMove(direction) => {
                self.on_secondary_axis_move(direction);
                Activation::None
            }
            Command::Activate => self.activate(),
            Command::Defocus => {
                self.on_defocus();
                Activation::None
            }
            Command::Refocus => {
                self.on_refocus_request();
                Activation::None
            }
            Command::DirectClick { zone, index } => {
                self.on_direct_click(zone, index);
                Activation::None
            }
            Command::SelectParentHotkey(key) => self.select_parent_hotkey(key),
            Command::ToggleMatchTypes => self.toggle_match_types(),
            Command::ToggleCharacters => self.toggle_characters(),
            Command::ClearCharacters => self.clear_characters(),
            Command::UndoLastMatch => self.undo_last_match(),
        }
    }

    pub fn on_primary_axis_move(&mut self, direction: Direction) {
        let Some(zone) = self.state.focus.zone else {
            self.on_refocus_request();
            return;
        };
        if zone == Zone::CharacterGrid {
            self.grid_move(direction.into());
            return;
        }
        if let Some(target) = self.neighbour(zone, direction.into()) {
            self.enter_moving(target, direction);
        }
    }

    pub fn on_secondary_axis_move(&mut self, direction: Direction) {
        let Some(zone) = self.state.focus.zone else {
            self.on_refocus_request();
            return;
        };
        let count = self.renderer.zone_cardinality(zone);
        if count == 0 {
            return;
        }
        let index = self.state.focus.index.min(count - 1);

        let target = if zone == Zone::CharacterGrid {
            match direction {
                Direction::Previous => (0..index)
                    .rev()
                    .find(|&i| self.renderer.item_available(zone, i)),
                Direction::Next => (index + 1..count).find(|&i| self.renderer.item_available(zone, i)),
            }
        } else {
            match direction {
                Direction::Previous => Some(index.saturating_sub(1)),
                Direction::Next => Some((index + 1).min(count - 1)),
            }
        };

        if let Some(target) = target {
            self.apply(zone, target);
        }
    }

    /// Spatial movement inside the character grid.
    pub fn grid_move(&mut self, vertical: Vertical) {
        if self.state.focus.zone != Some(Zone::CharacterGrid) {
            return;
        }
        let zone = Zone::CharacterGrid;
        let index = self.state.focus.index;

        let best = self.renderer.item_position(zone, index).and_then(|here| {
            let mut best: Option<(usize, i64)> = None;
            for i in 0..self.renderer.zone_cardinality(zone) {
                if i == index || !self.renderer.item_available(zone, i) {
                    continue;
                }
                let Some(there) = self.renderer.item_position(zone, i) else {
                    continue;
                };
                let in_direction = match vertical {
                    Vertical::Up => there.y < here.y,
                    Vertical::Down => there.y > here.y,
                };
                if !in_direction {
                    continue;
                }
                let dy = i64::from(there.y.abs_diff(here.y));
                let dx = i64::from(there.x.abs_diff(here.x));
                let score = 1000 * dy + dx;
                if best.map_or(true, |(_, best_score)| score < best_score) {
                    best = Some((i, score));
                }
            }
            best.map(|(i, _)| i)
        });

        if let Some(target) = best {
            self.apply(zone, target);
            return;
        }

        self.state.focus.last_grid_index = index;
        let direction = match vertical {
            Vertical::Up => Direction::Previous,
            Vertical::Down => Direction::Next,
        };
        if let Some(target) = self.neighbour(zone, direction) {
            tracing::debug!(from = %zone, to = %target, "grid exit");
            self.enter_moving(target, direction);
        }
    }

    pub fn activate(&mut self) -> Activation {
        let Some(zone) = self.state.focus.zone else {
            self.on_refocus_request();
            return Activation::None;
        };
        let index = self.state.focus.index;

        match zone {
            Zone::MatchTypeToggle => self.toggle_match_types(),
            Zone::ParentTypes => match self.renderer.item_key(zone, index) {
                Some(ItemKey::Parent(id)) => self.pick_parent(&id),
                _ => Activation::None,
            },
            Zone::ChildTypes => match self.renderer.item_key(zone, index) {
                Some(ItemKey::Child(id)) => {
                    let catalog = &self.state.catalog;
                    if !self.state.selection.select_child(catalog, &id) {
                        return Activation::None;
                    }
                    self.refresh();
                    self.focus_default_target();
                    Activation::MatchTypeChanged
                }
                _ => Activation::None,
            },
            Zone::CharacterToggle => self.toggle_characters(),
            Zone::RecentCharacters | Zone::CharacterGrid => {
                if !self.renderer.item_available(zone, index) {
                    return Activation::None;
                }
                let Some(ItemKey::Character(id)) = self.renderer.item_key(zone, index) else {
                    return Activation::None;
                };
                let cap_one = self.state.caps_characters();
                self.state.selection.toggle_character(&id, cap_one);
                self.refresh();
                self.revalidate();
                Activation::SelectionChanged
            }
            Zone::ClearCharacters => self.clear_characters(),
            Zone::Result => {
                let Some(ItemKey::Outcome(outcome)) = self.renderer.item_key(zone, index) else {
                    return Activation::None;
                };
                if self.state.selection.result() == Some(outcome) {
                    self.state.selection.set_result(None);
                    self.refresh();
                    self.revalidate();
                } else {
                    self.state.selection.set_result(Some(outcome));
                    self.refresh();
                    if self.is_present(Zone::Save) {
                        self.apply(Zone::Save, 0);
                    } else {
                        self.revalidate();
                    }
                }
                Activation::SelectionChanged
            }
            Zone::Save => self.save(),
        }
    }

    pub fn on_defocus(&mut self) {
        if self.state.focus.zone.take().is_some() {
            tracing::debug!("defocus");
        }
        self.renderer.clear_focus_visual();
    }

    pub fn on_refocus_request(&mut self) {
        if self.state.focus.zone.is_some() {
            return;
        }
        let zone = self.state.focus.last_zone;
        if self.is_present(zone) {
            let index = self.state.focus.last_index;
            self.apply_clamped(zone, index);
            return;
        }
        if let Some(target) = self.nearest_present(zone) {
            self.enter(target);
        }
    }

    /// Focuses exactly the clicked slot; returns `false` when it cannot hold focus.
    pub fn on_direct_click(&mut self, zone: Zone, index: usize) -> bool {
        if !self.is_present(zone) || index >= self.renderer.zone_cardinality(zone) {
            return false;
        }
        if zone == Zone::CharacterGrid && !self.renderer.item_available(zone, index) {
            return false;
        }
        self.apply(zone, index);
        true
    }

    pub fn select_parent_hotkey(&mut self, key: char) -> Activation {
        let Some(id) = self
            .state
            .catalog
            .parent_for_hotkey(key)
            .map(|parent| parent.id().clone())
        else {
            return Activation::None;
        };
        self.state.ui.match_types_expanded = true;
        self.refresh();
        self.pick_parent(&id)
    }

    pub fn toggle_match_types(&mut self) -> Activation {
        self.state.ui.match_types_expanded = !self.state.ui.match_types_expanded;
        self.refresh();
        if self.state.ui.match_types_expanded {
            let index = self.selected_slot(Zone::ParentTypes).unwrap_or(0);
            if self.is_present(Zone::ParentTypes) {
                self.apply(Zone::ParentTypes, index);
            }
        } else if self.is_present(Zone::Result) {
            let index = self.selected_slot(Zone::Result).unwrap_or(0);
            self.apply(Zone::Result, index);
        } else {
            self.revalidate();
        }
        Activation::SectionToggled
    }

    pub fn toggle_characters(&mut self) -> Activation {
        if self.state.settings.always_show_all_characters {
            if self.is_present(Zone::CharacterGrid) {
                self.enter(Zone::CharacterGrid);
            }
            return Activation::None;
        }
        if !self.state.settings.show_characters {
            return Activation::None;
        }

        self.state.ui.characters_expanded = !self.state.ui.characters_expanded;
        self.refresh();
        if self.state.ui.characters_expanded && self.is_present(Zone::CharacterGrid) {
            self.enter(Zone::CharacterGrid);
        } else if !self.state.ui.characters_expanded && self.is_present(Zone::Save) {
            self.apply(Zone::Save, 0);
        } else if self.is_present(Zone::CharacterToggle) {
            self.apply(Zone::CharacterToggle, 0);
        } else {
            self.revalidate();
        }
        Activation::SectionToggled
    }

    pub fn clear_characters(&mut self) -> Activation {
        if self.state.selection.characters().is_empty() {
            return Activation::None;
        }
        self.state.selection.clear_characters();
        self.refresh();
        self.revalidate();
        Activation::SelectionChanged
    }

    pub fn undo_last_match(&mut self) -> Activation {
        let log = &mut self.state.log;
        let undone = self
            .state
            .last_saved
            .take()
            .and_then(|id| log.remove_by_id(id))
            .or_else(|| log.undo_last());
        let Some(record) = undone else {
            return Activation::None;
        };
        self.state.ui.history_page = 0;
        tracing::info!(id = %record.id, "undid last match");
        self.refresh();
        self.revalidate();
        Activation::Undone(record)
    }

    fn save(&mut self) -> Activation {
        let state = &mut *self.state;
        if !state.selection.is_complete(&state.catalog) {
            return Activation::None;
        }
        let (Some(parent), Some(result)) = (state.selection.parent(), state.selection.result())
        else {
            return Activation::None;
        };

        let record = MatchRecord {
            id: state.log.next_record_id(self.now),
            parent: parent.clone(),
            child: state.selection.child().cloned(),
            result,
            characters: state.selection.characters().to_vec(),
            timestamp: truncate_to_millis(self.now),
            session: Some(state.session.id()),
        };
        state.log.append(record.clone());
        state.last_saved = Some(record.id);
        state
            .recent
            .record_played(&record.characters, state.settings.recent_characters_count);
        state.selection.reset_after_save(
            state.settings.remember_characters,
            state.settings.remember_match_type,
        );
        if state.settings.auto_collapse_characters {
            state.ui.characters_expanded = false;
        }
        if state.settings.auto_collapse_match_type {
            state.ui.match_types_expanded = false;
        }
        state.ui.history_page = 0;
        tracing::info!(
            id = %record.id,
            parent = %record.parent,
            result = %record.result,
            characters = record.characters.len(),
            "saved match"
        );

        self.refresh();
        if self.is_present(Zone::Result) {
            self.apply(Zone::Result, 0);
        } else {
            self.revalidate();
        }
        Activation::Saved(record)
    }

    fn pick_parent(&mut self, id: &MatchTypeId) -> Activation {
        let cap_one = self.state.caps_characters_for(id);
        let catalog = &self.state.catalog;
        if !self.state.selection.select_parent(catalog, id, cap_one) {
            return Activation::None;
        }
        self.refresh();
        let has_children = self
            .state
            .catalog
            .parent(id.as_str())
            .is_some_and(|parent| !parent.is_leaf());
        if has_children && self.is_present(Zone::ChildTypes) {
            self.apply(Zone::ChildTypes, 0);
        } else {
            self.focus_default_target();
        }
        Activation::MatchTypeChanged
    }

    /// Where focus lands once the match type is complete.
    fn focus_default_target(&mut self) {
        if self.is_present(Zone::RecentCharacters) {
            let index = self.selected_slot(Zone::RecentCharacters).unwrap_or(0);
            self.apply(Zone::RecentCharacters, index);
            return;
        }
        if self.is_present(Zone::CharacterGrid) {
            let zone = Zone::CharacterGrid;
            let index = self
                .selected_slot(zone)
                .filter(|&i| self.renderer.item_available(zone, i))
                .or_else(|| self.first_available(zone));
            if let Some(index) = index {
                self.apply(zone, index);
                return;
            }
        }
        if self.is_present(Zone::CharacterToggle) {
            self.apply(Zone::CharacterToggle, 0);
            return;
        }
        if self.is_present(Zone::Result) {
            let index = self.selected_slot(Zone::Result).unwrap_or(0);
            self.apply(Zone::Result, index);
            return;
        }
        self.revalidate();
    }

    /// First slot of `zone` holding something that is part of the selection.
    fn selected_slot(&self, zone: Zone) -> Option<usize> {
        let selection = &self.state.selection;
        (0..self.renderer.zone_cardinality(zone)).find(|&i| {
            match self.renderer.item_key(zone, i) {
                Some(ItemKey::Parent(id)) => selection.parent() == Some(&id),
                Some(ItemKey::Child(id)) => selection.child() == Some(&id),
                Some(ItemKey::Character(id)) => selection.has_character(id.as_str()),
                Some(ItemKey::Outcome(outcome)) => selection.result() == Some(outcome),
                _ => false,
            }
        })
    }

    fn first_available(&self, zone: Zone) -> Option<usize> {
        (0..self.renderer.zone_cardinality(zone)).find(|&i| self.renderer.item_available(zone, i))
    }

    fn is_present(&self, zone: Zone) -> bool {
        if !self.renderer.zone_exists(zone) {
            return false;
        }
        let count = self.renderer.zone_cardinality(zone);
        if count == 0 {
            return false;
        }
        match zone {
            Zone::Save => self.state.selection.is_complete(&self.state.catalog),
            Zone::CharacterGrid => (0..count).any(|i| self.renderer.item_available(zone, i)),
            _ => true,
        }
    }

    fn neighbour(&self, zone: Zone, direction: Direction) -> Option<Zone> {
        match direction {
            Direction::Previous => zone.above().find(|&z| self.is_present(z)),
            Direction::Next => zone.below().find(|&z| self.is_present(z)),
        }
    }

    /// Nearest present zone other than `zone`, searching downward first.
    fn nearest_present(&self, zone: Zone) -> Option<Zone> {
        self.neighbour(zone, Direction::Next)
            .or_else(|| self.neighbour(zone, Direction::Previous))
    }

    /// Moves into `zone` from outside; the grid resumes at its remembered slot.
    fn enter(&mut self, zone: Zone) {
        let index = if zone == Zone::CharacterGrid {
            self.state.focus.last_grid_index
        } else {
            0
        };
        self.apply_clamped(zone, index);
    }

    /// Moves into `zone` along the primary axis. The grid is entered on the row facing the move:
    /// its first item from above, the remembered item (or the row's first) from below.
    fn enter_moving(&mut self, zone: Zone, direction: Direction) {
        if zone != Zone::CharacterGrid {
            self.enter(zone);
            return;
        }
        let remembered = self.state.focus.last_grid_index;
        match self.grid_edge_slot(direction, remembered) {
            Some(index) => self.apply(zone, index),
            None => self.enter(zone),
        }
    }

    fn grid_edge_slot(&self, direction: Direction, remembered: usize) -> Option<usize> {
        let zone = Zone::CharacterGrid;
        let slots: Vec<(usize, i32)> = (0..self.renderer.zone_cardinality(zone))
            .filter(|&i| self.renderer.item_available(zone, i))
            .filter_map(|i| self.renderer.item_position(zone, i).map(|at| (i, at.y)))
            .collect();
        let rows = slots.iter().map(|&(_, y)| y);
        let edge = match direction {
            Direction::Next => rows.min(),
            Direction::Previous => rows.max(),
        }?;
        let mut on_edge = slots.iter().filter(|&&(_, y)| y == edge).map(|&(i, _)| i);
        match direction {
            Direction::Next => on_edge.next(),
            Direction::Previous => {
                let row: Vec<usize> = on_edge.collect();
                row.iter()
                    .copied()
                    .find(|&i| i == remembered)
                    .or_else(|| row.first().copied())
            }
        }
    }

    fn apply_clamped(&mut self, zone: Zone, index: usize) {
        let count = self.renderer.zone_cardinality(zone);
        if count == 0 {
            return;
        }
        let mut index = index.min(count - 1);
        if zone == Zone::CharacterGrid && !self.renderer.item_available(zone, index) {
            match self.nearest_available(zone, index) {
                Some(available) => index = available,
                None => return,
            }
        }
        self.apply(zone, index);
    }

    /// Closest available slot by index distance, later slots winning ties.
    fn nearest_available(&self, zone: Zone, index: usize) -> Option<usize> {
        let count = self.renderer.zone_cardinality(zone);
        (1..count).find_map(|distance| {
            let after = index + distance;
            if after < count && self.renderer.item_available(zone, after) {
                return Some(after);
            }
            let before = index.checked_sub(distance)?;
            self.renderer.item_available(zone, before).then_some(before)
        })
    }

    fn apply(&mut self, zone: Zone, index: usize) {
        let focus = &mut self.state.focus;
        if focus.zone != Some(zone) || focus.index != index {
            tracing::debug!(zone = %zone, index, "focus");
        }
        focus.zone = Some(zone);
        focus.index = index;
        focus.last_zone = zone;
        focus.last_index = index;
        if zone == Zone::CharacterGrid {
            focus.last_grid_index = index;
        }
        self.renderer.set_focus_visual(zone, index);
    }

    fn refresh(&mut self) {
        self.renderer.refresh(self.state);
    }

    /// Re-establishes a valid cursor after the shape changed underneath it.
    pub fn revalidate(&mut self) {
        let Some(zone) = self.state.focus.zone else {
            return;
        };
        if !self.is_present(zone) {
            match self.nearest_present(zone) {
                Some(target) => self.enter(target),
                None => self.on_defocus(),
            }
            return;
        }
        let index = self.state.focus.index;
        self.apply_clamped(zone, index);
    }
}
