// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{CharacterId, MatchTypeId, Outcome};
use crate::state::AppState;

use super::zone::Zone;

/// Rendered location of an item; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPosition {
    pub x: i32,
    pub y: i32,
}

/// What sits at a `(zone, index)` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKey {
    MatchTypeToggle,
    Parent(MatchTypeId),
    Child(MatchTypeId),
    CharacterToggle,
    Character(CharacterId),
    ClearCharacters,
    Outcome(Outcome),
    Save,
}

/// The view the navigator queries for the live shape of the interface.
///
/// `refresh` is called after every state mutation; all other queries answer for the shape
/// produced by the most recent refresh.
pub trait Renderer {
    fn refresh(&mut self, state: &AppState);

    fn zone_exists(&self, zone: Zone) -> bool;

    fn zone_cardinality(&self, zone: Zone) -> usize;

    fn item_position(&self, zone: Zone, index: usize) -> Option<ItemPosition>;

    fn item_available(&self, zone: Zone, index: usize) -> bool;

    fn item_key(&self, zone: Zone, index: usize) -> Option<ItemKey>;

    fn set_focus_visual(&mut self, zone: Zone, index: usize);

    fn clear_focus_visual(&mut self);
}
