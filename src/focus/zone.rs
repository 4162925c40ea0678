// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// A focusable region, listed top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    MatchTypeToggle,
    ParentTypes,
    ChildTypes,
    CharacterToggle,
    RecentCharacters,
    CharacterGrid,
    ClearCharacters,
    Result,
    Save,
}

impl Zone {
    pub const COUNT: usize = 9;

    pub const ORDER: [Zone; Zone::COUNT] = [
        Zone::MatchTypeToggle,
        Zone::ParentTypes,
        Zone::ChildTypes,
        Zone::CharacterToggle,
        Zone::RecentCharacters,
        Zone::CharacterGrid,
        Zone::ClearCharacters,
        Zone::Result,
        Zone::Save,
    ];

    pub fn position(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MatchTypeToggle => "match-type-toggle",
            Self::ParentTypes => "parent-types",
            Self::ChildTypes => "child-types",
            Self::CharacterToggle => "character-toggle",
            Self::RecentCharacters => "recent-characters",
            Self::CharacterGrid => "character-grid",
            Self::ClearCharacters => "clear-characters",
            Self::Result => "result",
            Self::Save => "save",
        }
    }

    /// Zones after this one, nearest first.
    pub fn below(self) -> impl Iterator<Item = Zone> {
        Self::ORDER.into_iter().skip(self.position() + 1)
    }

    /// Zones before this one, nearest first.
    pub fn above(self) -> impl Iterator<Item = Zone> {
        Self::ORDER.into_iter().take(self.position()).rev()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The cursor. `zone == None` means defocused; the `last_*` fields survive that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusState {
    pub zone: Option<Zone>,
    pub index: usize,
    pub last_zone: Zone,
    pub last_index: usize,
    pub last_grid_index: usize,
}

impl Default for FocusState {
    fn default() -> Self {
        Self {
            zone: None,
            index: 0,
            last_zone: Zone::ParentTypes,
            last_index: 0,
            last_grid_index: 0,
        }
    }
}

impl FocusState {
    pub fn is_on(&self, zone: Zone, index: usize) -> bool {
        self.zone == Some(zone) && self.index == index
    }
}
