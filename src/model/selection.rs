// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::ids::{CharacterId, MatchTypeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Win, Outcome::Loss, Outcome::Draw];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Draw => "draw",
        }
    }

    /// Button label; `styled` switches to the in-game Victory/Defeat wording.
    pub fn label(self, styled: bool) -> &'static str {
        match (self, styled) {
            (Self::Win, false) => "Win",
            (Self::Loss, false) => "Loss",
            (Self::Draw, false) => "Draw",
            (Self::Win, true) => "Victory",
            (Self::Loss, true) => "Defeat",
            (Self::Draw, true) => "Draw",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcomeError(pub String);

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown result {:?} (expected win, loss, or draw)", self.0)
    }
}

impl std::error::Error for ParseOutcomeError {}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" | "victory" => Ok(Self::Win),
            "loss" | "defeat" => Ok(Self::Loss),
            "draw" => Ok(Self::Draw),
            _ => Err(ParseOutcomeError(s.to_owned())),
        }
    }
}

/// What the user has currently picked for the next match record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    parent: Option<MatchTypeId>,
    child: Option<MatchTypeId>,
    result: Option<Outcome>,
    characters: Vec<CharacterId>,
}

impl Selection {
    pub fn parent(&self) -> Option<&MatchTypeId> {
        self.parent.as_ref()
    }

    pub fn child(&self) -> Option<&MatchTypeId> {
        self.child.as_ref()
    }

    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    pub fn characters(&self) -> &[CharacterId] {
        &self.characters
    }

    pub fn has_character(&self, id: &str) -> bool {
        self.characters.iter().any(|c| c.as_str() == id)
    }

    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        self.is_match_type_complete(catalog) && self.result.is_some()
    }

    /// Parent picked and, when it has children, a child picked too.
    pub fn is_match_type_complete(&self, catalog: &Catalog) -> bool {
        let Some(parent) = self.parent.as_ref().and_then(|id| catalog.parent(id.as_str())) else {
            return false;
        };
        parent.is_leaf() || self.child.is_some()
    }

    /// Picks a parent, resetting child and result.
    ///
    /// With `cap_one` the character set is trimmed to its first entry.
    pub fn select_parent(&mut self, catalog: &Catalog, id: &MatchTypeId, cap_one: bool) -> bool {
        if catalog.parent(id.as_str()).is_none() {
            return false;
        }
        self.parent = Some(id.clone());
        self.child = None;
        self.result = None;
        if cap_one {
            self.characters.truncate(1);
        }
        true
    }

    pub fn select_child(&mut self, catalog: &Catalog, id: &MatchTypeId) -> bool {
        let Some(parent) = self.parent.as_ref() else {
            return false;
        };
        if catalog.child(parent.as_str(), id.as_str()).is_none() {
            return false;
        }
        self.child = Some(id.clone());
        true
    }

    /// Restores a remembered match type without touching result or characters.
    pub fn restore_match_type(
        &mut self,
        catalog: &Catalog,
        parent: &MatchTypeId,
        child: Option<&MatchTypeId>,
    ) -> bool {
        let Some(node) = catalog.parent(parent.as_str()) else {
            return false;
        };
        self.parent = Some(parent.clone());
        self.child = child
            .filter(|child| node.child(child.as_str()).is_some())
            .cloned();
        true
    }

    pub fn set_result(&mut self, result: Option<Outcome>) {
        self.result = result;
    }

    /// Adds or removes `id`; at the cap of one a new id replaces the existing entry.
    pub fn toggle_character(&mut self, id: &CharacterId, cap_one: bool) {
        if let Some(pos) = self.characters.iter().position(|c| c == id) {
            self.characters.remove(pos);
            return;
        }
        if cap_one {
            self.characters.clear();
        }
        self.characters.push(id.clone());
    }

    pub fn clear_characters(&mut self) {
        self.characters.clear();
    }

    pub fn reset_after_save(&mut self, remember_characters: bool, remember_match_type: bool) {
        self.result = None;
        if !remember_characters {
            self.characters.clear();
        }
        if !remember_match_type {
            self.parent = None;
            self.child = None;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
