// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::catalog::Catalog;
use super::ids::CharacterId;

/// Most-recently-played characters, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentCharacters {
    ids: Vec<CharacterId>,
}

impl RecentCharacters {
    /// History kept beyond what is displayed so hidden entries can be backfilled.
    pub const MIN_HISTORY: usize = 8;

    /// Keeps known ids only, first occurrence wins.
    pub fn from_ids(ids: impl IntoIterator<Item = CharacterId>, catalog: &Catalog) -> Self {
        let mut recent = Self::default();
        for id in ids {
            if catalog.character(id.as_str()).is_some() && !recent.ids.contains(&id) {
                recent.ids.push(id);
            }
        }
        recent
    }

    pub fn ids(&self) -> &[CharacterId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Moves each played character to the front, in order, so the last one ends up first.
    pub fn record_played(&mut self, played: &[CharacterId], display_count: usize) {
        if played.is_empty() {
            return;
        }
        for id in played {
            self.ids.retain(|existing| existing != id);
            self.ids.insert(0, id.clone());
        }
        self.ids.truncate(display_count.max(Self::MIN_HISTORY));
    }

    /// The characters shown in the recent row.
    ///
    /// With `backfill` the whole history is scanned for entries passing `visible` so hidden
    /// characters do not leave the row short; otherwise the first `count` entries are shown.
    pub fn displayed<'a>(
        &'a self,
        count: usize,
        backfill: bool,
        mut visible: impl FnMut(&CharacterId) -> bool,
    ) -> Vec<&'a CharacterId> {
        if backfill {
            self.ids.iter().filter(|id| visible(*id)).take(count).collect()
        } else {
            self.ids.iter().take(count).collect()
        }
    }
}
