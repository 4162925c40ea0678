// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Zone contents derived from [`AppState`], independent of any concrete layout.
//!
//! Renderers lay these items out; the navigator only sees them through [`super::Renderer`].

use crate::model::{Outcome, Role};
use crate::state::AppState;

use super::renderer::ItemKey;
use super::zone::Zone;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceItem {
    pub key: ItemKey,
    pub label: String,
    /// Unavailable items are drawn dimmed and cannot be activated.
    pub available: bool,
    /// Part of the current selection.
    pub active: bool,
    /// Grid items start a new row whenever the role changes.
    pub role: Option<Role>,
}

impl SurfaceItem {
    fn new(key: ItemKey, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            available: true,
            active: false,
            role: None,
        }
    }

    fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

/// A zone with no items does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    zones: [Vec<SurfaceItem>; Zone::COUNT],
}

impl Surface {
    pub fn derive(state: &AppState) -> Self {
        let mut surface = Self::default();
        let selection = &state.selection;

        let arrow = if state.ui.match_types_expanded { "▲" } else { "▼" };
        let toggle_label = match state.match_type_label() {
            Some(label) => format!("Match Type: {label} {arrow}"),
            None => format!("Select Match Type {arrow}"),
        };
        surface.zones[Zone::MatchTypeToggle.position()]
            .push(SurfaceItem::new(ItemKey::MatchTypeToggle, toggle_label));

        if state.ui.match_types_expanded {
            for parent in state.catalog.match_types() {
                let label = match parent.hotkey() {
                    Some(key) => format!("{key} {}", parent.label()),
                    None => parent.label().to_owned(),
                };
                let active = selection.parent() == Some(parent.id());
                surface.zones[Zone::ParentTypes.position()].push(
                    SurfaceItem::new(ItemKey::Parent(parent.id().clone()), label).active(active),
                );
            }
        }

        if state.child_types_shown() {
            let children = selection
                .parent()
                .and_then(|id| state.catalog.parent(id.as_str()))
                .map(|parent| parent.children())
                .unwrap_or_default();
            for child in children {
                let active = selection.child() == Some(child.id());
                surface.zones[Zone::ChildTypes.position()].push(
                    SurfaceItem::new(ItemKey::Child(child.id().clone()), child.label())
                        .active(active),
                );
            }
        }

        if state.character_toggle_shown() {
            let arrow = if state.ui.characters_expanded { "▲" } else { "▼" };
            let label = match selection.characters().len() {
                0 => format!("Add Characters (Optional) {arrow}"),
                n => format!("Characters ({n}) {arrow}"),
            };
            surface.zones[Zone::CharacterToggle.position()]
                .push(SurfaceItem::new(ItemKey::CharacterToggle, label));
        }

        for character in state.displayed_recent() {
            surface.zones[Zone::RecentCharacters.position()].push(
                SurfaceItem::new(
                    ItemKey::Character(character.id().clone()),
                    character.display_name(),
                )
                .active(selection.has_character(character.id().as_str()))
                .available(state.character_available(character)),
            );
        }

        if state.character_grid_shown() {
            for character in state.catalog.characters_by_role() {
                if !state.character_visible(character) {
                    continue;
                }
                let mut item = SurfaceItem::new(
                    ItemKey::Character(character.id().clone()),
                    character.display_name(),
                )
                .active(selection.has_character(character.id().as_str()))
                .available(state.character_available(character));
                item.role = Some(character.role());
                surface.zones[Zone::CharacterGrid.position()].push(item);
            }
            surface.zones[Zone::ClearCharacters.position()]
                .push(SurfaceItem::new(ItemKey::ClearCharacters, "Clear Characters"));
        }

        for outcome in Outcome::ALL {
            if outcome == Outcome::Draw && !state.settings.show_draw {
                continue;
            }
            surface.zones[Zone::Result.position()].push(
                SurfaceItem::new(
                    ItemKey::Outcome(outcome),
                    outcome.label(state.settings.outcome_style_text),
                )
                .active(selection.result() == Some(outcome)),
            );
        }

        let complete = selection.is_complete(&state.catalog);
        surface.zones[Zone::Save.position()]
            .push(SurfaceItem::new(ItemKey::Save, "Save Match").available(complete));

        surface
    }

    pub fn items(&self, zone: Zone) -> &[SurfaceItem] {
        &self.zones[zone.position()]
    }

    pub fn item(&self, zone: Zone, index: usize) -> Option<&SurfaceItem> {
        self.items(zone).get(index)
    }

    pub fn exists(&self, zone: Zone) -> bool {
        !self.items(zone).is_empty()
    }
}
