// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The single owned aggregate every interaction reads and mutates.

use chrono::{DateTime, Utc};

use crate::focus::FocusState;
use crate::model::{
    Catalog, Character, LogScope, MatchLog, MatchTypeId, RecentCharacters, RecordId,
    RestrictionPolicy, Selection, Session, Settings,
};

/// Transient presentation state that is not part of the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiFlags {
    pub match_types_expanded: bool,
    pub characters_expanded: bool,
    pub stats_view: LogScope,
    pub history_view: LogScope,
    /// Zero-based page of the match history panel.
    pub history_page: usize,
}

impl Default for UiFlags {
    fn default() -> Self {
        Self {
            match_types_expanded: true,
            characters_expanded: false,
            stats_view: LogScope::AllTime,
            history_view: LogScope::AllTime,
            history_page: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub selection: Selection,
    pub focus: FocusState,
    pub settings: Settings,
    pub log: MatchLog,
    pub recent: RecentCharacters,
    pub session: Session,
    pub ui: UiFlags,
    /// Record saved most recently in this run; undo targets it before the newest record.
    pub last_saved: Option<RecordId>,
}

impl AppState {
    pub fn new(catalog: Catalog, settings: Settings, session_start: DateTime<Utc>) -> Self {
        Self {
            catalog,
            selection: Selection::default(),
            focus: FocusState::default(),
            settings,
            log: MatchLog::default(),
            recent: RecentCharacters::default(),
            session: Session::starting_at(session_start),
            ui: UiFlags::default(),
            last_saved: None,
        }
    }

    /// Whether the selected parent restricts which characters can be played.
    pub fn restricted_mode(&self) -> bool {
        self.selection
            .parent()
            .and_then(|id| self.catalog.parent(id.as_str()))
            .is_some_and(|parent| parent.restricts_characters())
    }

    /// Whether picking `parent` would cap the character set to one entry.
    pub fn caps_characters_for(&self, parent: &MatchTypeId) -> bool {
        self.settings.limit_restricted_selection
            && self
                .catalog
                .parent(parent.as_str())
                .is_some_and(|parent| parent.restricts_characters())
    }

    pub fn caps_characters(&self) -> bool {
        self.settings.limit_restricted_selection && self.restricted_mode()
    }

    pub fn character_available(&self, character: &Character) -> bool {
        !(character.is_mode_restricted()
            && self.restricted_mode()
            && self.settings.restriction_policy != RestrictionPolicy::None)
    }

    pub fn character_visible(&self, character: &Character) -> bool {
        !(character.is_mode_restricted()
            && self.restricted_mode()
            && self.settings.restriction_policy == RestrictionPolicy::Hide)
    }

    /// The collapsible toggle only exists when the grid is not pinned open.
    pub fn character_toggle_shown(&self) -> bool {
        self.settings.show_characters && !self.settings.always_show_all_characters
    }

    pub fn character_grid_shown(&self) -> bool {
        self.settings.show_characters
            && (self.settings.always_show_all_characters || self.ui.characters_expanded)
    }

    pub fn child_types_shown(&self) -> bool {
        self.ui.match_types_expanded
            && self
                .selection
                .parent()
                .and_then(|id| self.catalog.parent(id.as_str()))
                .is_some_and(|parent| !parent.is_leaf())
    }

    /// Characters shown in the recent row, backfilled when restricted ones are hidden.
    pub fn displayed_recent(&self) -> Vec<&Character> {
        if !self.settings.show_characters {
            return Vec::new();
        }
        let backfill = self.restricted_mode()
            && self.settings.restriction_policy == RestrictionPolicy::Hide;
        self.recent
            .displayed(self.settings.recent_characters_count, backfill, |id| {
                self.catalog
                    .character(id.as_str())
                    .is_some_and(|character| self.character_visible(character))
            })
            .into_iter()
            .filter_map(|id| self.catalog.character(id.as_str()))
            .collect()
    }

    pub fn match_type_label(&self) -> Option<String> {
        let parent = self.selection.parent()?;
        Some(self.catalog.match_type_label(
            parent.as_str(),
            self.selection.child().map(|child| child.as_str()),
        ))
    }
}
