// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User preferences.
//!
//! Stored as a flat camelCase JSON object. Loading merges whatever is stored over the defaults
//! one key at a time so older and newer files both load.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionAutoReset {
    Manual,
    #[default]
    Daily,
    #[serde(rename = "onlaunch")]
    OnLaunch,
}

/// How characters unavailable in a restricting match type are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionPolicy {
    /// Every character stays selectable.
    None,
    /// Shown but skipped by navigation and ignored on activation.
    #[default]
    Dim,
    /// Not rendered at all.
    Hide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: ThemePreference,
    pub auto_collapse_match_type: bool,
    #[serde(rename = "autoCollapseHero")]
    pub auto_collapse_characters: bool,
    #[serde(rename = "rememberHeroSelection")]
    pub remember_characters: bool,
    pub remember_match_type: bool,
    #[serde(rename = "recentHeroesCount")]
    pub recent_characters_count: usize,
    pub keyboard_shortcuts_enabled: bool,
    #[serde(rename = "wasdEnabled")]
    pub navigation_keys_enabled: bool,
    pub number_keys_enabled: bool,
    pub hotkeys_enabled: bool,
    pub session_auto_reset: SessionAutoReset,
    #[serde(rename = "useOwStyleText")]
    pub outcome_style_text: bool,
    pub show_match_saved_notification: bool,
    pub show_session_notification: bool,
    #[serde(rename = "showDrawButton")]
    pub show_draw: bool,
    #[serde(rename = "limitStadiumHeroSelection")]
    pub limit_restricted_selection: bool,
    #[serde(rename = "disableNonStadiumHeroes")]
    pub restriction_policy: RestrictionPolicy,
    #[serde(rename = "alwaysShowAllHeroes")]
    pub always_show_all_characters: bool,
    #[serde(rename = "showHeroes")]
    pub show_characters: bool,
    pub matches_per_page: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::Auto,
            auto_collapse_match_type: true,
            auto_collapse_characters: true,
            remember_characters: false,
            remember_match_type: true,
            recent_characters_count: 4,
            keyboard_shortcuts_enabled: true,
            navigation_keys_enabled: true,
            number_keys_enabled: true,
            hotkeys_enabled: true,
            session_auto_reset: SessionAutoReset::Daily,
            outcome_style_text: false,
            show_match_saved_notification: true,
            show_session_notification: true,
            show_draw: false,
            limit_restricted_selection: true,
            restriction_policy: RestrictionPolicy::Dim,
            always_show_all_characters: false,
            show_characters: true,
            matches_per_page: 10,
        }
    }
}

/// Outcome of merging a stored settings object over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsMerge {
    /// Keys present with a value of the wrong shape; their defaults were kept.
    pub rejected: Vec<String>,
    /// Keys this version does not know.
    pub ignored: Vec<String>,
}

impl Settings {
    pub const MATCHES_PER_PAGE_CHOICES: [usize; 4] = [5, 10, 25, 50];
    pub const MAX_RECENT_CHARACTERS: usize = 8;

    /// Merges `value` over the defaults. A non-object value yields plain defaults.
    pub fn merged_over_defaults(value: &Value) -> (Self, SettingsMerge) {
        let mut settings = Self::default();
        let mut merge = SettingsMerge::default();
        let Some(map) = value.as_object() else {
            return (settings, merge);
        };
        settings.merge_from(map, &mut merge);
        (settings, merge)
    }

    fn merge_from(&mut self, map: &Map<String, Value>, merge: &mut SettingsMerge) {
        for (key, value) in map {
            let accepted = match key.as_str() {
                "theme" => take(value, &mut self.theme),
                "autoCollapseMatchType" => take(value, &mut self.auto_collapse_match_type),
                "autoCollapseHero" => take(value, &mut self.auto_collapse_characters),
                "rememberHeroSelection" => take(value, &mut self.remember_characters),
                "rememberMatchType" => take(value, &mut self.remember_match_type),
                "recentHeroesCount" => take(value, &mut self.recent_characters_count),
                "keyboardShortcutsEnabled" => take(value, &mut self.keyboard_shortcuts_enabled),
                "wasdEnabled" => take(value, &mut self.navigation_keys_enabled),
                "numberKeysEnabled" => take(value, &mut self.number_keys_enabled),
                "hotkeysEnabled" => take(value, &mut self.hotkeys_enabled),
                "sessionAutoReset" => take(value, &mut self.session_auto_reset),
                "useOwStyleText" => take(value, &mut self.outcome_style_text),
                "showMatchSavedNotification" => {
                    take(value, &mut self.show_match_saved_notification)
                }
                "showSessionNotification" => take(value, &mut self.show_session_notification),
                "showDrawButton" => take(value, &mut self.show_draw),
                "limitStadiumHeroSelection" => take(value, &mut self.limit_restricted_selection),
                "disableNonStadiumHeroes" => take(value, &mut self.restriction_policy),
                "alwaysShowAllHeroes" => take(value, &mut self.always_show_all_characters),
                "showHeroes" => take(value, &mut self.show_characters),
                "matchesPerPage" => take(value, &mut self.matches_per_page),
                _ => {
                    merge.ignored.push(key.clone());
                    continue;
                }
            };
            if !accepted {
                merge.rejected.push(key.clone());
            }
        }
        self.recent_characters_count = self.recent_characters_count.min(Self::MAX_RECENT_CHARACTERS);
        if self.matches_per_page == 0 {
            self.matches_per_page = Self::default().matches_per_page;
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Cycles the page size through the offered choices.
    pub fn next_matches_per_page(&self) -> usize {
        let choices = Self::MATCHES_PER_PAGE_CHOICES;
        let pos = choices.iter().position(|&n| n == self.matches_per_page);
        match pos {
            Some(pos) => choices[(pos + 1) % choices.len()],
            None => choices[0],
        }
    }
}

fn take<T: DeserializeOwned>(value: &Value, slot: &mut T) -> bool {
    match T::deserialize(value) {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(_) => false,
    }
}
