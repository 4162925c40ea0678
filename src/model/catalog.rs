// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Static match-type and character taxonomy.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{CharacterId, IdError, MatchTypeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tank,
    Damage,
    Support,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Tank, Role::Damage, Role::Support];

    pub fn label(self) -> &'static str {
        match self {
            Self::Tank => "Tank",
            Self::Damage => "Damage",
            Self::Support => "Support",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTypeNode {
    id: MatchTypeId,
    label: String,
    display_label: Option<String>,
    hotkey: Option<char>,
    children: Vec<MatchTypeNode>,
    restricts_characters: bool,
}

impl MatchTypeNode {
    pub fn new(id: MatchTypeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            display_label: None,
            hotkey: None,
            children: Vec::new(),
            restricts_characters: false,
        }
    }

    pub fn with_hotkey(mut self, hotkey: char) -> Self {
        self.hotkey = Some(hotkey);
        self
    }

    pub fn with_display_label(mut self, display_label: impl Into<String>) -> Self {
        self.display_label = Some(display_label.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MatchTypeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn restricting_characters(mut self) -> Self {
        self.restricts_characters = true;
        self
    }

    pub fn id(&self) -> &MatchTypeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn display_label(&self) -> Option<&str> {
        self.display_label.as_deref()
    }

    pub fn hotkey(&self) -> Option<char> {
        self.hotkey
    }

    pub fn children(&self) -> &[MatchTypeNode] {
        &self.children
    }

    /// A node without children is a complete match type on its own.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn restricts_characters(&self) -> bool {
        self.restricts_characters
    }

    pub fn child(&self, id: &str) -> Option<&MatchTypeNode> {
        self.children.iter().find(|child| child.id.as_str() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    id: CharacterId,
    display_name: String,
    role: Role,
    mode_restricted: bool,
}

impl Character {
    pub fn new(id: CharacterId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role,
            mode_restricted: false,
        }
    }

    pub fn mode_restricted(mut self) -> Self {
        self.mode_restricted = true;
        self
    }

    pub fn id(&self) -> &CharacterId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Unavailable while a match type that restricts characters is selected.
    pub fn is_mode_restricted(&self) -> bool {
        self.mode_restricted
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    InvalidId { value: String, source: IdError },
    DuplicateMatchType(MatchTypeId),
    DuplicateChild { parent: MatchTypeId, child: MatchTypeId },
    NestedChildren { parent: MatchTypeId, child: MatchTypeId },
    DuplicateHotkey(char),
    DuplicateCharacter(CharacterId),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { value, source } => write!(f, "invalid catalog id {value:?}: {source}"),
            Self::DuplicateMatchType(id) => write!(f, "duplicate match type {id}"),
            Self::DuplicateChild { parent, child } => {
                write!(f, "duplicate child {child} under {parent}")
            }
            Self::NestedChildren { parent, child } => {
                write!(f, "child {child} of {parent} must not have children")
            }
            Self::DuplicateHotkey(key) => write!(f, "duplicate parent hotkey {key:?}"),
            Self::DuplicateCharacter(id) => write!(f, "duplicate character {id}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidId { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Read-only taxonomy consulted by selection, focus, and import validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    match_types: Vec<MatchTypeNode>,
    characters: Vec<Character>,
}

impl Catalog {
    pub fn new(
        match_types: Vec<MatchTypeNode>,
        characters: Vec<Character>,
    ) -> Result<Self, CatalogError> {
        let mut parent_ids = BTreeSet::new();
        let mut hotkeys = BTreeSet::new();
        for parent in &match_types {
            if !parent_ids.insert(parent.id.clone()) {
                return Err(CatalogError::DuplicateMatchType(parent.id.clone()));
            }
            if let Some(key) = parent.hotkey {
                if !hotkeys.insert(key.to_ascii_lowercase()) {
                    return Err(CatalogError::DuplicateHotkey(key));
                }
            }

            let mut child_ids = BTreeSet::new();
            for child in &parent.children {
                if !child.children.is_empty() {
                    return Err(CatalogError::NestedChildren {
                        parent: parent.id.clone(),
                        child: child.id.clone(),
                    });
                }
                if !child_ids.insert(child.id.clone()) {
                    return Err(CatalogError::DuplicateChild {
                        parent: parent.id.clone(),
                        child: child.id.clone(),
                    });
                }
            }
        }

        let mut character_ids = BTreeSet::new();
        for character in &characters {
            if !character_ids.insert(character.id.clone()) {
                return Err(CatalogError::DuplicateCharacter(character.id.clone()));
            }
        }

        Ok(Self {
            match_types,
            characters,
        })
    }

    pub fn match_types(&self) -> &[MatchTypeNode] {
        &self.match_types
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn parent(&self, id: &str) -> Option<&MatchTypeNode> {
        self.match_types.iter().find(|parent| parent.id.as_str() == id)
    }

    pub fn parent_position(&self, id: &str) -> Option<usize> {
        self.match_types.iter().position(|parent| parent.id.as_str() == id)
    }

    pub fn parent_for_hotkey(&self, key: char) -> Option<&MatchTypeNode> {
        let key = key.to_ascii_lowercase();
        self.match_types
            .iter()
            .find(|parent| parent.hotkey.map(|k| k.to_ascii_lowercase()) == Some(key))
    }

    pub fn child(&self, parent: &str, child: &str) -> Option<&MatchTypeNode> {
        self.parent(parent).and_then(|parent| parent.child(child))
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|character| character.id.as_str() == id)
    }

    /// Characters in role order (tank, damage, support), catalog order within a role.
    pub fn characters_by_role(&self) -> impl Iterator<Item = &Character> + '_ {
        Role::ALL.into_iter().flat_map(move |role| {
            self.characters.iter().filter(move |character| character.role == role)
        })
    }

    /// Resolves a flat legacy type id to `(parent, child)`.
    ///
    /// A parent id wins; otherwise the first parent owning a child with that id is used.
    pub fn resolve_flat_type(&self, id: &str) -> Option<(&MatchTypeNode, Option<&MatchTypeNode>)> {
        if let Some(parent) = self.parent(id) {
            return Some((parent, None));
        }
        self.match_types
            .iter()
            .find_map(|parent| parent.child(id).map(|child| (parent, Some(child))))
    }

    /// Human label for a parent/child pair, e.g. "Competitive Role Queue".
    pub fn match_type_label(&self, parent: &str, child: Option<&str>) -> String {
        let Some(parent_node) = self.parent(parent) else {
            return child.unwrap_or(parent).to_owned();
        };
        match child {
            Some(child_id) => match parent_node.child(child_id) {
                Some(child_node) => child_node
                    .display_label()
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("{} > {}", parent_node.label(), child_node.label())),
                None => child_id.to_owned(),
            },
            None => parent_node.label().to_owned(),
        }
    }

    /// Built-in taxonomy for the tracked game.
    pub fn builtin() -> Self {
        fn mt(id: &str) -> MatchTypeId {
            MatchTypeId::new(id).expect("hard-coded match type id is valid")
        }

        fn ch(id: &str, name: &str, role: Role) -> Character {
            Character::new(
                CharacterId::new(id).expect("hard-coded character id is valid"),
                name,
                role,
            )
        }

        let match_types = vec![
            MatchTypeNode::new(mt("unranked"), "Unranked")
                .with_hotkey('1')
                .with_children(vec![
                    MatchTypeNode::new(mt("quickplay"), "Quick Play")
                        .with_hotkey('q')
                        .with_display_label("Quick Play"),
                    MatchTypeNode::new(mt("6v6-openqueue"), "6V6 Open Queue")
                        .with_hotkey('o')
                        .with_display_label("6V6 Open Queue"),
                    MatchTypeNode::new(mt("mystery-heroes"), "Mystery Heroes")
                        .with_hotkey('m')
                        .with_display_label("Mystery Heroes"),
                ]),
            MatchTypeNode::new(mt("competitive"), "Competitive")
                .with_hotkey('2')
                .with_children(vec![
                    MatchTypeNode::new(mt("role-queue"), "Role Queue")
                        .with_hotkey('r')
                        .with_display_label("Competitive Role Queue"),
                    MatchTypeNode::new(mt("open-queue"), "Open Queue")
                        .with_hotkey('o')
                        .with_display_label("Competitive Open Queue"),
                ]),
            MatchTypeNode::new(mt("stadium"), "Stadium")
                .with_hotkey('3')
                .restricting_characters()
                .with_children(vec![
                    MatchTypeNode::new(mt("quickplay"), "Quick Play")
                        .with_hotkey('q')
                        .with_display_label("Stadium Quick Play"),
                    MatchTypeNode::new(mt("competitive"), "Competitive")
                        .with_hotkey('c')
                        .with_display_label("Stadium Competitive"),
                ]),
            MatchTypeNode::new(mt("arcade"), "Arcade").with_hotkey('4'),
        ];

        let characters = vec![
            ch("dva", "D.Va", Role::Tank),
            ch("doomfist", "Doomfist", Role::Tank).mode_restricted(),
            ch("hazard", "Hazard", Role::Tank).mode_restricted(),
            ch("junkerqueen", "Junker Queen", Role::Tank),
            ch("mauga", "Mauga", Role::Tank).mode_restricted(),
            ch("orisa", "Orisa", Role::Tank),
            ch("ramattra", "Ramattra", Role::Tank).mode_restricted(),
            ch("reinhardt", "Reinhardt", Role::Tank),
            ch("roadhog", "Roadhog", Role::Tank).mode_restricted(),
            ch("sigma", "Sigma", Role::Tank).mode_restricted(),
            ch("winston", "Winston", Role::Tank).mode_restricted(),
            ch("wreckingball", "Wrecking Ball", Role::Tank).mode_restricted(),
            ch("zarya", "Zarya", Role::Tank),
            ch("ashe", "Ashe", Role::Damage),
            ch("bastion", "Bastion", Role::Damage).mode_restricted(),
            ch("cassidy", "Cassidy", Role::Damage),
            ch("echo", "Echo", Role::Damage).mode_restricted(),
            ch("freja", "Freja", Role::Damage),
            ch("genji", "Genji", Role::Damage),
            ch("hanzo", "Hanzo", Role::Damage).mode_restricted(),
            ch("junkrat", "Junkrat", Role::Damage).mode_restricted(),
            ch("mei", "Mei", Role::Damage),
            ch("pharah", "Pharah", Role::Damage).mode_restricted(),
            ch("reaper", "Reaper", Role::Damage),
            ch("sojourn", "Sojourn", Role::Damage).mode_restricted(),
            ch("soldier76", "Soldier: 76", Role::Damage),
            ch("sombra", "Sombra", Role::Damage).mode_restricted(),
            ch("symmetra", "Symmetra", Role::Damage).mode_restricted(),
            ch("torbjorn", "Torbjörn", Role::Damage).mode_restricted(),
            ch("tracer", "Tracer", Role::Damage).mode_restricted(),
            ch("venture", "Venture", Role::Damage).mode_restricted(),
            ch("widowmaker", "Widowmaker", Role::Damage).mode_restricted(),
            ch("ana", "Ana", Role::Support),
            ch("baptiste", "Baptiste", Role::Support).mode_restricted(),
            ch("brigitte", "Brigitte", Role::Support).mode_restricted(),
            ch("illari", "Illari", Role::Support).mode_restricted(),
            ch("juno", "Juno", Role::Support),
            ch("kiriko", "Kiriko", Role::Support),
            ch("lifeweaver", "Lifeweaver", Role::Support).mode_restricted(),
            ch("lucio", "Lúcio", Role::Support),
            ch("mercy", "Mercy", Role::Support),
            ch("moira", "Moira", Role::Support),
            ch("wuyang", "Wuyang", Role::Support).mode_restricted(),
            ch("zenyatta", "Zenyatta", Role::Support).mode_restricted(),
        ];

        Self::new(match_types, characters).expect("built-in catalog is valid")
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
