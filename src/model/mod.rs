// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A static catalog of match types and characters, the in-progress selection, saved match
//! records, and the preferences that shape navigation.

pub mod catalog;
pub mod ids;
pub mod recent;
pub mod record;
pub mod selection;
pub mod session;
pub mod settings;

pub use catalog::{Catalog, CatalogError, Character, MatchTypeNode, Role};
pub use ids::{CharacterId, Id, IdError, MatchTypeId, RecordId, SessionId};
pub use recent::RecentCharacters;
pub use record::{truncate_to_millis, LogScope, MatchLog, MatchRecord};
pub use selection::{Outcome, ParseOutcomeError, Selection};
pub use session::{resume_or_reset, Session, SessionStart, SessionSummary};
pub use settings::{RestrictionPolicy, SessionAutoReset, Settings, SettingsMerge, ThemePreference};
