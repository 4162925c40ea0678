// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Matchtally: a keyboard-first match result tracker.
//!
//! The focus engine (`focus`) drives a form of match type, characters, and result over an
//! explicit [`state::AppState`]; `store` persists it, `format` and `ops` move it in and out, and
//! `tui` puts it on a terminal.

pub mod focus;
pub mod format;
pub mod model;
pub mod ops;
pub mod query;
pub mod state;
pub mod store;
pub mod tui;
