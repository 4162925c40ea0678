// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the match log.
//!
//! Queries provide derived views (totals, win rates, history pages) that power the TUI panels.

pub mod history;
pub mod stats;

pub use history::{history_page, HistoryPage};
pub use stats::{stats_for, Stats};
