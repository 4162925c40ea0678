// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for tracker state on disk.
//!
//! The store module reads/writes the data folder: one JSON file per concern (matches, settings,
//! recent characters, last match type, session) so each can be lost or corrupted independently.

pub mod data_folder;

pub use data_folder::{DataFolder, LoadedData, StoreError, WriteDurability};
