// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keyboard focus navigation.
//!
//! A single cursor `(zone, index)` moves over an ordered list of zones whose presence and size
//! are re-read from a [`Renderer`] on every transition. The character grid is navigated
//! spatially using rendered item positions.

mod engine;
mod renderer;
mod surface;
mod zone;

pub use engine::{Activation, Command, Direction, Navigator, Vertical};
pub use renderer::{ItemKey, ItemPosition, Renderer};
pub use surface::{Surface, SurfaceItem};
pub use zone::{FocusState, Zone};

#[cfg(test)]
mod tests;
