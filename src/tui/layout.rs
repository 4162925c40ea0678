// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flows every zone into rows of bracketed buttons and answers the navigator's shape queries
//! from that layout.

use ratatui::layout::Rect;

use crate::focus::{ItemKey, ItemPosition, Renderer, Surface, Zone};
use crate::state::AppState;

const BUTTON_GAP: u16 = 1;
/// Width used before the first frame reports the real one.
pub const DEFAULT_FORM_WIDTH: u16 = 80;

pub(crate) fn button_text(label: &str) -> String {
    format!("[ {label} ]")
}

fn button_width(label: &str) -> u16 {
    let width = label.chars().count().saturating_add(4);
    u16::try_from(width).unwrap_or(u16::MAX)
}

fn caption(zone: Zone) -> Option<&'static str> {
    match zone {
        Zone::RecentCharacters => Some("Recent"),
        Zone::CharacterGrid => Some("All characters"),
        Zone::Result => Some("Result"),
        _ => None,
    }
}

/// Cell rectangles of every item, relative to the top-left of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FormLayout {
    zones: [Vec<Rect>; Zone::COUNT],
    captions: Vec<(u16, &'static str)>,
    height: u16,
}

impl FormLayout {
    pub(crate) fn compute(surface: &Surface, width: u16) -> Self {
        let width = width.max(1);
        let mut layout = Self::default();
        let mut y: u16 = 0;

        for zone in Zone::ORDER {
            let items = surface.items(zone);
            if items.is_empty() {
                continue;
            }
            if let Some(caption) = caption(zone) {
                layout.captions.push((y, caption));
                y = y.saturating_add(1);
            }

            let mut x: u16 = 0;
            let mut role = None;
            let rects = &mut layout.zones[zone.position()];
            for item in items {
                let w = button_width(&item.label).min(width);
                let role_break = zone == Zone::CharacterGrid && role.is_some() && item.role != role;
                if x > 0 && (x.saturating_add(w) > width || role_break) {
                    y = y.saturating_add(1);
                    x = 0;
                }
                rects.push(Rect::new(x, y, w, 1));
                x = x.saturating_add(w).saturating_add(BUTTON_GAP);
                role = item.role;
            }
            y = y.saturating_add(2);
        }

        layout.height = y.saturating_sub(1);
        layout
    }

    pub(crate) fn rect(&self, zone: Zone, index: usize) -> Option<Rect> {
        self.zones[zone.position()].get(index).copied()
    }

    pub(crate) fn rects(&self, zone: Zone) -> &[Rect] {
        &self.zones[zone.position()]
    }

    pub(crate) fn captions(&self) -> &[(u16, &'static str)] {
        &self.captions
    }

    pub(crate) fn height(&self) -> u16 {
        self.height
    }

    pub(crate) fn hit(&self, x: u16, y: u16) -> Option<(Zone, usize)> {
        Zone::ORDER.into_iter().find_map(|zone| {
            self.rects(zone)
                .iter()
                .position(|rect| {
                    y == rect.y && x >= rect.x && x < rect.x.saturating_add(rect.width)
                })
                .map(|index| (zone, index))
        })
    }
}

/// The terminal implementation of [`Renderer`].
#[derive(Debug, Clone)]
pub struct TuiRenderer {
    surface: Surface,
    layout: FormLayout,
    width: u16,
    focused: Option<(Zone, usize)>,
}

impl TuiRenderer {
    pub fn new(state: &AppState, width: u16) -> Self {
        let surface = Surface::derive(state);
        let layout = FormLayout::compute(&surface, width);
        Self {
            surface,
            layout,
            width,
            focused: None,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Re-flows the current surface for a new form width.
    pub fn resize(&mut self, width: u16) {
        if width == self.width {
            return;
        }
        self.width = width;
        self.layout = FormLayout::compute(&self.surface, width);
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub(crate) fn layout(&self) -> &FormLayout {
        &self.layout
    }

    /// The slot the focus visual is drawn on.
    pub fn focused(&self) -> Option<(Zone, usize)> {
        self.focused
    }

    /// Item under a form-relative cell.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(Zone, usize)> {
        self.layout.hit(x, y)
    }
}

impl Renderer for TuiRenderer {
    fn refresh(&mut self, state: &AppState) {
        self.surface = Surface::derive(state);
        self.layout = FormLayout::compute(&self.surface, self.width);
    }

    fn zone_exists(&self, zone: Zone) -> bool {
        self.surface.exists(zone)
    }

    fn zone_cardinality(&self, zone: Zone) -> usize {
        self.surface.items(zone).len()
    }

    fn item_position(&self, zone: Zone, index: usize) -> Option<ItemPosition> {
        self.layout.rect(zone, index).map(|rect| ItemPosition {
            x: i32::from(rect.x),
            y: i32::from(rect.y),
        })
    }

    fn item_available(&self, zone: Zone, index: usize) -> bool {
        self.surface
            .item(zone, index)
            .is_some_and(|item| item.available)
    }

    fn item_key(&self, zone: Zone, index: usize) -> Option<ItemKey> {
        self.surface.item(zone, index).map(|item| item.key.clone())
    }

    fn set_focus_visual(&mut self, zone: Zone, index: usize) {
        self.focused = Some((zone, index));
    }

    fn clear_focus_visual(&mut self) {
        self.focused = None;
    }
}
