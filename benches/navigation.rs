// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use matchtally::focus::{Command, Direction, Navigator, Renderer, Vertical, Zone};
use matchtally::model::{Catalog, Settings};
use matchtally::state::AppState;
use matchtally::tui::TuiRenderer;

mod profiler;

fn expanded_state() -> AppState {
    let start = Utc
        .with_ymd_and_hms(2026, 1, 1, 12, 0, 0)
        .single()
        .expect("fixed start");
    let mut state = AppState::new(Catalog::builtin(), Settings::default(), start);
    state.ui.characters_expanded = true;
    state
}

// Benchmark identity (keep stable):
// - Group names: `navigation.grid_sweep`, `navigation.refresh`, `navigation.save_cycle`
// - Case IDs are form widths in cells (`w40`, `w80`, `w160`) or `hotkeys`.
fn benches_navigation(c: &mut Criterion) {
    let widths = [("w40", 40u16), ("w80", 80), ("w160", 160)];

    {
        let mut group = c.benchmark_group("navigation.grid_sweep");

        for (case_id, width) in widths {
            let mut state = expanded_state();
            let mut renderer = TuiRenderer::new(&state, width);
            let characters = renderer.zone_cardinality(Zone::CharacterGrid) as u64;

            group.throughput(Throughput::Elements(characters));
            group.bench_function(case_id, |b| {
                b.iter(|| {
                    let mut nav = Navigator::new(&mut state, &mut renderer);
                    nav.on_direct_click(Zone::CharacterGrid, 0);
                    let mut steps = 0u32;
                    while nav_in_grid(&nav) {
                        nav.grid_move(Vertical::Down);
                        nav.on_secondary_axis_move(Direction::Next);
                        steps = steps.wrapping_add(1);
                    }
                    black_box(steps)
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("navigation.refresh");

        for (case_id, width) in widths {
            let state = expanded_state();
            let mut renderer = TuiRenderer::new(&state, width);
            group.bench_function(case_id, |b| {
                b.iter(|| {
                    renderer.refresh(black_box(&state));
                    black_box(renderer.zone_cardinality(Zone::CharacterGrid))
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("navigation.save_cycle");
        let state = expanded_state();
        let now = Utc
            .with_ymd_and_hms(2026, 1, 1, 13, 0, 0)
            .single()
            .expect("fixed now");

        group.bench_function("hotkeys", |b| {
            b.iter_batched(
                || {
                    let state = state.clone();
                    let renderer = TuiRenderer::new(&state, 80);
                    (state, renderer)
                },
                |(mut state, mut renderer)| {
                    let mut nav = Navigator::new(&mut state, &mut renderer).at(now);
                    nav.dispatch(Command::SelectParentHotkey('2'));
                    nav.dispatch(Command::Activate);
                    nav.dispatch(Command::Activate);
                    nav.dispatch(Command::DirectClick {
                        zone: Zone::Result,
                        index: 0,
                    });
                    nav.dispatch(Command::Activate);
                    black_box(nav.dispatch(Command::Activate))
                },
                BatchSize::SmallInput,
            )
        });

        group.finish();
    }
}

fn nav_in_grid(nav: &Navigator<'_, TuiRenderer>) -> bool {
    nav.focus().zone == Some(Zone::CharacterGrid)
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_navigation
}
criterion_main!(benches);
