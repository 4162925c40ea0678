// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Criterion tuned by `BENCH_*` env vars, sampling a flamegraph per benchmark.
pub fn criterion() -> Criterion {
    let frequency = env_or::<i32>("PROFILE_FREQ", 100).clamp(1, 1000);
    let sample_size = env_or::<usize>("BENCH_SAMPLE_SIZE", 100).clamp(10, 500);
    let warmup = Duration::from_millis(env_or::<u64>("BENCH_WARMUP_MS", 1000).clamp(100, 60_000));
    let measurement =
        Duration::from_millis(env_or::<u64>("BENCH_MEASUREMENT_MS", 3000).clamp(500, 120_000));

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(warmup)
        .measurement_time(measurement)
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
