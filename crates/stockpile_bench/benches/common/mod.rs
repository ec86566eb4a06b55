// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared wiring for the benchmark targets.

use std::time::Duration;

use criterion::Criterion;
use stockpile::Storage;
use stockpile_bench::{BenchProfile, Case, Driver, Value};
use tracing_subscriber::EnvFilter;

/// Builds the criterion configuration from the environment.
///
/// Logging is off unless `RUST_LOG` asks for it.
pub fn config() -> Criterion {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    // Another target in the same process may have installed a subscriber already.
    drop(tracing_subscriber::fmt().with_env_filter(filter).try_init());

    BenchProfile::from_env()
        .expect("invalid benchmark profile")
        .configure(Criterion::default())
}

/// Times every case of the catalog in its own benchmark under `group_name`.
///
/// Setup and teardown run around every iteration but only the case itself is timed.
pub fn bench_cases<S: Storage<Value>>(c: &mut Criterion, group_name: &str, driver: &Driver<S>) {
    let mut group = c.benchmark_group(group_name);

    for case in Case::ALL {
        group.bench_function(case.name(), |b| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    total += driver.run_isolated(*case).expect("benchmark case failed");
                }
                total
            });
        });
    }

    group.finish();
}
