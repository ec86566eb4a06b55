// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The shape of a benchmark run.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use crate::{BenchError, Phase};

/// Environment variable overriding [`BenchProfile::iterations`].
pub const ITERATIONS_VAR: &str = "STOCKPILE_BENCH_ITERATIONS";

/// Environment variable overriding [`BenchProfile::warmup`].
pub const WARMUP_VAR: &str = "STOCKPILE_BENCH_WARMUP";

/// Environment variable overriding [`BenchProfile::measurement_time`], in milliseconds.
pub const MEASUREMENT_MS_VAR: &str = "STOCKPILE_BENCH_MEASUREMENT_MS";

// criterion refuses fewer samples.
const MIN_SAMPLE_SIZE: usize = 10;

const WARMUP_ROUND: Duration = Duration::from_millis(100);
const MIN_WARMUP: Duration = Duration::from_millis(1);
const MIN_MEASUREMENT: Duration = Duration::from_millis(1);

/// How many samples to take and how long to warm up and measure.
///
/// The defaults take ten samples after one warm-up round.
///
/// # Examples
///
/// ```
/// use stockpile_bench::BenchProfile;
///
/// let profile = BenchProfile::from_lookup(|name| match name {
///     "STOCKPILE_BENCH_ITERATIONS" => Some("50".to_string()),
///     _ => None,
/// })?;
///
/// assert_eq!(profile.iterations, 50);
/// assert_eq!(profile.warmup, 1);
/// # Ok::<(), stockpile_bench::BenchError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchProfile {
    /// Number of samples per case.
    pub iterations: usize,
    /// Number of warm-up rounds before sampling.
    pub warmup: u32,
    /// Target time spent collecting samples of one case.
    pub measurement_time: Duration,
}

impl Default for BenchProfile {
    fn default() -> Self {
        Self {
            iterations: 10,
            warmup: 1,
            measurement_time: Duration::from_secs(1),
        }
    }
}

impl BenchProfile {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Fails in [`Phase::Configuration`] if a variable is set but does not parse, or if the
    /// measurement time is zero.
    pub fn from_env() -> Result<Self, BenchError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through `lookup`, falling back to the defaults.
    ///
    /// # Errors
    ///
    /// Fails in [`Phase::Configuration`] if a value does not parse, or if the measurement
    /// time is zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BenchError> {
        let defaults = Self::default();

        let measurement_ms: Option<u64> = parse(&lookup, MEASUREMENT_MS_VAR)?;
        if measurement_ms == Some(0) {
            return Err(BenchError::caused_by(
                Phase::Configuration,
                format!("{MEASUREMENT_MS_VAR} must be greater than zero"),
            ));
        }

        Ok(Self {
            iterations: parse(&lookup, ITERATIONS_VAR)?.unwrap_or(defaults.iterations),
            warmup: parse(&lookup, WARMUP_VAR)?.unwrap_or(defaults.warmup),
            measurement_time: measurement_ms.map_or(defaults.measurement_time, Duration::from_millis),
        })
    }

    /// Returns the warm-up time criterion should use.
    #[must_use]
    pub fn warm_up_time(&self) -> Duration {
        (WARMUP_ROUND * self.warmup).max(MIN_WARMUP)
    }

    /// Returns the number of samples criterion should take.
    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.iterations.max(MIN_SAMPLE_SIZE)
    }

    /// Returns the measurement time criterion should use.
    #[must_use]
    pub fn measurement_time(&self) -> Duration {
        self.measurement_time.max(MIN_MEASUREMENT)
    }

    /// Applies this profile to a criterion configuration.
    #[must_use]
    pub fn configure(&self, criterion: Criterion) -> Criterion {
        criterion
            .sample_size(self.sample_size())
            .warm_up_time(self.warm_up_time())
            .measurement_time(self.measurement_time())
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>, BenchError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                BenchError::caused_by(Phase::Configuration, format!("invalid value `{raw}` for {name}: {e}"))
            })
        })
        .transpose()
}
