// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for benchmark runs.

use std::fmt;

use crate::Case;

/// The part of a benchmark run that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Building fixtures, the driver or the benchmark profile.
    Configuration,
    /// Pre-populating the warm items before a case.
    Setup,
    /// The timed operations of a case.
    Case(Case),
    /// Purging the cold items after a case.
    Teardown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => f.write_str("configuration"),
            Self::Setup => f.write_str("setup"),
            Self::Case(case) => write!(f, "case `{}`", case.name()),
            Self::Teardown => f.write_str("teardown"),
        }
    }
}

/// A fatal benchmark error.
///
/// Every failure aborts the run: a case whose setup failed cannot be timed meaningfully, and
/// a failed teardown would skew every case after it. The storage error that caused the
/// failure, if any, is kept as the source.
///
/// # Examples
///
/// ```
/// use stockpile_bench::{Driver, Phase};
/// use stockpile::testing::MockStorage;
///
/// let result = Driver::builder(MockStorage::new()).count(0).build();
/// let error = result.expect_err("an empty fixture is rejected");
/// assert_eq!(error.phase(), Phase::Configuration);
/// ```
#[ohno::error]
#[display("benchmark {phase} failed")]
pub struct BenchError {
    phase: Phase,
}

impl BenchError {
    /// Returns the phase of the run that failed.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }
}
