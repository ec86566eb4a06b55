// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The benchmark driver.

use std::hint::black_box;
use std::time::{Duration, Instant};

use stockpile::Storage;

use crate::case::{Operation, Shape, Target};
use crate::fixture::{COLD_PREFIX, FIXTURE_SIZE, WARM_PREFIX};
use crate::{BenchError, Case, Fixture, Phase, Value};

/// Runs benchmark cases against a storage.
///
/// The driver owns the storage and two disjoint fixtures: warm items, written by
/// [`set_up`](Self::set_up) before every case, and cold items, removed by
/// [`tear_down`](Self::tear_down) after every case. Each case moves through
/// `idle -> setup -> timed operations -> teardown -> idle`; only the middle step is timed.
///
/// Return values of the storage calls are not checked. The driver measures speed, not
/// behavior. Storage errors are not: any of them aborts the run with a [`BenchError`].
///
/// # Examples
///
/// ```
/// use stockpile_bench::{Case, Driver};
/// use stockpile_memory::MemoryStorage;
///
/// let driver = Driver::new(MemoryStorage::new());
///
/// for case in Case::ALL {
///     let elapsed = driver.run_isolated(*case)?;
///     println!("{case}: {elapsed:?}");
/// }
/// # Ok::<(), stockpile_bench::BenchError>(())
/// ```
#[derive(Debug)]
pub struct Driver<S> {
    storage: S,
    warm: Fixture,
    cold: Fixture,
}

impl<S> Driver<S>
where
    S: Storage<Value>,
{
    /// Creates a driver with the standard fixtures: `warm0..warm9` and `cold0..cold9`.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            warm: Fixture::generated(WARM_PREFIX.to_owned(), FIXTURE_SIZE),
            cold: Fixture::generated(COLD_PREFIX.to_owned(), FIXTURE_SIZE),
        }
    }

    /// Creates a builder for a driver with custom fixtures.
    #[must_use]
    pub fn builder(storage: S) -> DriverBuilder<S> {
        DriverBuilder::new(storage)
    }

    /// Returns the storage under test.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the items expected to be present.
    #[must_use]
    pub fn warm(&self) -> &Fixture {
        &self.warm
    }

    /// Returns the items expected to be absent.
    #[must_use]
    pub fn cold(&self) -> &Fixture {
        &self.cold
    }

    /// Consumes the driver and returns the storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Writes every warm item with its fixture value.
    ///
    /// # Errors
    ///
    /// Fails in [`Phase::Setup`] if the storage errors or refuses to store any item.
    pub fn set_up(&self) -> Result<(), BenchError> {
        tracing::debug!(bench.items = self.warm.len(), "stockpile.bench.setup");

        let rejected = self
            .storage
            .set_items(self.warm.items())
            .map_err(|e| fail(BenchError::caused_by(Phase::Setup, e)))?;

        if !rejected.is_empty() {
            tracing::warn!(bench.rejected = ?rejected, "stockpile.bench.setup");
            return Err(fail(BenchError::caused_by(
                Phase::Setup,
                format!("{} warm items were not stored", rejected.len()),
            )));
        }

        Ok(())
    }

    /// Removes every cold item.
    ///
    /// Removing an absent item is not an error, so this can run after any case, or twice.
    ///
    /// # Errors
    ///
    /// Fails in [`Phase::Teardown`] if the storage errors.
    pub fn tear_down(&self) -> Result<(), BenchError> {
        tracing::debug!(bench.items = self.cold.len(), "stockpile.bench.teardown");

        self.storage
            .remove_items(self.cold.keys())
            .map(drop)
            .map_err(|e| fail(BenchError::caused_by(Phase::Teardown, e)))
    }

    /// Runs the operations of `case` once.
    ///
    /// This is the part that gets timed. It assumes [`set_up`](Self::set_up) ran before.
    ///
    /// # Errors
    ///
    /// Fails in [`Phase::Case`] if any storage call errors.
    pub fn run(&self, case: Case) -> Result<(), BenchError> {
        self.execute(case)
            .map_err(|e| fail(BenchError::caused_by(Phase::Case(case), e)))
    }

    /// Sets up, runs `case` and tears down, returning the time spent in `run`.
    ///
    /// # Errors
    ///
    /// Fails with the first error of the three phases.
    pub fn run_isolated(&self, case: Case) -> Result<Duration, BenchError> {
        self.set_up()?;

        let start = Instant::now();
        self.run(case)?;
        let elapsed = start.elapsed();

        self.tear_down()?;

        tracing::debug!(
            bench.case = case.name(),
            bench.duration_ns = elapsed.as_nanos(),
            "stockpile.bench.case"
        );
        Ok(elapsed)
    }

    fn fixture(&self, target: Target) -> &Fixture {
        match target {
            Target::Existing => &self.warm,
            Target::Missing => &self.cold,
        }
    }

    fn execute(&self, case: Case) -> stockpile::Result<()> {
        let storage = &self.storage;
        let fixture = self.fixture(case.target());
        let keys = fixture.keys();

        // Overwriting warm items keeps their fixture values; every other write stores
        // something new.
        let payload = match (case.operation(), case.target()) {
            (Operation::Set, Target::Existing) => fixture.items(),
            _ => fixture.transformed_items(),
        };

        match (case.operation(), case.shape()) {
            (Operation::Has, Shape::Single) => {
                for key in keys {
                    black_box(storage.has_item(black_box(key))?);
                }
            }
            (Operation::Has, Shape::Bulk) => {
                black_box(storage.has_items(black_box(keys))?);
            }
            (Operation::Set, Shape::Single) => {
                for (key, value) in payload {
                    black_box(storage.set_item(black_box(key), black_box(value))?);
                }
            }
            (Operation::Set, Shape::Bulk) => {
                black_box(storage.set_items(black_box(payload))?);
            }
            (Operation::Add, Shape::Single) => {
                for (key, value) in payload {
                    black_box(storage.add_item(black_box(key), black_box(value))?);
                }
            }
            (Operation::Add, Shape::Bulk) => {
                black_box(storage.add_items(black_box(payload))?);
            }
            (Operation::Replace, Shape::Single) => {
                for (key, value) in payload {
                    black_box(storage.replace_item(black_box(key), black_box(value))?);
                }
            }
            (Operation::Replace, Shape::Bulk) => {
                black_box(storage.replace_items(black_box(payload))?);
            }
            (Operation::GetCheckAndSet, _) => {
                // The token is read fresh for every item. An item that vanished between
                // setup and here has nothing to guard, so the write is skipped.
                for (key, value) in payload {
                    if let Some((_, token)) = black_box(storage.get_item_with_token(black_box(key))?) {
                        black_box(storage.check_and_set_item(&token, key, black_box(value))?);
                    }
                }
            }
            (Operation::Touch, Shape::Single) => {
                for key in keys {
                    black_box(storage.touch_item(black_box(key))?);
                }
            }
            (Operation::Touch, Shape::Bulk) => {
                black_box(storage.touch_items(black_box(keys))?);
            }
            (Operation::Get, Shape::Single) => {
                for key in keys {
                    black_box(storage.get_item(black_box(key))?);
                }
            }
            (Operation::Get, Shape::Bulk) => {
                black_box(storage.get_items(black_box(keys))?);
            }
            (Operation::Remove, Shape::Single) => {
                for key in keys {
                    black_box(storage.remove_item(black_box(key))?);
                }
            }
            (Operation::Remove, Shape::Bulk) => {
                black_box(storage.remove_items(black_box(keys))?);
            }
        }

        Ok(())
    }
}

fn fail(error: BenchError) -> BenchError {
    tracing::error!(bench.phase = %error.phase(), error = %error, "stockpile.bench.failed");
    error
}

/// Builder for a [`Driver`] with custom fixtures.
///
/// # Examples
///
/// ```
/// use stockpile::testing::MockStorage;
/// use stockpile_bench::Driver;
///
/// let driver = Driver::builder(MockStorage::new())
///     .warm_prefix("a")
///     .cold_prefix("c")
///     .count(3)
///     .build()?;
///
/// assert_eq!(driver.warm().keys(), ["a0", "a1", "a2"]);
/// # Ok::<(), stockpile_bench::BenchError>(())
/// ```
#[derive(Debug)]
pub struct DriverBuilder<S> {
    storage: S,
    warm_prefix: String,
    cold_prefix: String,
    count: u64,
}

impl<S> DriverBuilder<S>
where
    S: Storage<Value>,
{
    fn new(storage: S) -> Self {
        Self {
            storage,
            warm_prefix: WARM_PREFIX.to_owned(),
            cold_prefix: COLD_PREFIX.to_owned(),
            count: FIXTURE_SIZE,
        }
    }

    /// Sets the key prefix of the warm items. Defaults to `warm`.
    #[must_use]
    pub fn warm_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.warm_prefix = prefix.into();
        self
    }

    /// Sets the key prefix of the cold items. Defaults to `cold`.
    #[must_use]
    pub fn cold_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cold_prefix = prefix.into();
        self
    }

    /// Sets the number of items in each fixture. Defaults to 10.
    #[must_use]
    pub fn count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// Builds the driver.
    ///
    /// # Errors
    ///
    /// Fails in [`Phase::Configuration`] if a fixture is empty, a prefix is empty, or
    /// the warm and cold keys intersect.
    pub fn build(self) -> Result<Driver<S>, BenchError> {
        let warm = Fixture::new(self.warm_prefix, self.count)?;
        let cold = Fixture::new(self.cold_prefix, self.count)?;

        if warm.overlaps(&cold) {
            return Err(BenchError::caused_by(
                Phase::Configuration,
                format!(
                    "warm prefix `{}` and cold prefix `{}` produce the same keys",
                    warm.prefix(),
                    cold.prefix()
                ),
            ));
        }

        Ok(Driver {
            storage: self.storage,
            warm,
            cold,
        })
    }
}
