//! Parallel apply extension traits
//!
//! [`ApplyParallel`] attaches `apply_parallel` / `try_apply_parallel` to the
//! three collaborator types. Importing the trait (one `use` of
//! [`crate::prelude`]) is the whole registration: idempotent, scoped, and
//! free of process-wide side effects.
//!
//! Each implementation slices its receiver into ordered labeled partitions,
//! strips the labels, runs the function over the pool, and hands the results
//! plus the saved labels to the matching assembler.

use crate::assemble::{self, Applied};
use crate::dispatch::{run_pool, ApplyOptions, Axis};
use crate::error::{BoxError, Result};
use crate::frame::{DataFrame, GroupBy, Label, Series, Value};
use crate::partial::PartialResult;
use std::convert::Infallible;

/// Parallel apply over a partitioned collection.
///
/// `Partition` is what the worker function receives: an owned copy of one
/// row or column ([`Series`]), one element ([`Value`]), or one group
/// ([`DataFrame`]).
pub trait ApplyParallel {
    type Partition: Send;

    /// Apply a fallible function to every partition in parallel.
    ///
    /// All-or-nothing: the first error discards every sibling result and
    /// fails the call. Precondition violations (`n_chunks <
    /// num_processes`, zero workers, empty input) fail before any
    /// invocation of `f`.
    fn try_apply_parallel<F, R, E>(&self, f: F, options: ApplyOptions) -> Result<Applied>
    where
        F: Fn(Self::Partition) -> std::result::Result<R, E> + Send + Sync,
        R: Into<PartialResult> + Send,
        E: Into<BoxError>;

    /// Apply an infallible function to every partition in parallel.
    fn apply_parallel<F, R>(&self, f: F, options: ApplyOptions) -> Result<Applied>
    where
        F: Fn(Self::Partition) -> R + Send + Sync,
        R: Into<PartialResult> + Send,
    {
        self.try_apply_parallel(move |partition| Ok::<R, Infallible>(f(partition)), options)
    }
}

impl ApplyParallel for DataFrame {
    type Partition = Series;

    fn try_apply_parallel<F, R, E>(&self, f: F, options: ApplyOptions) -> Result<Applied>
    where
        F: Fn(Series) -> std::result::Result<R, E> + Send + Sync,
        R: Into<PartialResult> + Send,
        E: Into<BoxError>,
    {
        let partitions: Vec<Series> = match options.axis {
            Axis::Rows => self.iter_rows().map(|(_, series)| series).collect(),
            Axis::Columns => self.iter_columns().map(|(_, series)| series).collect(),
        };
        let results = run_pool(
            partitions,
            |partition| f(partition).map(Into::into).map_err(Into::into),
            &options,
        )?;
        assemble::frame_dispatch(
            results,
            self.index().clone(),
            self.columns().to_vec(),
            options.axis,
        )
    }
}

impl ApplyParallel for Series {
    type Partition = Value;

    fn try_apply_parallel<F, R, E>(&self, f: F, options: ApplyOptions) -> Result<Applied>
    where
        F: Fn(Value) -> std::result::Result<R, E> + Send + Sync,
        R: Into<PartialResult> + Send,
        E: Into<BoxError>,
    {
        let partitions: Vec<Value> = self.values().to_vec();
        let results = run_pool(
            partitions,
            |partition| f(partition).map(Into::into).map_err(Into::into),
            &options,
        )?;
        assemble::elements(results, self.index().clone())
    }
}

impl ApplyParallel for GroupBy {
    type Partition = DataFrame;

    fn try_apply_parallel<F, R, E>(&self, f: F, options: ApplyOptions) -> Result<Applied>
    where
        F: Fn(DataFrame) -> std::result::Result<R, E> + Send + Sync,
        R: Into<PartialResult> + Send,
        E: Into<BoxError>,
    {
        let keys: Vec<Label> = self.groups().iter().map(|(key, _)| key.clone()).collect();
        let partitions: Vec<DataFrame> = self
            .groups()
            .iter()
            .map(|(_, frame)| frame.clone())
            .collect();
        let results = run_pool(
            partitions,
            |partition| f(partition).map(Into::into).map_err(Into::into),
            &options,
        )?;
        assemble::groups(
            results,
            keys,
            self.keys().to_vec(),
            &options.result_column,
        )
    }
}
