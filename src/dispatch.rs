//! Work distribution over a bounded thread pool
//!
//! One dispatch call builds its own rayon pool, batches the partitions into
//! chunks, maps the worker function over them with ordered semantics, and
//! tears the pool down before returning on every exit path. Result order
//! always matches submission order regardless of completion order.

use crate::error::{BoxError, Error, Result};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which axis of a frame to partition along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// One partition per row (the default).
    #[default]
    Rows,
    /// One partition per column.
    Columns,
}

/// Per-call dispatch configuration.
///
/// Extra arguments to the worker function have no counterpart here; bind
/// them by closure capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOptions {
    /// Worker pool size. Defaults to the host's available parallelism.
    pub num_processes: usize,
    /// Optional chunk count. Must be at least `num_processes` when given;
    /// when absent the chunk size is derived from `num_processes`. Purely a
    /// throughput knob, never affects output.
    pub n_chunks: Option<usize>,
    /// Partition axis for frame dispatch. Ignored by series and group
    /// dispatch.
    pub axis: Axis,
    /// Column name for the value column of group-scalar assembly.
    pub result_column: String,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            num_processes: default_parallelism(),
            n_chunks: None,
            axis: Axis::Rows,
            result_column: "result".to_string(),
        }
    }
}

impl ApplyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_processes(mut self, num_processes: usize) -> Self {
        self.num_processes = num_processes;
        self
    }

    pub fn n_chunks(mut self, n_chunks: usize) -> Self {
        self.n_chunks = Some(n_chunks);
        self
    }

    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn result_column(mut self, name: impl Into<String>) -> Self {
        self.result_column = name.into();
        self
    }

    /// Check the preconditions that must hold before any work is scheduled.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.num_processes == 0 {
            return Err(Error::WorkerCount);
        }
        if let Some(n_chunks) = self.n_chunks {
            if n_chunks < self.num_processes {
                return Err(Error::ChunkCount {
                    n_chunks,
                    num_processes: self.num_processes,
                });
            }
        }
        Ok(())
    }

    /// Batch size for `total` partitions, floored to 1.
    pub(crate) fn chunk_size(&self, total: usize) -> usize {
        let divisor = self.n_chunks.unwrap_or(self.num_processes);
        (total / divisor).max(1)
    }
}

/// Host logical core count, falling back to 4 when it cannot be determined.
pub fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// Map `f` over `partitions` on a bounded pool, preserving submission order.
///
/// All-or-nothing: the first worker error fails the whole dispatch and any
/// sibling results are discarded. Preconditions are checked before the pool
/// is built, so a violation performs zero invocations of `f`.
pub(crate) fn run_pool<T, R, F>(partitions: Vec<T>, f: F, options: &ApplyOptions) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> std::result::Result<R, BoxError> + Send + Sync,
{
    options.validate()?;
    if partitions.is_empty() {
        return Err(Error::Empty("no partitions to dispatch"));
    }

    let total = partitions.len();
    let chunk_size = options.chunk_size(total);
    debug!(
        partitions = total,
        workers = options.num_processes,
        chunk_size,
        "dispatching partition batch"
    );

    let pool = ThreadPoolBuilder::new()
        .num_threads(options.num_processes)
        .build()?;

    // Partitions keep their submission ordinal so a failure can name the
    // partition it happened on.
    let batches = into_batches(partitions, chunk_size);
    let results: Vec<Vec<R>> = pool.install(|| {
        batches
            .into_par_iter()
            .map(|batch| {
                batch
                    .into_iter()
                    .map(|(ordinal, partition)| {
                        f(partition).map_err(|source| Error::Worker {
                            partition: ordinal,
                            source,
                        })
                    })
                    .collect::<Result<Vec<R>>>()
            })
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(results.into_iter().flatten().collect())
}

fn into_batches<T>(partitions: Vec<T>, chunk_size: usize) -> Vec<Vec<(usize, T)>> {
    let mut batches = Vec::with_capacity(partitions.len().div_ceil(chunk_size));
    let mut current = Vec::with_capacity(chunk_size);
    for pair in partitions.into_iter().enumerate() {
        current.push(pair);
        if current.len() == chunk_size {
            batches.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_size_defaults_to_worker_count() {
        let options = ApplyOptions::new().num_processes(4);
        assert_eq!(options.chunk_size(100), 25);
        assert_eq!(options.chunk_size(3), 1);
    }

    #[test]
    fn test_chunk_size_honors_n_chunks() {
        let options = ApplyOptions::new().num_processes(2).n_chunks(10);
        assert_eq!(options.chunk_size(100), 10);
    }

    #[test]
    fn test_validate_rejects_small_n_chunks() {
        let options = ApplyOptions::new().num_processes(4).n_chunks(2);
        assert!(matches!(
            options.validate(),
            Err(Error::ChunkCount {
                n_chunks: 2,
                num_processes: 4
            })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let options = ApplyOptions::new().num_processes(0);
        assert!(matches!(options.validate(), Err(Error::WorkerCount)));
    }

    #[test]
    fn test_run_pool_preserves_order() {
        let partitions: Vec<usize> = (0..50).collect();
        let options = ApplyOptions::new().num_processes(4);
        let results =
            run_pool(partitions, |p| Ok(p * 2), &options).expect("dispatch should succeed");
        let expected: Vec<usize> = (0..50).map(|p| p * 2).collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_run_pool_all_or_nothing() {
        let partitions: Vec<usize> = (0..10).collect();
        let options = ApplyOptions::new().num_processes(2);
        let err = run_pool(
            partitions,
            |p| {
                if p == 7 {
                    Err(BoxError::from("bad partition"))
                } else {
                    Ok(p)
                }
            },
            &options,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Worker { partition: 7, .. }));
    }

    #[test]
    fn test_run_pool_rejects_empty_input() {
        let options = ApplyOptions::new().num_processes(1);
        let err = run_pool(Vec::<usize>::new(), |p| Ok(p), &options).unwrap_err();
        assert!(matches!(err, Error::Empty(_)));
    }

    #[test]
    fn test_into_batches_covers_remainder() {
        let batches = into_batches(vec![1, 2, 3, 4, 5], 2);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2], vec![(4, 5)]);
    }
}
