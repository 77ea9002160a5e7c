//! Structured error types for parallel apply operations
//!
//! Preconditions surface before any worker runs; worker failures carry the
//! ordinal of the partition that failed. Nothing is retried or swallowed.

use thiserror::Error;

/// Boxed error type accepted from fallible worker functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("n_chunks ({n_chunks}) must be at least num_processes ({num_processes})")]
    ChunkCount {
        n_chunks: usize,
        num_processes: usize,
    },

    #[error("num_processes must be at least 1")]
    WorkerCount,

    #[error("empty dispatch: {0}")]
    Empty(&'static str),

    #[error("worker failed on partition {partition}: {source}")]
    Worker {
        partition: usize,
        #[source]
        source: BoxError,
    },

    #[error("worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("shape mismatch: {0}")]
    Shape(String),
}

pub type Result<T> = std::result::Result<T, Error>;
