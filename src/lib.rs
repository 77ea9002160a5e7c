//! # parapply
//!
//! Parallel apply for tabular data: distribute a transformation across the
//! rows, columns, elements, or groups of a frame over a bounded worker
//! pool, then reassemble the per-partition results into one labeled output
//! whose shape follows what the function actually returned.
//!
//! A worker function may return a scalar, a named vector, or a whole table;
//! the reassembly strategy is picked at runtime from the first result and
//! the partition labels (row index, column names, or group keys) are
//! re-attached so output order always matches input order, independent of
//! how execution interleaved across workers.
//!
//! ## Modules
//!
//! - `apply` - The `ApplyParallel` extension trait for frames, series, and
//!   grouped frames
//! - `dispatch` - Dispatch options and the bounded worker pool
//! - `frame` - Minimal tabular collaborator types (`Value`, `Series`,
//!   `DataFrame`, `GroupBy`)
//! - `partial` - Per-partition result variants and shape classification
//! - `error` - Error taxonomy (preconditions, worker failures)
//! - `prelude` - One-line import of the whole surface
//!
//! ## Example
//!
//! ```
//! use parapply::prelude::*;
//!
//! let df = DataFrame::from_rows(
//!     vec!["g", "x"],
//!     vec![
//!         vec![Value::from("a"), Value::from(1)],
//!         vec![Value::from("a"), Value::from(2)],
//!         vec![Value::from("b"), Value::from(3)],
//!     ],
//! )?;
//!
//! let counts = df
//!     .groupby(&["g"])?
//!     .apply_parallel(|group| group.n_rows(), ApplyOptions::new().num_processes(2))?;
//!
//! let frame = counts.into_frame().expect("scalar group results build a keyed frame");
//! assert_eq!(frame.cell(0, 0), Some(&Value::Int(2)));
//! assert_eq!(frame.cell(1, 0), Some(&Value::Int(1)));
//! # Ok::<(), parapply::Error>(())
//! ```

pub mod apply;
mod assemble;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod partial;
pub mod prelude;

pub use apply::ApplyParallel;
pub use assemble::Applied;
pub use dispatch::{default_parallelism, ApplyOptions, Axis};
pub use error::{BoxError, Error, Result};
pub use partial::PartialResult;
