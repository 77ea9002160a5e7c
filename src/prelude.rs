//! One-stop import for the extension surface
//!
//! ```
//! use parapply::prelude::*;
//!
//! let df = DataFrame::from_rows(
//!     vec!["a", "b"],
//!     vec![
//!         vec![Value::from(1), Value::from(2)],
//!         vec![Value::from(3), Value::from(4)],
//!     ],
//! )?;
//! let summed = df.apply_parallel(|row| row.sum(), ApplyOptions::new().num_processes(2))?;
//! # assert!(summed.as_series().is_some());
//! # Ok::<(), parapply::Error>(())
//! ```

pub use crate::apply::ApplyParallel;
pub use crate::assemble::Applied;
pub use crate::dispatch::{default_parallelism, ApplyOptions, Axis};
pub use crate::error::{Error, Result};
pub use crate::frame::{DataFrame, GroupBy, Index, Label, Series, Value};
pub use crate::partial::PartialResult;
