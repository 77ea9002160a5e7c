//! Minimal tabular collaborator types
//!
//! The dispatch layer only needs something that yields ordered
//! `(label, partition)` pairs and can receive a labeled result back. This
//! module supplies that: dynamically typed cells, multi-level indexes, 1-D
//! series, 2-D frames, and grouped frames. No I/O, no query surface.

mod dataframe;
mod groupby;
mod index;
mod series;
mod value;

pub use dataframe::DataFrame;
pub use groupby::GroupBy;
pub use index::{Index, Label};
pub use series::Series;
pub use value::Value;
