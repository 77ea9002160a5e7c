//! Per-partition results and shape classification
//!
//! Worker functions may return a table, a named vector, or a bare value,
//! without declaring which up front. [`PartialResult`] is the closed tagged
//! variant the three possibilities collapse into, and [`ResultShape`] is the
//! reassembly strategy chosen from the first result of a dispatch.
//!
//! Classification deliberately looks at the first element only; a dispatch
//! whose results mix shapes is out of contract and is coerced leniently into
//! a deterministic (but unspecified) output rather than rejected.

use crate::frame::{DataFrame, Index, Label, Series, Value};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What one worker invocation produced for one partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PartialResult {
    Frame(DataFrame),
    Series(Series),
    Scalar(Value),
}

/// Reassembly strategy, decided once per dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    Tabular,
    Vector,
    Scalar,
}

impl PartialResult {
    pub fn shape(&self) -> ResultShape {
        match self {
            PartialResult::Frame(_) => ResultShape::Tabular,
            PartialResult::Series(_) => ResultShape::Vector,
            PartialResult::Scalar(_) => ResultShape::Scalar,
        }
    }

    /// Collapse a one-element vector to its scalar. Element-wise dispatch
    /// applies this before scalar assembly so functions that wrap their
    /// answer in a single-element container still produce a flat output.
    pub(crate) fn flatten(self) -> Self {
        match self {
            PartialResult::Series(series) if series.len() == 1 => {
                let value = series.values()[0].clone();
                PartialResult::Scalar(value)
            }
            other => other,
        }
    }

    /// Tabular view, coercing off-shape results deterministically.
    pub(crate) fn into_frame(self) -> DataFrame {
        match self {
            PartialResult::Frame(frame) => frame,
            PartialResult::Series(series) => {
                let columns: Vec<String> =
                    series.index().iter().map(Label::to_string).collect();
                let label = match series.name() {
                    Some(name) => Label::scalar(name),
                    None => Label::scalar(0),
                };
                DataFrame::from_rows(columns, vec![series.values().to_vec()])
                    .and_then(|f| f.with_index(Index::from_labels(vec![label])))
                    .unwrap_or_else(|_| DataFrame::empty())
            }
            PartialResult::Scalar(value) => {
                DataFrame::from_rows(vec!["0"], vec![vec![value]])
                    .unwrap_or_else(|_| DataFrame::empty())
            }
        }
    }

    /// Vector view, coercing off-shape results deterministically.
    pub(crate) fn into_series(self) -> Series {
        match self {
            PartialResult::Series(series) => series,
            PartialResult::Frame(frame) => frame.row(0).unwrap_or_else(|| Series::new(Vec::new())),
            PartialResult::Scalar(value) => Series::new(vec![value]),
        }
    }

    /// Scalar view, coercing off-shape results deterministically.
    pub(crate) fn into_scalar(self) -> Value {
        match self {
            PartialResult::Scalar(value) => value,
            PartialResult::Series(series) => {
                series.values().first().cloned().unwrap_or(Value::Null)
            }
            PartialResult::Frame(_) => Value::Null,
        }
    }
}

/// Pick the strategy for a dispatch from its first result. The priority is
/// fixed: tabular before vector before scalar. Callers guarantee the slice
/// is non-empty.
pub(crate) fn classify(results: &[PartialResult]) -> ResultShape {
    let shape = results
        .first()
        .map_or(ResultShape::Scalar, PartialResult::shape);
    trace!(?shape, results = results.len(), "classified partial results");
    shape
}

impl From<DataFrame> for PartialResult {
    fn from(frame: DataFrame) -> Self {
        PartialResult::Frame(frame)
    }
}

impl From<Series> for PartialResult {
    fn from(series: Series) -> Self {
        PartialResult::Series(series)
    }
}

impl From<Value> for PartialResult {
    fn from(value: Value) -> Self {
        PartialResult::Scalar(value)
    }
}

impl From<bool> for PartialResult {
    fn from(v: bool) -> Self {
        PartialResult::Scalar(v.into())
    }
}

impl From<i32> for PartialResult {
    fn from(v: i32) -> Self {
        PartialResult::Scalar(v.into())
    }
}

impl From<i64> for PartialResult {
    fn from(v: i64) -> Self {
        PartialResult::Scalar(v.into())
    }
}

impl From<usize> for PartialResult {
    fn from(v: usize) -> Self {
        PartialResult::Scalar(v.into())
    }
}

impl From<f64> for PartialResult {
    fn from(v: f64) -> Self {
        PartialResult::Scalar(v.into())
    }
}

impl From<&str> for PartialResult {
    fn from(v: &str) -> Self {
        PartialResult::Scalar(v.into())
    }
}

impl From<String> for PartialResult {
    fn from(v: String) -> Self {
        PartialResult::Scalar(v.into())
    }
}
