//! Reassembly of partial results into labeled output
//!
//! One assembler per dispatch flavor. Each classifies the result run from
//! its first element (tabular before vector before scalar, always) and
//! re-attaches the partition labels per the strategy:
//!
//! - tabular results stack along rows with the partition labels as outer
//!   index levels;
//! - vector results become rows (row/group dispatch) or columns (column
//!   dispatch) of a new frame;
//! - scalar results become a series over the partition labels, except for
//!   group dispatch which produces a single-column key-indexed frame.

use crate::dispatch::Axis;
use crate::error::Result;
use crate::frame::{DataFrame, Index, Label, Series};
use crate::partial::{classify, PartialResult, ResultShape};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The labeled output of a parallel apply: a series when results were
/// scalar per partition, a frame otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Applied {
    Series(Series),
    Frame(DataFrame),
}

impl Applied {
    pub fn as_series(&self) -> Option<&Series> {
        match self {
            Applied::Series(series) => Some(series),
            Applied::Frame(_) => None,
        }
    }

    pub fn as_frame(&self) -> Option<&DataFrame> {
        match self {
            Applied::Frame(frame) => Some(frame),
            Applied::Series(_) => None,
        }
    }

    pub fn into_series(self) -> Option<Series> {
        match self {
            Applied::Series(series) => Some(series),
            Applied::Frame(_) => None,
        }
    }

    pub fn into_frame(self) -> Option<DataFrame> {
        match self {
            Applied::Frame(frame) => Some(frame),
            Applied::Series(_) => None,
        }
    }
}

/// Frame dispatch along rows or columns.
pub(crate) fn frame_dispatch(
    results: Vec<PartialResult>,
    index: Index,
    columns: Vec<String>,
    axis: Axis,
) -> Result<Applied> {
    match axis {
        Axis::Rows => rows(results, index),
        Axis::Columns => column_wise(results, columns),
    }
}

/// Row dispatch: one partial result per input row.
fn rows(results: Vec<PartialResult>, index: Index) -> Result<Applied> {
    match classify(&results) {
        ResultShape::Tabular => {
            let frames = results.into_iter().map(PartialResult::into_frame).collect();
            let keys = index.labels().to_vec();
            let names = index.names().to_vec();
            Ok(Applied::Frame(DataFrame::concat_keyed(frames, keys, names)?))
        }
        ResultShape::Vector => {
            let series = results.into_iter().map(PartialResult::into_series).collect();
            Ok(Applied::Frame(DataFrame::from_row_series(series, index)?))
        }
        ResultShape::Scalar => scalar_series(results, index),
    }
}

/// Column dispatch: one partial result per input column.
fn column_wise(results: Vec<PartialResult>, columns: Vec<String>) -> Result<Applied> {
    let column_index = Index::from_labels(
        columns.iter().map(|c| Label::scalar(c.as_str())).collect(),
    );
    match classify(&results) {
        ResultShape::Tabular => {
            let frames = results.into_iter().map(PartialResult::into_frame).collect();
            // Column labels key the stacked rows; the level stays unnamed.
            let keys = column_index.labels().to_vec();
            Ok(Applied::Frame(DataFrame::concat_keyed(
                frames,
                keys,
                vec![None],
            )?))
        }
        ResultShape::Vector => {
            let series = results.into_iter().map(PartialResult::into_series).collect();
            Ok(Applied::Frame(DataFrame::from_column_series(
                columns, series,
            )?))
        }
        ResultShape::Scalar => scalar_series(results, column_index),
    }
}

/// Element-wise series dispatch.
pub(crate) fn elements(results: Vec<PartialResult>, index: Index) -> Result<Applied> {
    match classify(&results) {
        ResultShape::Tabular => {
            let frames = results.into_iter().map(PartialResult::into_frame).collect();
            let keys = index.labels().to_vec();
            let names = index.names().to_vec();
            Ok(Applied::Frame(DataFrame::concat_keyed(frames, keys, names)?))
        }
        // Anything non-tabular flattens to one value per element.
        _ => {
            let flattened = results.into_iter().map(PartialResult::flatten).collect();
            scalar_series(flattened, index)
        }
    }
}

/// Group dispatch: one partial result per group, keyed by the group labels.
pub(crate) fn groups(
    results: Vec<PartialResult>,
    keys: Vec<Label>,
    key_names: Vec<String>,
    result_column: &str,
) -> Result<Applied> {
    let names: Vec<Option<String>> = key_names.into_iter().map(Some).collect();
    match classify(&results) {
        ResultShape::Tabular => {
            let frames = results.into_iter().map(PartialResult::into_frame).collect();
            Ok(Applied::Frame(DataFrame::concat_keyed(frames, keys, names)?))
        }
        ResultShape::Vector => {
            let series = results.into_iter().map(PartialResult::into_series).collect();
            let index = Index::with_names(names, keys);
            Ok(Applied::Frame(DataFrame::from_row_series(series, index)?))
        }
        ResultShape::Scalar => {
            trace!(column = result_column, "assembling group scalars");
            let values: Vec<_> = results
                .into_iter()
                .map(|r| vec![r.into_scalar()])
                .collect();
            let frame = DataFrame::from_rows(vec![result_column], values)?
                .with_index(Index::with_names(names, keys))?;
            Ok(Applied::Frame(frame))
        }
    }
}

fn scalar_series(results: Vec<PartialResult>, index: Index) -> Result<Applied> {
    let values = results.into_iter().map(PartialResult::into_scalar).collect();
    Ok(Applied::Series(Series::new(values).with_index(index)?))
}
