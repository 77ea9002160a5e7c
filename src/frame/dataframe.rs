//! 2-D labeled tables
//!
//! Row-major storage behind a column list and an index. The frame exists to
//! supply ordered `(label, partition)` pairs for dispatch and to receive
//! reassembled results; it carries no I/O or query surface.

use crate::error::{Error, Result};
use crate::frame::{GroupBy, Index, Label, Series, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    columns: Vec<String>,
    index: Index,
    rows: Vec<Vec<Value>>,
}

impl DataFrame {
    /// Frame with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            index: Index::default_range(0),
            rows: Vec::new(),
        }
    }

    /// Frame from row-major cells over the default `0..n` index.
    pub fn from_rows<C: Into<String>>(columns: Vec<C>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::Shape(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    columns.len()
                )));
            }
        }
        let index = Index::default_range(rows.len());
        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    pub fn with_index(mut self, index: Index) -> Result<Self> {
        if index.len() != self.rows.len() {
            return Err(Error::Shape(format!(
                "index length {} does not match {} rows",
                index.len(),
                self.rows.len()
            )));
        }
        self.index = index;
        Ok(self)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// One row as a series indexed by the column names.
    pub fn row(&self, i: usize) -> Option<Series> {
        let cells = self.rows.get(i)?;
        let labels = self.columns.iter().map(|c| Label::scalar(c.as_str())).collect();
        let name = self.index.get(i).map(|label| label.to_string());
        let mut series = Series::new(cells.clone());
        if let Some(name) = name {
            series = series.with_name(name);
        }
        // Column count equals cell count by construction.
        series.with_index(Index::from_labels(labels)).ok()
    }

    /// One column as a series indexed by the frame's index.
    pub fn column(&self, name: &str) -> Result<Series> {
        let position = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
        let values = self.rows.iter().map(|r| r[position].clone()).collect();
        Series::new(values)
            .with_name(name)
            .with_index(self.index.clone())
    }

    /// Ordered `(label, row)` pairs, each row an owned copy.
    pub fn iter_rows(&self) -> impl Iterator<Item = (Label, Series)> + '_ {
        (0..self.n_rows()).filter_map(move |i| {
            let label = self.index.get(i)?.clone();
            Some((label, self.row(i)?))
        })
    }

    /// Ordered `(label, column)` pairs, each column an owned copy.
    pub fn iter_columns(&self) -> impl Iterator<Item = (Label, Series)> + '_ {
        self.columns.iter().filter_map(move |name| {
            let series = self.column(name).ok()?;
            Some((Label::scalar(name.as_str()), series))
        })
    }

    /// Group rows by the given key columns, preserving first-appearance
    /// order of the keys. Each group keeps the key columns and the original
    /// row labels, as an owned sub-frame.
    pub fn groupby(&self, keys: &[&str]) -> Result<GroupBy> {
        let key_positions: Vec<usize> = keys
            .iter()
            .map(|key| {
                self.columns
                    .iter()
                    .position(|c| c == key)
                    .ok_or_else(|| Error::UnknownColumn(key.to_string()))
            })
            .collect::<Result<_>>()?;

        let mut order: Vec<Label> = Vec::new();
        let mut membership: HashMap<Label, Vec<usize>> = HashMap::new();
        for (i, row) in self.rows.iter().enumerate() {
            let parts: Vec<Value> = key_positions.iter().map(|&p| row[p].clone()).collect();
            let key = Label::composite(parts);
            membership
                .entry(key.clone())
                .or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                })
                .push(i);
        }

        let mut groups = Vec::with_capacity(order.len());
        for key in order {
            let member_rows = &membership[&key];
            let rows = member_rows.iter().map(|&i| self.rows[i].clone()).collect();
            let labels = member_rows
                .iter()
                .filter_map(|&i| self.index.get(i).cloned())
                .collect();
            let sub = DataFrame {
                columns: self.columns.clone(),
                index: Index::with_names(self.index.names().to_vec(), labels),
                rows,
            };
            groups.push((key, sub));
        }

        Ok(GroupBy::new(
            keys.iter().map(|k| k.to_string()).collect(),
            groups,
        ))
    }

    /// Stack frames along the row axis, prefixing each frame's index with a
    /// key as outer level(s). `key_names` name the outer levels; inner level
    /// names come from the first frame. Columns are taken from the first
    /// frame; mismatched siblings are stacked as-is, not validated.
    pub(crate) fn concat_keyed(
        frames: Vec<DataFrame>,
        keys: Vec<Label>,
        key_names: Vec<Option<String>>,
    ) -> Result<DataFrame> {
        let first = frames.first().ok_or(Error::Empty("concat of zero frames"))?;
        let columns = first.columns.clone();
        let mut names = key_names;
        names.extend(first.index.names().iter().cloned());

        let mut labels = Vec::new();
        let mut rows = Vec::new();
        for (frame, key) in frames.into_iter().zip(keys) {
            for (i, row) in frame.rows.into_iter().enumerate() {
                let inner = frame
                    .index
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| Label::scalar(i));
                labels.push(inner.prefixed_with(&key));
                rows.push(normalize_row(row, columns.len()));
            }
        }

        Ok(DataFrame {
            columns,
            index: Index::with_names(names, labels),
            rows,
        })
    }

    /// Build a frame whose rows are the given series, one per index label.
    /// Column names come from the first series' own index.
    pub(crate) fn from_row_series(rows: Vec<Series>, index: Index) -> Result<DataFrame> {
        let first = rows.first().ok_or(Error::Empty("no rows to assemble"))?;
        let columns: Vec<String> = first.index().iter().map(Label::to_string).collect();
        let width = columns.len();
        let cells = rows
            .into_iter()
            .map(|series| normalize_row(series.values().to_vec(), width))
            .collect();
        DataFrame {
            columns,
            index: Index::default_range(0),
            rows: cells,
        }
        .replace_index(index)
    }

    /// Build a frame whose columns are the given series, one per column
    /// name. The row index comes from the first series.
    pub(crate) fn from_column_series(
        columns: Vec<String>,
        series: Vec<Series>,
    ) -> Result<DataFrame> {
        let first = series.first().ok_or(Error::Empty("no columns to assemble"))?;
        let index = first.index().clone();
        let height = first.len();
        let rows = (0..height)
            .map(|i| {
                series
                    .iter()
                    .map(|s| s.get(i).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Ok(DataFrame {
            columns,
            index,
            rows,
        })
    }

    fn replace_index(mut self, index: Index) -> Result<DataFrame> {
        if index.len() != self.rows.len() {
            return Err(Error::Shape(format!(
                "index length {} does not match {} assembled rows",
                index.len(),
                self.rows.len()
            )));
        }
        self.index = index;
        Ok(self)
    }
}

/// Pad or truncate a row to the expected width. Ragged partial results are
/// out of contract; this keeps them deterministic instead of panicking.
fn normalize_row(mut row: Vec<Value>, width: usize) -> Vec<Value> {
    row.resize(width, Value::Null);
    row
}
