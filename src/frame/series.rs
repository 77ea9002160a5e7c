//! 1-D labeled vectors

use crate::error::{Error, Result};
use crate::frame::{Index, Label, Value};
use serde::{Deserialize, Serialize};

/// An ordered run of values with an index and an optional name.
///
/// Rows and columns sliced off a [`DataFrame`](crate::frame::DataFrame) are
/// series, as are scalar-per-partition apply outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: Option<String>,
    index: Index,
    values: Vec<Value>,
}

impl Series {
    /// Series over the default `0..n` index.
    pub fn new(values: Vec<Value>) -> Self {
        let index = Index::default_range(values.len());
        Self {
            name: None,
            index,
            values,
        }
    }

    /// Convenience constructor converting from plain Rust values.
    pub fn from_values<V: Into<Value>>(values: Vec<V>) -> Self {
        Self::new(values.into_iter().map(Into::into).collect())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_index(mut self, index: Index) -> Result<Self> {
        if index.len() != self.values.len() {
            return Err(Error::Shape(format!(
                "index length {} does not match {} values",
                index.len(),
                self.values.len()
            )));
        }
        self.index = index;
        Ok(self)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Value> {
        self.values.get(i)
    }

    /// Value for the given label, if present.
    pub fn get_by_label(&self, label: &Label) -> Option<&Value> {
        self.index.position(label).and_then(|i| self.values.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Label, &Value)> {
        self.index.iter().zip(self.values.iter())
    }

    /// Numeric sum over the values. Integers stay integral until a float is
    /// seen; nulls and non-numeric values are skipped.
    pub fn sum(&self) -> Value {
        let mut int_sum: i64 = 0;
        let mut float_sum: f64 = 0.0;
        let mut seen_float = false;
        for value in &self.values {
            match value {
                Value::Int(v) => int_sum += v,
                Value::Float(v) => {
                    seen_float = true;
                    float_sum += v;
                }
                _ => {}
            }
        }
        if seen_float {
            Value::Float(float_sum + int_sum as f64)
        } else {
            Value::Int(int_sum)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_range_index() {
        let s = Series::from_values(vec![10, 20, 30]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.get_by_label(&Label::scalar(1)), Some(&Value::Int(20)));
    }

    #[test]
    fn test_with_index_length_mismatch() {
        let s = Series::from_values(vec![1, 2]);
        let err = s.with_index(Index::default_range(3)).unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
    }

    #[test]
    fn test_sum_integer_and_mixed() {
        assert_eq!(Series::from_values(vec![1, 2, 3]).sum(), Value::Int(6));

        let mixed = Series::new(vec![
            Value::Int(1),
            Value::Float(0.5),
            Value::Null,
            Value::Str("skip".into()),
        ]);
        assert_eq!(mixed.sum(), Value::Float(1.5));
    }
}
