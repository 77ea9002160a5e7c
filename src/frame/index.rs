//! Labels and indexes
//!
//! A `Label` identifies one partition: a row index value, a column name, or
//! a (possibly composite) group key. An `Index` is an ordered run of equally
//! leveled labels with optional per-level names. Reassembly prefixes group
//! keys as outer levels, which is why labels are tuples rather than scalars.

use crate::frame::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One label of a (possibly multi-level) index. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    parts: Vec<Value>,
}

impl Label {
    /// Single-level label.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self {
            parts: vec![value.into()],
        }
    }

    /// Multi-level label, e.g. a composite group key.
    pub fn composite(parts: Vec<Value>) -> Self {
        debug_assert!(!parts.is_empty(), "a label must have at least one level");
        Self { parts }
    }

    pub fn parts(&self) -> &[Value] {
        &self.parts
    }

    pub fn levels(&self) -> usize {
        self.parts.len()
    }

    /// New label with `outer`'s levels prepended, used when stacking a group
    /// key on top of a partition's own index.
    pub fn prefixed_with(&self, outer: &Label) -> Label {
        let mut parts = Vec::with_capacity(outer.parts.len() + self.parts.len());
        parts.extend(outer.parts.iter().cloned());
        parts.extend(self.parts.iter().cloned());
        Label { parts }
    }
}

impl From<Value> for Label {
    fn from(value: Value) -> Self {
        Label::scalar(value)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parts.as_slice() {
            [single] => write!(f, "{}", single),
            parts => {
                write!(f, "(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", part)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Ordered labels plus per-level names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    names: Vec<Option<String>>,
    labels: Vec<Label>,
}

impl Index {
    /// The default `0..n` integer index.
    pub fn default_range(n: usize) -> Self {
        Self {
            names: vec![None],
            labels: (0..n).map(Label::scalar).collect(),
        }
    }

    /// Unnamed index over the given labels. Level count is taken from the
    /// first label; an empty index is single-level.
    pub fn from_labels(labels: Vec<Label>) -> Self {
        let levels = labels.first().map_or(1, Label::levels);
        Self {
            names: vec![None; levels],
            labels,
        }
    }

    /// Single-level named index.
    pub fn named(name: impl Into<String>, labels: Vec<Label>) -> Self {
        Self {
            names: vec![Some(name.into())],
            labels,
        }
    }

    /// Index with explicit per-level names.
    pub fn with_names(names: Vec<Option<String>>, labels: Vec<Label>) -> Self {
        Self { names, labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn levels(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[Option<String>] {
        &self.names
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn get(&self, i: usize) -> Option<&Label> {
        self.labels.get(i)
    }

    pub fn position(&self, label: &Label) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range() {
        let index = Index::default_range(3);
        assert_eq!(index.len(), 3);
        assert_eq!(index.levels(), 1);
        assert_eq!(index.get(2), Some(&Label::scalar(2)));
    }

    #[test]
    fn test_prefixed_label_stacks_levels() {
        let inner = Label::scalar(5);
        let outer = Label::composite(vec![Value::from("a"), Value::from(1)]);
        let stacked = inner.prefixed_with(&outer);

        assert_eq!(stacked.levels(), 3);
        assert_eq!(stacked.parts()[0], Value::from("a"));
        assert_eq!(stacked.parts()[2], Value::from(5));
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::scalar("x").to_string(), "x");
        let composite = Label::composite(vec![Value::from("a"), Value::from(2)]);
        assert_eq!(composite.to_string(), "(a, 2)");
    }

    #[test]
    fn test_position() {
        let index = Index::named("g", vec![Label::scalar("a"), Label::scalar("b")]);
        assert_eq!(index.position(&Label::scalar("b")), Some(1));
        assert_eq!(index.position(&Label::scalar("c")), None);
    }
}
