//! Grouped frames
//!
//! Produced by [`DataFrame::groupby`](crate::frame::DataFrame::groupby).
//! Groups are held in first-appearance order of their keys and each group is
//! an owned sub-frame, so a group handed to a worker is already a private
//! copy of its rows.

use crate::frame::{DataFrame, Label};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBy {
    keys: Vec<String>,
    groups: Vec<(Label, DataFrame)>,
}

impl GroupBy {
    pub(crate) fn new(keys: Vec<String>, groups: Vec<(Label, DataFrame)>) -> Self {
        Self { keys, groups }
    }

    /// The grouping column names.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Ordered `(key, group)` pairs.
    pub fn groups(&self) -> &[(Label, DataFrame)] {
        &self.groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Label, DataFrame)> {
        self.groups.iter()
    }

    /// Group frame for a key, if present.
    pub fn get(&self, key: &Label) -> Option<&DataFrame> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, frame)| frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Value;

    #[test]
    fn test_get_by_key() {
        let df = DataFrame::from_rows(
            vec!["g", "x"],
            vec![
                vec![Value::from("a"), Value::from(1)],
                vec![Value::from("b"), Value::from(2)],
            ],
        )
        .unwrap();
        let grouped = df.groupby(&["g"]).unwrap();

        let key = Label::composite(vec![Value::from("b")]);
        assert_eq!(grouped.get(&key).map(DataFrame::n_rows), Some(1));
        assert_eq!(grouped.get(&Label::scalar("z")), None);
        assert_eq!(grouped.keys(), &["g".to_string()]);
    }
}
