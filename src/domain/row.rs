//! Source row representation
//!
//! A row is an insertion-ordered mapping of source column name to scalar
//! value. Order matters: the first row of a table export drives the
//! output column order, so rows must iterate their columns in the order
//! the source produced them.

use super::value::Value;

/// One row from a data source.
///
/// Backed by a `Vec` of pairs rather than a hash map so that iteration
/// preserves the source's natural column order. Lookups are linear,
/// which is fine at forum-table column counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Appends a column. A duplicate name shadows nothing; `get` returns
    /// the first occurrence, matching associative-array semantics.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((name.into(), value.into()));
    }

    /// Looks up a column value by exact name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, value)| value)
    }

    /// Iterates `(name, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the row has no columns at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Builds a row from a JSON object, preserving key order.
    pub fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut row = Row::new();
        for (name, value) in object {
            row.push(name, Value::from_json(value));
        }
        row
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (name, value) in iter {
            row.push(name, value);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut row = Row::new();
        row.push("id", 5i64);
        row.push("name", "alice");
        assert_eq!(row.get("id"), Some(&Value::Int(5)));
        assert_eq!(row.get("name"), Some(&Value::Text("alice".to_string())));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let row: Row = [("b", 1i64), ("a", 2i64), ("c", 3i64)]
            .into_iter()
            .collect();
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_from_json_object_preserves_order() {
        let parsed: serde_json::Value =
            serde_json::from_str(r#"{"z": 1, "a": "x", "m": null}"#).unwrap();
        let serde_json::Value::Object(object) = parsed else {
            panic!("expected object");
        };
        let row = Row::from_json_object(object);
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
        assert_eq!(row.get("m"), Some(&Value::Null));
    }
}
