// Row identity for table data

use std::fmt;

use realty_client::model::{Category, Listing, Review, Slider, User};
use serde::Serialize;
use serde_json::Value;

/// Row primary key, numeric or string
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Str(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(id) => write!(f, "{}", id),
            RowId::Str(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        RowId::Int(id)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        RowId::Str(id.to_string())
    }
}

/// A row that can be displayed and reordered in a table
pub trait TableRow {
    fn row_id(&self) -> RowId;

    /// Position used by the reorder endpoint, if the resource has one
    fn sort_key(&self) -> Option<i64> {
        None
    }
}

impl TableRow for Listing {
    fn row_id(&self) -> RowId {
        RowId::Int(self.id)
    }

    fn sort_key(&self) -> Option<i64> {
        self.sort_order
    }
}

impl TableRow for Category {
    fn row_id(&self) -> RowId {
        RowId::Int(self.id)
    }

    fn sort_key(&self) -> Option<i64> {
        self.sort_order
    }
}

impl TableRow for Slider {
    fn row_id(&self) -> RowId {
        RowId::Int(self.id)
    }

    fn sort_key(&self) -> Option<i64> {
        self.sort_order
    }
}

impl TableRow for User {
    fn row_id(&self) -> RowId {
        RowId::Int(self.id)
    }
}

impl TableRow for Review {
    fn row_id(&self) -> RowId {
        RowId::Int(self.id)
    }
}

/// Untyped rows: `id` and `sort_order` keys, numbers or numeric strings
impl TableRow for Value {
    fn row_id(&self) -> RowId {
        match self.get("id") {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(id) => RowId::Int(id),
                None => RowId::Str(n.to_string()),
            },
            Some(Value::String(s)) => RowId::Str(s.clone()),
            _ => RowId::Str(String::new()),
        }
    }

    fn sort_key(&self) -> Option<i64> {
        match self.get("sort_order")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_rows() {
        let row = json!({"id": 7, "sort_order": "3"});
        assert_eq!(row.row_id(), RowId::Int(7));
        assert_eq!(row.sort_key(), Some(3));

        let row = json!({"id": "abc"});
        assert_eq!(row.row_id(), RowId::Str("abc".to_string()));
        assert_eq!(row.sort_key(), None);
    }

    #[test]
    fn test_row_id_serializes_untagged() {
        assert_eq!(serde_json::to_value(RowId::Int(5)).unwrap(), json!(5));
        assert_eq!(serde_json::to_value(RowId::from("x")).unwrap(), json!("x"));
        assert_eq!(RowId::Int(12).to_string(), "12");
    }
}
