// Drag-and-drop reorder support

use serde_json::{Map, Value};

use crate::{error::TableError, row::RowId};

/// Where and how reorders are sent
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReorderConfig {
    pub endpoint: String,
    pub id_field: String,
    pub sort_key_field: String,
}

impl ReorderConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            id_field: "id".to_string(),
            sort_key_field: "sort_order".to_string(),
        }
    }

    pub fn with_fields(mut self, id_field: &str, sort_key_field: &str) -> Self {
        self.id_field = id_field.to_string();
        self.sort_key_field = sort_key_field.to_string();
        self
    }

    /// Request body: the dragged row's id and the target row's sort key
    pub fn payload(&self, id: &RowId, sort_key: i64) -> Value {
        let id = match id {
            RowId::Int(id) => Value::from(*id),
            RowId::Str(id) => Value::from(id.as_str()),
        };

        let mut body = Map::new();
        body.insert(self.id_field.clone(), id);
        body.insert(self.sort_key_field.clone(), Value::from(sort_key));
        Value::Object(body)
    }
}

/// Move the item at `from` so it ends up at index `to`
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), TableError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(TableError::IndexOutOfRange { index, len });
        }
    }

    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_move_item() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        move_item(&mut items, 0, 2).unwrap();
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);

        move_item(&mut items, 3, 0).unwrap();
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);

        move_item(&mut items, 1, 1).unwrap();
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_move_item_out_of_range() {
        let mut items = vec![1, 2];
        let err = move_item(&mut items, 0, 2).unwrap_err();
        assert!(matches!(err, TableError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn test_payload_fields() {
        let config = ReorderConfig::new("/sliders/reorder");
        assert_eq!(
            config.payload(&RowId::Int(4), 10),
            json!({"id": 4, "sort_order": 10})
        );

        let config = config.with_fields("slider_id", "position");
        assert_eq!(
            config.payload(&RowId::from("s-1"), 2),
            json!({"slider_id": "s-1", "position": 2})
        );
    }
}
