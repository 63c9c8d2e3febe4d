//! URL search parameters backing a table
//!
//! Keys are kept sorted so two equal states always serialize to the same
//! query string, which doubles as the fetch cache key.

use std::collections::BTreeMap;

/// Query-string state for one table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableQuery {
    params: BTreeMap<String, String>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`.
    ///
    /// Empty values are dropped; for repeated keys the last value wins.
    /// Malformed input yields an empty query.
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();

        let mut parsed = Self::new();
        for (key, value) in pairs {
            parsed.set(&key, &value);
        }
        parsed
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Set a parameter. A blank value removes the key instead of storing "".
    pub fn set(&mut self, key: &str, value: &str) {
        if value.trim().is_empty() {
            self.params.remove(key);
        } else {
            self.params.insert(key.to_string(), value.to_string());
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.params.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Owned key/value pairs, suitable for request options
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Serialize without the leading `?`
    pub fn to_query_string(&self) -> String {
        let pairs: Vec<(&str, &str)> = self.iter().collect();
        serde_urlencoded::to_string(pairs).unwrap_or_default()
    }
}

impl std::fmt::Display for TableQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let query = TableQuery::parse("?search=sea+view&page=2&status=published");
        assert_eq!(query.get("search"), Some("sea view"));
        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(
            query.to_query_string(),
            "page=2&search=sea+view&status=published"
        );
    }

    #[test]
    fn test_empty_value_removes_key() {
        let mut query = TableQuery::new();
        query.set("status", "draft");
        assert!(query.contains("status"));

        query.set("status", "");
        assert!(!query.contains("status"));
        assert_eq!(query.to_query_string(), "");

        query.set("status", "   ");
        assert!(!query.contains("status"));
    }

    #[test]
    fn test_parse_drops_empty_values() {
        let query = TableQuery::parse("status=&page=1");
        assert!(!query.contains("status"));
        assert_eq!(query.to_query_string(), "page=1");
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let query = TableQuery::parse("page=1&page=4");
        assert_eq!(query.get("page"), Some("4"));
    }

    #[test]
    fn test_equal_states_serialize_identically() {
        let a = TableQuery::parse("b=2&a=1");
        let b = TableQuery::parse("a=1&b=2");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }
}
