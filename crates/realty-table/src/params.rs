// URL query parameter names

/// Free-text search
pub const SEARCH: &str = "search";

/// 1-based page number
pub const PAGE: &str = "page";

/// Inclusive date range bounds, `YYYY-MM-DD`
pub const DATE_FROM: &str = "dateFrom";
pub const DATE_TO: &str = "dateTo";

/// Names of the sort parameters.
///
/// The two table screens historically disagreed on these; the default is
/// `sort_field`/`sort_order` and `legacy()` gives `sort`/`order`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamKeys {
    pub sort_field: String,
    pub sort_order: String,
}

impl Default for ParamKeys {
    fn default() -> Self {
        Self {
            sort_field: "sort_field".to_string(),
            sort_order: "sort_order".to_string(),
        }
    }
}

impl ParamKeys {
    pub fn legacy() -> Self {
        Self {
            sort_field: "sort".to_string(),
            sort_order: "order".to_string(),
        }
    }

    /// Whether `key` is one of the reserved (non-filter) parameters
    pub fn is_reserved(&self, key: &str) -> bool {
        key == SEARCH
            || key == PAGE
            || key == DATE_FROM
            || key == DATE_TO
            || key == self.sort_field
            || key == self.sort_order
    }
}
