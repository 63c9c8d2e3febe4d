//! Realty Table - headless, URL-synchronized table state
//!
//! The query string is the source of truth for page, sort, search, filters
//! and date range. `TableController` re-derives everything from it, fetches
//! through `realty_client::ApiClient`, and applies drag reorders
//! optimistically before reconciling with the server.

pub mod controller;
pub mod debounce;
pub mod error;
pub mod optimistic;
pub mod pagination;
pub mod params;
pub mod query;
pub mod reorder;
pub mod row;
pub mod sort;

pub use controller::{LoadState, PendingReorder, TableConfig, TableController};
pub use debounce::{SEARCH_DEBOUNCE, SearchDebouncer};
pub use error::TableError;
pub use optimistic::{Optimistic, OptimisticUpdate};
pub use pagination::{PageItem, page_window};
pub use params::ParamKeys;
pub use query::TableQuery;
pub use reorder::{ReorderConfig, move_item};
pub use row::{RowId, TableRow};
pub use sort::{SortDirection, SortState, next_sort};
