//! Table controller: URL state, fetching and optimistic reorder
//!
//! `TableController` owns a `TableQuery` and derives sort, search, filters,
//! page and date range from it. Mutators only touch the query; a fetch is due
//! whenever the endpoint plus canonical query string differs from the last
//! completed load.

use std::time::Duration;

use chrono::NaiveDate;
use realty_client::{ApiClient, ApiError, ApiResponse, Pagination, RequestOptions};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use crate::{
    debounce::{SEARCH_DEBOUNCE, SearchDebouncer},
    error::TableError,
    optimistic::{Optimistic, OptimisticUpdate},
    pagination::{PageItem, page_window},
    params::{self, ParamKeys},
    query::TableQuery,
    reorder::{ReorderConfig, move_item},
    row::{RowId, TableRow},
    sort::{SortDirection, SortState, next_sort},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

static LOADING: LoadState = LoadState::Loading;

/// Static description of one table screen
#[derive(Clone, Debug)]
pub struct TableConfig {
    pub endpoint: String,
    /// Query keys accepted by `set_filter`
    pub filter_keys: Vec<String>,
    pub keys: ParamKeys,
    /// Reorder support; `None` disables drag reorder
    pub reorder: Option<ReorderConfig>,
    /// Quiet period before typed search text reaches the query
    pub search_debounce: Duration,
}

impl TableConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            filter_keys: Vec::new(),
            keys: ParamKeys::default(),
            reorder: None,
            search_debounce: SEARCH_DEBOUNCE,
        }
    }

    pub fn filter_key(mut self, key: &str) -> Self {
        self.filter_keys.push(key.to_string());
        self
    }

    pub fn keys(mut self, keys: ParamKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn reorder(mut self, reorder: ReorderConfig) -> Self {
        self.reorder = Some(reorder);
        self
    }

    pub fn search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }
}

/// Fetch lifecycle of the table data
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Success,
    Error(String),
}

/// A reorder that has been applied locally but not yet sent
#[derive(Debug)]
pub struct PendingReorder {
    update: OptimisticUpdate,
    id: RowId,
    sort_key: i64,
}

impl PendingReorder {
    pub fn id(&self) -> &RowId {
        &self.id
    }

    pub fn sort_key(&self) -> i64 {
        self.sort_key
    }
}

/// Headless state for one paginated, filterable, sortable list
pub struct TableController<R> {
    client: ApiClient,
    config: TableConfig,
    query: TableQuery,
    state: LoadState,
    rows: Optimistic<Vec<R>>,
    meta: Option<Pagination>,
    loaded_key: Option<String>,
    search_debouncer: SearchDebouncer,
    search_rx: UnboundedReceiver<String>,
}

impl<R> TableController<R>
where
    R: TableRow + DeserializeOwned + Clone,
{
    pub fn new(client: ApiClient, config: TableConfig) -> Self {
        Self::with_query(client, config, TableQuery::new())
    }

    /// Restore state from a query string, e.g. a bookmarked URL
    pub fn from_url(client: ApiClient, config: TableConfig, query: &str) -> Self {
        Self::with_query(client, config, TableQuery::parse(query))
    }

    fn with_query(client: ApiClient, config: TableConfig, query: TableQuery) -> Self {
        let (search_debouncer, search_rx) = SearchDebouncer::new(config.search_debounce);
        Self {
            client,
            config,
            query,
            state: LoadState::Idle,
            rows: Optimistic::default(),
            meta: None,
            loaded_key: None,
            search_debouncer,
            search_rx,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn query(&self) -> &TableQuery {
        &self.query
    }

    /// Parameters forwarded to the list endpoint
    pub fn search_params(&self) -> Vec<(String, String)> {
        self.query.pairs()
    }

    /// Cache key of the current state: endpoint plus canonical query string
    pub fn query_key(&self) -> String {
        if self.query.is_empty() {
            self.config.endpoint.clone()
        } else {
            format!("{}?{}", self.config.endpoint, self.query)
        }
    }

    pub fn needs_fetch(&self) -> bool {
        self.loaded_key.as_deref() != Some(self.query_key().as_str())
    }

    /// Reads as `Loading` once the query has moved past the last completed load
    pub fn state(&self) -> &LoadState {
        if self.loaded_key.is_some() && self.needs_fetch() {
            &LOADING
        } else {
            &self.state
        }
    }

    pub fn is_loading(&self) -> bool {
        *self.state() == LoadState::Loading
    }

    pub fn rows(&self) -> &[R] {
        self.rows.current()
    }

    pub fn meta(&self) -> Option<&Pagination> {
        self.meta.as_ref()
    }

    // ============== Derived state ==============

    pub fn sort(&self) -> Option<SortState> {
        let column = self.query.get(&self.config.keys.sort_field)?;
        let direction = self
            .query
            .get(&self.config.keys.sort_order)
            .and_then(|d| d.parse().ok())
            .unwrap_or(SortDirection::Asc);
        Some(SortState::new(column, direction))
    }

    pub fn search(&self) -> Option<&str> {
        self.query.get(params::SEARCH)
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.query.get(key)
    }

    /// Current page, 1-based; anything unparseable reads as page 1
    pub fn page(&self) -> u32 {
        self.query
            .get(params::PAGE)
            .and_then(|p| p.parse::<u32>().ok())
            .unwrap_or(1)
            .max(1)
    }

    pub fn date_range(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let parse = |key: &str| {
            self.query
                .get(key)
                .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
        };
        (parse(params::DATE_FROM), parse(params::DATE_TO))
    }

    /// Visible pagination slots for the last loaded meta
    pub fn pages(&self) -> Vec<PageItem> {
        self.meta
            .as_ref()
            .map(|meta| page_window(meta.current_page, meta.last_page))
            .unwrap_or_default()
    }

    // ============== Mutators ==============

    /// Advance the sort cycle for `column`
    pub fn toggle_sort(&mut self, column: &str) {
        let keys = &self.config.keys;
        match next_sort(self.sort().as_ref(), column) {
            Some(sort) => {
                self.query.set(&keys.sort_field, &sort.column);
                self.query.set(&keys.sort_order, sort.direction.as_str());
            }
            None => {
                self.query.remove(&keys.sort_field);
                self.query.remove(&keys.sort_order);
            }
        }
    }

    /// Set a declared filter; an empty value clears it
    pub fn set_filter(&mut self, key: &str, value: &str) -> Result<(), TableError> {
        if !self.config.filter_keys.iter().any(|k| k == key) {
            return Err(TableError::UnknownFilter(key.to_string()));
        }
        self.query.set(key, value);
        self.reset_page();
        Ok(())
    }

    /// Apply search text immediately, dropping any debounced input
    pub fn set_search(&mut self, text: &str) {
        self.search_debouncer.cancel();
        self.query.set(params::SEARCH, text.trim());
        self.reset_page();
    }

    /// Feed a keystroke. The query is only written by `settle_search`, once
    /// typing has paused for `search_debounce`.
    pub fn search_input(&mut self, text: &str) {
        self.search_debouncer.input(text);
    }

    pub fn search_pending(&self) -> bool {
        self.search_debouncer.is_pending()
    }

    /// Wait for pending search input to settle and write it to the query.
    /// Returns whether the search changed.
    pub async fn settle_search(&mut self) -> bool {
        let mut latest = None;
        while let Ok(text) = self.search_rx.try_recv() {
            latest = Some(text);
        }
        if latest.is_none() && self.search_debouncer.is_pending() {
            latest = self.search_rx.recv().await;
        }

        let Some(text) = latest else {
            return false;
        };
        if self.search() == Some(text.trim()) {
            return false;
        }
        self.set_search(&text);
        true
    }

    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        for (key, date) in [(params::DATE_FROM, from), (params::DATE_TO, to)] {
            match date {
                Some(date) => self
                    .query
                    .set(key, &date.format(DATE_FORMAT).to_string()),
                None => {
                    self.query.remove(key);
                }
            }
        }
        self.reset_page();
    }

    /// Remove search, date range and every declared filter. Sort is kept.
    pub fn clear_filters(&mut self) {
        self.search_debouncer.cancel();
        self.query.remove(params::SEARCH);
        self.query.remove(params::DATE_FROM);
        self.query.remove(params::DATE_TO);
        for key in &self.config.filter_keys {
            self.query.remove(key);
        }
        self.reset_page();
    }

    pub fn set_page(&mut self, page: u32) {
        self.query.set(params::PAGE, &page.max(1).to_string());
    }

    fn reset_page(&mut self) {
        self.query.set(params::PAGE, "1");
    }

    // ============== Fetching ==============

    /// Load the current page. On failure the previous rows and meta are kept.
    pub async fn fetch(&mut self) -> &LoadState {
        let key = self.query_key();
        self.state = LoadState::Loading;
        debug!("Fetching table data: {}", key);

        let options = RequestOptions::new().params(self.query.pairs()).silent();
        let response: ApiResponse<Vec<R>> =
            self.client.get_with(&self.config.endpoint, options).await;

        self.loaded_key = Some(key);

        if response.is_error {
            let message = response.message_or_default().to_string();
            warn!("Failed to load {}: {}", self.config.endpoint, message);
            self.state = LoadState::Error(message);
        } else {
            self.rows.reconcile(response.data.unwrap_or_default());
            self.meta = response.meta;
            self.state = LoadState::Success;
        }

        &self.state
    }

    /// Fetch only when the query changed since the last completed load
    pub async fn refresh_if_needed(&mut self) -> bool {
        if !self.needs_fetch() {
            return false;
        }
        self.fetch().await;
        true
    }

    // ============== Reorder ==============

    /// Move a row locally and describe the request that confirms it
    pub fn begin_reorder(&mut self, from: usize, to: usize) -> Result<PendingReorder, TableError> {
        if self.config.reorder.is_none() {
            return Err(TableError::ReorderDisabled);
        }

        let rows = self.rows.current();
        let len = rows.len();
        let (dragged, target) = match (rows.get(from), rows.get(to)) {
            (Some(dragged), Some(target)) => (dragged, target),
            (None, _) => return Err(TableError::IndexOutOfRange { index: from, len }),
            (_, None) => return Err(TableError::IndexOutOfRange { index: to, len }),
        };

        let id = dragged.row_id();
        let sort_key = target
            .sort_key()
            .ok_or_else(|| TableError::MissingSortKey(target.row_id()))?;

        let mut reordered = rows.to_vec();
        move_item(&mut reordered, from, to)?;
        let update = self.rows.apply(|rows| *rows = reordered);

        Ok(PendingReorder {
            update,
            id,
            sort_key,
        })
    }

    /// Send the reorder, then refetch. A failed request restores the previous order.
    pub async fn finish_reorder(&mut self, pending: PendingReorder) -> Result<(), TableError> {
        let reorder = self
            .config
            .reorder
            .as_ref()
            .ok_or(TableError::ReorderDisabled)?;
        let body = reorder.payload(&pending.id, pending.sort_key);

        let response: ApiResponse<Value> = self
            .client
            .put(&reorder.endpoint, &body, RequestOptions::new())
            .await;

        let result = if response.is_error {
            warn!(
                "Reorder of row {} failed, rolling back: {}",
                pending.id,
                response.message_or_default()
            );
            self.rows.rollback(pending.update);
            Err(TableError::Api(ApiError::Server {
                status: response.status,
                message: response.message_or_default().to_string(),
                errors: response.errors,
            }))
        } else {
            self.rows.commit(pending.update);
            Ok(())
        };

        self.fetch().await;
        result
    }

    pub async fn reorder(&mut self, from: usize, to: usize) -> Result<(), TableError> {
        let pending = self.begin_reorder(from, to)?;
        self.finish_reorder(pending).await
    }
}
