use std::sync::Arc;

use serde::Serialize;

use crate::config::{DirectoryConfig, DEFAULT_PAGE_SIZE};
use crate::data::filter::{apply_query, distinct_values, filterable_columns, FilterState, Query};
use crate::data::model::{Dataset, Record};
use crate::data::pager::{page_slice, total_pages, Navigation};

// ---------------------------------------------------------------------------
// Load status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready(Arc<Dataset>),
    /// Terminal: no rows are shown after a failed load.
    Failed(String),
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Everything that can move the view from one snapshot to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Loaded(Dataset),
    LoadFailed(String),
    SearchChanged(String),
    /// An empty `value` clears the filter for `column`.
    FilterChanged { column: String, value: String },
    FiltersCleared,
    Navigate(Navigation),
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Immutable snapshot of the directory view, independent of rendering.
///
/// Transitions go through [`ViewState::apply`]; the dataset is shared, so
/// cloning a snapshot is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub status: LoadStatus,
    pub query: Query,
    /// 1-based, always within `1..=total_pages()`.
    pub page: usize,
    pub page_size: usize,
    /// Display columns that do not get a filter selector.
    pub unfiltered_columns: Vec<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(&DirectoryConfig::default())
    }
}

impl ViewState {
    /// Fresh snapshot in the `Loading` state. A zero `page_size`, which
    /// [`DirectoryConfig::validate`] rejects, falls back to
    /// [`DEFAULT_PAGE_SIZE`] here so the pager always has a positive size.
    pub fn new(config: &DirectoryConfig) -> Self {
        Self {
            status: LoadStatus::Loading,
            query: Query::default(),
            page: 1,
            page_size: if config.page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                config.page_size
            },
            unfiltered_columns: config.unfiltered_columns.clone(),
        }
    }

    /// Pure transition: the snapshot that follows `event`.
    pub fn apply(self, event: Event) -> ViewState {
        match event {
            Event::Loaded(dataset) => {
                log::info!(
                    "Directory ready: {} records, {} columns",
                    dataset.len(),
                    dataset.columns.len()
                );
                ViewState {
                    status: LoadStatus::Ready(Arc::new(dataset)),
                    page: 1,
                    ..self
                }
            }
            Event::LoadFailed(message) => {
                log::error!("Directory failed to load: {message}");
                ViewState {
                    status: LoadStatus::Failed(message),
                    page: 1,
                    ..self
                }
            }
            Event::SearchChanged(search) => ViewState {
                query: Query { search, ..self.query },
                page: 1,
                ..self
            },
            Event::FilterChanged { column, value } => {
                let mut filters = self.query.filters;
                if value.is_empty() {
                    filters.remove(&column);
                } else {
                    filters.insert(column, value);
                }
                ViewState {
                    query: Query {
                        filters,
                        search: self.query.search,
                    },
                    page: 1,
                    ..self
                }
            }
            Event::FiltersCleared => ViewState {
                query: Query {
                    filters: FilterState::new(),
                    search: self.query.search,
                },
                page: 1,
                ..self
            },
            Event::Navigate(nav) => {
                let page = nav.apply(self.page, self.total_pages());
                ViewState { page, ..self }
            }
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.status {
            LoadStatus::Ready(ds) => Some(ds.as_ref()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading)
    }

    /// Records matching the current search and filters.
    pub fn filtered(&self) -> Vec<&Record> {
        self.dataset()
            .map(|ds| apply_query(ds, &self.query))
            .unwrap_or_default()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    /// Everything a front end needs to draw the table.
    pub fn table(&self) -> TableView<'_> {
        let filtered = self.filtered();
        let rows = page_slice(&filtered, self.page, self.page_size).to_vec();
        let pages = total_pages(filtered.len(), self.page_size);
        TableView {
            columns: self
                .dataset()
                .map(|ds| ds.columns.as_slice())
                .unwrap_or(&[]),
            total_entries: filtered.len(),
            total_pages: pages,
            current_page: self.page,
            has_prev: Navigation::Prev.is_available(self.page, pages),
            has_next: Navigation::Next.is_available(self.page, pages),
            rows,
        }
    }

    /// Selector options for `column`, drawn from the unfiltered dataset.
    pub fn filter_options(&self, column: &str) -> Vec<String> {
        self.dataset()
            .map(|ds| distinct_values(ds, column))
            .unwrap_or_default()
    }

    /// Columns offered as filter selectors.
    pub fn filter_columns(&self) -> Vec<String> {
        self.dataset()
            .map(|ds| filterable_columns(ds, &self.unfiltered_columns))
            .unwrap_or_default()
    }

    /// Current selection for `column`, `""` meaning all.
    pub fn filter_value(&self, column: &str) -> &str {
        self.query
            .filters
            .get(column)
            .map(String::as_str)
            .unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Table view
// ---------------------------------------------------------------------------

/// One rendered page of the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView<'a> {
    pub columns: &'a [String],
    pub rows: Vec<&'a Record>,
    pub total_entries: usize,
    pub total_pages: usize,
    pub current_page: usize,
    /// First/Prev are enabled.
    pub has_prev: bool,
    /// Next/Last are enabled.
    pub has_next: bool,
}
