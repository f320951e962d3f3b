use std::collections::{BTreeMap, HashSet};

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Query: free-text search plus per-column equality filters
// ---------------------------------------------------------------------------

/// Per-column selections: column → required value. An empty value means the
/// column is unconstrained ("All").
pub type FilterState = BTreeMap<String, String>;

/// Search text and filter selections applied to a [`Dataset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub filters: FilterState,
}

impl Query {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            filters: FilterState::new(),
        }
    }

    pub fn with_filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(column.into(), value.into());
        self
    }

    /// Filters that actually constrain results.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty() && self.active_filters().next().is_none()
    }
}

/// Records passing `query`, in dataset order.
///
/// A record passes when:
/// * the search is empty, or some displayed column contains it
///   (case-insensitive; missing cells read as `""`)
/// * every non-empty filter equals the record's cell exactly; a record
///   lacking the column never matches
pub fn apply_query<'a>(dataset: &'a Dataset, query: &Query) -> Vec<&'a Record> {
    if query.is_unconstrained() {
        return dataset.records.iter().collect();
    }

    let needle = query.search.to_lowercase();
    let filters: Vec<(&str, &str)> = query.active_filters().collect();

    let matched: Vec<&Record> = dataset
        .records
        .iter()
        .filter(|r| needle.is_empty() || matches_search(r, &dataset.columns, &needle))
        .filter(|r| {
            filters
                .iter()
                .all(|(col, want)| r.get(col).is_some_and(|have| have == *want))
        })
        .collect();

    log::debug!(
        "Query search={:?} filters={:?} matched {}/{}",
        query.search,
        filters,
        matched.len(),
        dataset.len()
    );
    matched
}

/// `needle` must already be lowercased.
fn matches_search(record: &Record, columns: &[String], needle: &str) -> bool {
    columns
        .iter()
        .any(|col| record.value(col).to_lowercase().contains(needle))
}

// ---------------------------------------------------------------------------
// Filter option lists
// ---------------------------------------------------------------------------

/// Distinct non-empty values of `column` across the whole dataset, in order
/// of first occurrence.
pub fn distinct_values(dataset: &Dataset, column: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    dataset
        .records
        .iter()
        .filter_map(|r| r.get(column))
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Display columns that get a filter selector, i.e. all except `hidden`.
pub fn filterable_columns(dataset: &Dataset, hidden: &[String]) -> Vec<String> {
    dataset
        .columns
        .iter()
        .filter(|c| !hidden.contains(c))
        .cloned()
        .collect()
}
