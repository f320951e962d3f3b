use super::model::{Dataset, Record, COMPANY_COLUMN, TYPE_COLUMN};

/// Concatenate per-source records in source order and derive the column list.
pub fn merge(sources: Vec<Vec<Record>>, excluded: &str) -> Dataset {
    let total: usize = sources.iter().map(Vec::len).sum();
    let mut records = Vec::with_capacity(total);
    for batch in sources {
        records.extend(batch);
    }

    let columns = records
        .first()
        .map(|first| {
            log::debug!("Deriving columns from first record: {first}");
            derive_columns(first, excluded)
        })
        .unwrap_or_default();

    log::info!("Merged {} records, columns {:?}", records.len(), columns);
    Dataset { records, columns }
}

/// Display columns for a dataset whose first record is `first`.
///
/// Only the first record is consulted: a column that appears solely in later
/// records (e.g. a field only the second source has) is not displayed.
pub fn derive_columns(first: &Record, excluded: &str) -> Vec<String> {
    let mut cols: Vec<String> = Vec::with_capacity(first.len());
    for key in first.keys() {
        if key != excluded && !cols.iter().any(|c| c == key) {
            cols.push(key.to_string());
        }
    }

    let has = |name: &str| cols.iter().any(|c| c == name);
    if has(COMPANY_COLUMN) && has(TYPE_COLUMN) {
        cols.retain(|c| c != COMPANY_COLUMN && c != TYPE_COLUMN);
        cols.splice(0..0, [COMPANY_COLUMN.to_string(), TYPE_COLUMN.to_string()]);
    }
    cols
}
