use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Column holding the partner's name after normalization.
pub const COMPANY_COLUMN: &str = "Company";
/// Column holding the source label (`DSP`, `FedEx`, ...).
pub const TYPE_COLUMN: &str = "Type";
/// Name column used by the DSP export, renamed to [`COMPANY_COLUMN`].
pub const SOURCE_NAME_COLUMN: &str = "DSP Name";
/// Column never shown in the table.
pub const EXCLUDED_COLUMN: &str = "Email";

// ---------------------------------------------------------------------------
// Record – one row of the merged directory
// ---------------------------------------------------------------------------

/// An insertion-ordered mapping from column name to cell text.
///
/// Lookups are linear; directory rows have about a dozen columns. Setting an
/// existing key overwrites in place without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            fields: Vec::with_capacity(n),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    /// Cell text, or `""` when the column is absent.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == column)
    }

    /// Insert or overwrite. A new key is appended after all existing keys.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    pub fn remove(&mut self, column: &str) -> Option<String> {
        let pos = self.fields.iter().position(|(k, _)| k == column)?;
        Some(self.fields.remove(pos).1)
    }

    /// Column names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

// Serialized as a JSON object whose key order matches insertion order.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in &self.fields {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{k}={v}")?;
            first = false;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the merged, immutable directory
// ---------------------------------------------------------------------------

/// All records from every source, in source order, plus the column list
/// derived at merge time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Rows in load order: every row of the first source, then the next.
    pub records: Vec<Record>,
    /// Display columns, derived from the first record only.
    pub columns: Vec<String>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
