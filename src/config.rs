use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::model::{COMPANY_COLUMN, EXCLUDED_COLUMN, SOURCE_NAME_COLUMN};
use crate::error::{DirectoryError, Result};

/// Rows shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Source descriptor
// ---------------------------------------------------------------------------

/// One CSV source and the `Type` label stamped on each of its rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub location: PathBuf,
    pub label: String,
}

impl SourceSpec {
    pub fn new(location: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            label: label.into(),
        }
    }

    /// Name used in log lines and error messages.
    pub fn display_name(&self) -> String {
        self.location.display().to_string()
    }
}

// ---------------------------------------------------------------------------
// Directory configuration
// ---------------------------------------------------------------------------

/// Everything the loader, normalizer and view need to know up front.
///
/// Every field has a default, so an empty JSON object is a valid config that
/// reads `dsp_directory.csv` and `fedex_directory.csv` from the working
/// directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Sources in merge order.
    pub sources: Vec<SourceSpec>,
    pub page_size: usize,
    /// Column dropped from the displayed column list.
    pub excluded_column: String,
    /// Name columns renamed to `Company`, tried in order, case-insensitive.
    pub name_aliases: Vec<String>,
    /// Display columns that are not offered as filter selectors.
    pub unfiltered_columns: Vec<String>,
    /// Collapse whitespace runs and trim every cell while normalizing.
    pub collapse_whitespace: bool,
    /// Populate an empty `Region` cell from the row's `Country`.
    pub fill_region: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceSpec::new("dsp_directory.csv", "DSP"),
                SourceSpec::new("fedex_directory.csv", "FedEx"),
            ],
            page_size: DEFAULT_PAGE_SIZE,
            excluded_column: EXCLUDED_COLUMN.to_string(),
            name_aliases: vec![SOURCE_NAME_COLUMN.to_string()],
            unfiltered_columns: vec!["Street Address".to_string(), COMPANY_COLUMN.to_string()],
            collapse_whitespace: false,
            fill_region: false,
        }
    }
}

impl DirectoryConfig {
    /// Read a JSON config file. Relative source locations are resolved
    /// against the directory containing the file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DirectoryError::Config(format!("reading {}: {e}", path.display())))?;
        let mut config = Self::from_json_str(&text)?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| DirectoryError::Config(format!("parsing config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(DirectoryError::Config("page_size must be at least 1".into()));
        }
        if self.sources.is_empty() {
            return Err(DirectoryError::Config("no sources configured".into()));
        }
        if let Some(src) = self.sources.iter().find(|s| s.label.trim().is_empty()) {
            return Err(DirectoryError::Config(format!(
                "source {} has an empty label",
                src.display_name()
            )));
        }
        Ok(())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for src in &mut self.sources {
            if src.location.is_relative() {
                src.location = base.join(&src.location);
            }
        }
    }
}
