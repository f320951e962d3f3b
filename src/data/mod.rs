/// Data layer: loading, normalization, merging, querying and paging.
///
/// Architecture:
/// ```text
///  dsp_directory.csv   fedex_directory.csv
///        │                    │
///        ▼                    ▼
///   ┌──────────────────────────────┐
///   │ loader     one worker/source │  CSV text → RawTable
///   └──────────────────────────────┘
///        │  (join: all or nothing)
///        ▼
///   ┌───────────┐
///   │ normalize │  DSP Name → Company, stamp Type
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  merge    │  concatenate → Dataset + column list
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐      ┌───────────┐
///   │  filter   │ ───▶ │  pager    │  search / filters → page of rows
///   └───────────┘      └───────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod pager;

use crate::config::DirectoryConfig;
use crate::error::Result;

use model::Dataset;
use normalize::NormalizeOptions;

/// Load every configured source, normalize and merge them.
///
/// Either every source loads and the merged dataset is returned, or the first
/// failure is.
pub fn load_directory(config: &DirectoryConfig) -> Result<Dataset> {
    config.validate()?;
    let tables = loader::load_sources(&config.sources)?;
    let opts = NormalizeOptions::from(config);

    let batches = tables
        .iter()
        .zip(&config.sources)
        .map(|(table, src)| normalize::normalize_table(table, &src.label, &opts))
        .collect();

    Ok(merge::merge(batches, &config.excluded_column))
}
