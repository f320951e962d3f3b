//! Merged delivery partner directory.
//!
//! Loads the DSP and FedEx ISP directories from CSV, merges them into one
//! [`Dataset`], and serves search, per-column filters and paging through an
//! immutable [`ViewState`].
//!
//! ```no_run
//! use delivery_directory::{load_directory, DirectoryConfig, Event, ViewState};
//!
//! let config = DirectoryConfig::default();
//! let state = ViewState::new(&config);
//! let state = match load_directory(&config) {
//!     Ok(ds) => state.apply(Event::Loaded(ds)),
//!     Err(e) => state.apply(Event::LoadFailed(e.to_string())),
//! };
//! let state = state.apply(Event::SearchChanged("austin".into()));
//! println!("{} matches", state.table().total_entries);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod state;

pub use config::{DirectoryConfig, SourceSpec};
pub use data::load_directory;
pub use data::model::{Dataset, Record};
pub use data::pager::Navigation;
pub use error::DirectoryError;
pub use state::{Event, LoadStatus, TableView, ViewState};
