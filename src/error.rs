use std::io;

use thiserror::Error;

/// Errors raised while loading or configuring a directory.
///
/// Query, filter and paging operations over an already loaded dataset never
/// fail, so they have no variant here.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("source '{source_name}' could not be loaded: {reason}")]
    Load { source_name: String, reason: String },
    #[error("source '{source_name}' is not valid CSV: {reason}")]
    Parse { source_name: String, reason: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DirectoryError {
    pub fn load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        DirectoryError::Load {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(source_name: impl Into<String>, reason: impl ToString) -> Self {
        DirectoryError::Parse {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
