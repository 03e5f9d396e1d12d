//! Errors from loading source files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// A file or directory that could not be loaded.
///
/// Scans log these and move on; only [`Registry::update`] hands one back
/// to the caller.
///
/// [`Registry::update`]: super::Registry::update
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("directory not found: {}", .path.display())]
    NotFound { path: PathBuf },
}

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;
