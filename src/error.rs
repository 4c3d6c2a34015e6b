//! Error type shared by the image and point cloud loaders.
//!
//! Platform capabilities report failures as [`anyhow::Error`]; the loaders wrap
//! them into a [`LoadError`] so callers can tell which step went wrong while
//! still reaching the underlying cause through [`std::error::Error::source`].

use instant::Duration;

/// Everything that can go wrong while loading an image or a point cloud.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The image could not be fetched or decoded (network error, 404, CORS
    /// rejection, corrupt data, ...).
    #[error("failed to load image {url}")]
    ImageLoad {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    /// The resource behind `path` could not be fetched.
    #[error("failed to fetch {path}")]
    Fetch {
        path: String,
        #[source]
        source: anyhow::Error,
    },
    /// A CSV field was missing or not a number. Only raised by
    /// [`ParseMode::Strict`](crate::config::ParseMode::Strict). Lines and
    /// columns are counted from 1, the header being line 1.
    #[error("invalid number {field:?} at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        field: String,
    },
    #[error("loading {target} timed out after {after:?}")]
    Timeout { target: String, after: Duration },
}

pub type Result<T> = std::result::Result<T, LoadError>;
