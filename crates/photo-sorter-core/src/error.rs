use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the photo-sorter library
#[derive(Error, Debug)]
pub enum Error {
    /// Referenced path does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A directory was given where a regular file was expected
    #[error("Directories are not supported here: {}", .0.display())]
    UnsupportedEntry(PathBuf),

    /// The file carries no usable capture date
    #[error("No capture timestamp in {}: {reason}", .path.display())]
    NoTimestamp { path: PathBuf, reason: String },

    /// Destination root exists but is not a directory
    #[error("Destination root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// Destination root could not be created
    #[error("Couldn't create destination root {}: {source}", .path.display())]
    RootCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Bucket path is occupied by something that is not a directory
    #[error("Bucket '{key}' at {} exists but is not a directory", .path.display())]
    BucketConflict { key: String, path: PathBuf },

    /// Bucket directory could not be created
    #[error("Couldn't create bucket '{key}' at {}: {source}", .path.display())]
    BucketCreationFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file could not be relocated into its bucket
    #[error("Failed to move {} to {}: {source}", .file.display(), .destination.display())]
    MoveFailed {
        file: PathBuf,
        destination: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl Error {
    pub(crate) fn no_timestamp(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::NoTimestamp {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
