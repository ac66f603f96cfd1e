use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};

/// Capture date-time in the camera's local wall-clock terms
pub type CaptureTimestamp = NaiveDateTime;

/// Supported image formats
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Tiff,
    Heif,
    Png,
    Webp,
    Other(String),
}

impl ImageFormat {
    /// Determine format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "tif" | "tiff" => Self::Tiff,
            "heic" | "heif" => Self::Heif,
            "png" => Self::Png,
            "webp" => Self::Webp,
            other => Self::Other(other.to_string()),
        }
    }

    /// Check if format can carry EXIF data we know how to read
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// A file on disk that takes part in a sort
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageFile {
    /// Absolute path to the file
    pub path: PathBuf,
}

impl ImageFile {
    /// Wrap a path, anchoring relative paths at the current directory
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        Self { path }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn is_file(&self) -> bool {
        self.path.is_file()
    }

    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(ImageFormat::from_extension)
    }
}

impl AsRef<Path> for ImageFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Folder name shared by every photo taken on the same calendar day.
///
/// Rendered as `YYYY_MM_DD - `; the trailing separator leaves room for a
/// human-written suffix such as an event name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    pub(crate) fn from_string(key: String) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for GroupKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for GroupKey {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// One file that ended up in a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedFile {
    /// Where the file was before the sort
    pub source: PathBuf,

    /// Where the file lives now
    pub destination: PathBuf,
}

/// Outcome for a single date bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortedBucket {
    pub key: GroupKey,

    /// Directory the bucket was materialized as
    pub directory: PathBuf,

    /// Files moved into `directory`, in grouping order
    pub files: Vec<MovedFile>,
}

/// Report returned by a completed sort
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortResult {
    pub buckets: Vec<SortedBucket>,
}

impl SortResult {
    /// Total number of files moved across all buckets
    pub fn moved_count(&self) -> usize {
        self.buckets.iter().map(|b| b.files.len()).sum()
    }

    pub fn bucket(&self, key: &str) -> Option<&SortedBucket> {
        self.buckets.iter().find(|b| b.key.as_str() == key)
    }
}
