//! Core functionality for sorting photos into per-day folders.
//!
//! This library provides the building blocks of the sort:
//! - Input discovery and capture-date extraction
//! - Day keys and grouping of files that share one
//! - Creating the day folders and moving files into them

// -- External Dependencies --

use indicatif::{ProgressBar, ProgressStyle};
use log::info;

// -- Standard Library --
use std::path::Path;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use date_key::format_key;
pub use error::{Error, Result};
pub use grouping::{FileGrouper, Grouping};
pub use metadata::{read_exif_fields, ExifField, ExifMetadataProvider, MetadataProvider};
pub use sorter::DirectorySorter;
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod date_key;
pub mod discovery;
pub mod grouping;
pub mod logging;
pub mod metadata;
pub mod sorter;
pub mod types;

// -- Test Modules --
#[cfg(test)]
pub mod test_utils;

/// Main entry point for a sorting run
pub struct PhotoSorter<M = ExifMetadataProvider> {
    config: Config,
    provider: M,
}

impl PhotoSorter {
    /// Create a new PhotoSorter that reads capture dates from EXIF
    pub fn new(config: Config) -> Self {
        Self::with_provider(config, ExifMetadataProvider)
    }
}

impl<M: MetadataProvider> PhotoSorter<M> {
    /// Create a PhotoSorter backed by a custom date source
    pub fn with_provider(config: Config, provider: M) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Discover all images in the provided sources
    pub fn discover(&self, sources: &[impl AsRef<Path>]) -> Result<Vec<ImageFile>> {
        discovery::discover_images(sources, &self.config)
    }

    /// Bucket files by capture day
    pub fn group(&self, files: Vec<ImageFile>) -> Result<Grouping> {
        FileGrouper::new(|path: &Path| self.provider.capture_date(path))
            .with_missing_timestamp(self.config.missing_timestamp)
            .group(files)
    }

    /// Move grouped files under `destination`
    pub fn sort(&self, grouping: &Grouping, destination: &Path) -> Result<SortResult> {
        DirectorySorter::new(self.config.collision_policy)
            .with_progress(self.progress_bar())
            .sort(grouping, destination)
    }

    /// Run the full pipeline: discover, group, then sort
    pub fn run(&self, sources: &[impl AsRef<Path>], destination: &Path) -> Result<SortResult> {
        info!("Discovering images...");
        let images = self.discover(sources)?;
        info!("Found {} images", images.len());

        let grouping = self.group(images)?;
        self.sort(&grouping, destination)
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(0);
        match ProgressStyle::default_bar()
            .template("[{eta}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
        {
            Ok(style) => progress_bar.set_style(style.progress_chars("##-")),
            Err(e) => log::warn!("Falling back to the default progress style: {}", e),
        }
        progress_bar.set_message("Moving photos...");
        progress_bar
    }
}
