use log::{debug, info, warn};
use std::collections::HashMap;

use crate::config::MissingTimestampPolicy;
use crate::date_key::format_key;
use crate::error::{Error, Result};
use crate::metadata::MetadataProvider;
use crate::types::{GroupKey, ImageFile};

/// Files bucketed by capture day.
///
/// Keys iterate in the order they were first seen and files keep their
/// input order inside each bucket.
#[derive(Debug, Default)]
pub struct Grouping {
    buckets: Vec<(GroupKey, Vec<ImageFile>)>,
    index: HashMap<GroupKey, usize>,
    skipped: Vec<(ImageFile, Error)>,
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `file` to the bucket for `key`, opening the bucket if needed
    pub fn insert(&mut self, key: GroupKey, file: ImageFile) {
        match self.index.get(&key) {
            Some(&slot) => {
                let files = &mut self.buckets[slot].1;
                files.push(file);
                debug!("{} now has {} files in it", key, files.len());
            }
            None => {
                debug!("Added {} to new slot '{}'", file.path.display(), key);
                self.index.insert(key.clone(), self.buckets.len());
                self.buckets.push((key, vec![file]));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[ImageFile]> {
        self.index
            .get(key)
            .map(|&slot| self.buckets[slot].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[ImageFile])> {
        self.buckets.iter().map(|(k, files)| (k, files.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.buckets.iter().map(|(k, _)| k)
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of files across every bucket
    pub fn file_count(&self) -> usize {
        self.buckets.iter().map(|(_, files)| files.len()).sum()
    }

    /// Files left out because their capture date could not be read
    pub fn skipped(&self) -> &[(ImageFile, Error)] {
        &self.skipped
    }
}

/// Buckets files by the day their photo was taken
pub struct FileGrouper<M> {
    provider: M,
    missing_timestamp: MissingTimestampPolicy,
}

impl<M: MetadataProvider> FileGrouper<M> {
    pub fn new(provider: M) -> Self {
        Self {
            provider,
            missing_timestamp: MissingTimestampPolicy::Abort,
        }
    }

    pub fn with_missing_timestamp(mut self, policy: MissingTimestampPolicy) -> Self {
        self.missing_timestamp = policy;
        self
    }

    /// Group `files` by capture day.
    ///
    /// Under [`MissingTimestampPolicy::Abort`] the first extraction failure
    /// is returned and nothing else is produced.
    pub fn group<I>(&self, files: I) -> Result<Grouping>
    where
        I: IntoIterator<Item = ImageFile>,
    {
        let mut grouping = Grouping::new();

        for file in files {
            match self.provider.capture_date(&file.path) {
                Ok(date) => {
                    let key = format_key(&date);
                    debug!("Date for file {} = {} ==> '{}'", file.path.display(), date, key);
                    grouping.insert(key, file);
                }
                Err(e) => match self.missing_timestamp {
                    MissingTimestampPolicy::Abort => return Err(e),
                    MissingTimestampPolicy::Skip => {
                        warn!("Skipping {}: {}", file.path.display(), e);
                        grouping.skipped.push((file, e));
                    }
                },
            }
        }

        info!(
            "There are now {} stamps holding {} files ({} skipped)",
            grouping.len(),
            grouping.file_count(),
            grouping.skipped.len()
        );
        Ok(grouping)
    }
}
