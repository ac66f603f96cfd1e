use indicatif::ProgressBar;
use log::{debug, error, info};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::CollisionPolicy;
use crate::error::{Error, Result};
use crate::grouping::Grouping;
use crate::logging::{log_file_error, log_fs_modification};
use crate::types::{GroupKey, ImageFile, MovedFile, SortResult, SortedBucket};

/// Highest " (n)" suffix tried before giving up on a free name
const MAX_RENAME_ATTEMPTS: usize = 1000;

/// Materializes a [`Grouping`] as one directory per day under a root
pub struct DirectorySorter {
    collision_policy: CollisionPolicy,
    progress: ProgressBar,
}

impl Default for DirectorySorter {
    fn default() -> Self {
        Self::new(CollisionPolicy::default())
    }
}

impl DirectorySorter {
    pub fn new(collision_policy: CollisionPolicy) -> Self {
        Self {
            collision_policy,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report each moved file on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Move every grouped file into `root/<key>/`.
    ///
    /// The first failure aborts the run. Files already moved stay where
    /// they were put.
    pub fn sort(&self, grouping: &Grouping, root: &Path) -> Result<SortResult> {
        let root = prepare_root(root)?;
        info!("Root folder is '{}'", root.display());

        self.progress.set_length(grouping.file_count() as u64);

        let mut result = SortResult::default();
        for (key, files) in grouping.iter() {
            info!("Processing folder '{}' has {} files", key, files.len());

            let directory = prepare_bucket(&root, key)?;
            let mut moved = Vec::with_capacity(files.len());
            for file in files {
                moved.push(self.move_into(file, &directory)?);
                self.progress.inc(1);
            }

            result.buckets.push(SortedBucket {
                key: key.clone(),
                directory,
                files: moved,
            });
        }

        self.progress.finish_and_clear();
        info!(
            "Moved {} files into {} folders",
            result.moved_count(),
            result.buckets.len()
        );
        Ok(result)
    }

    fn move_into(&self, file: &ImageFile, directory: &Path) -> Result<MovedFile> {
        let name = file.file_name().ok_or_else(|| Error::MoveFailed {
            file: file.path.clone(),
            destination: directory.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        })?;

        let mut destination = directory.join(name);
        if destination == file.path {
            debug!("{} is already in place", file.path.display());
            return Ok(MovedFile {
                source: file.path.clone(),
                destination,
            });
        }

        if self.collision_policy == CollisionPolicy::Rename && destination.exists() {
            destination = free_name(&destination).ok_or_else(|| Error::MoveFailed {
                file: file.path.clone(),
                destination: destination.clone(),
                source: io::Error::new(io::ErrorKind::AlreadyExists, "no free file name left"),
            })?;
        }

        move_file(&file.path, &destination).map_err(|e| {
            log_file_error(&file.path, "move", &e);
            Error::MoveFailed {
                file: file.path.clone(),
                destination: destination.clone(),
                source: e,
            }
        })?;

        log_fs_modification("move", &file.path, Some(&destination.display().to_string()));
        Ok(MovedFile {
            source: file.path.clone(),
            destination,
        })
    }
}

/// Make sure `root` is a usable directory, creating it when absent.
/// Returns the root anchored the same way as [`ImageFile`] paths.
fn prepare_root(root: &Path) -> Result<PathBuf> {
    let root = std::path::absolute(root).map_err(|e| Error::RootCreationFailed {
        path: root.to_path_buf(),
        source: e,
    })?;

    if root.exists() {
        if !root.is_dir() {
            error!("Folder {} was not a directory", root.display());
            return Err(Error::InvalidRoot(root));
        }
        return Ok(root);
    }

    if let Err(e) = fs::create_dir_all(&root) {
        log_file_error(&root, "create_root", &e);
        return Err(Error::RootCreationFailed { path: root, source: e });
    }
    log_fs_modification("create_dir", &root, None);
    Ok(root)
}

/// Create or reuse the directory for one bucket
fn prepare_bucket(root: &Path, key: &GroupKey) -> Result<PathBuf> {
    let directory = root.join(key);

    if directory.exists() {
        if directory.is_dir() {
            debug!("Reusing existing folder {}", directory.display());
            return Ok(directory);
        }
        error!("Path at {} is in the way of bucket '{}'", directory.display(), key);
        return Err(Error::BucketConflict {
            key: key.to_string(),
            path: directory,
        });
    }

    match fs::create_dir(&directory) {
        Ok(()) => {
            log_fs_modification("create_dir", &directory, None);
            Ok(directory)
        }
        Err(e) => {
            log_file_error(&directory, "create_bucket", &e);
            Err(Error::BucketCreationFailed {
                key: key.to_string(),
                path: directory,
                source: e,
            })
        }
    }
}

/// Rename, falling back to copy and delete when crossing filesystems.
/// Replaces whatever already sits at `destination`.
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if rename_err.kind() != io::ErrorKind::CrossesDevices || !source.is_file() {
                return Err(rename_err);
            }
            debug!(
                "Rename of {} failed ({}), copying instead",
                source.display(),
                rename_err
            );
            fs::copy(source, destination)?;
            fs::remove_file(source)
        }
    }
}

/// First "name (n).ext" next to `taken` that does not exist yet
fn free_name(taken: &Path) -> Option<PathBuf> {
    let stem = taken.file_stem()?.to_os_string();
    let extension = taken.extension().map(|e| e.to_os_string());

    (1..=MAX_RENAME_ATTEMPTS)
        .map(|n| {
            let mut name = OsString::from(&stem);
            name.push(format!(" ({})", n));
            if let Some(ext) = &extension {
                name.push(".");
                name.push(ext);
            }
            taken.with_file_name(name)
        })
        .find(|candidate| !candidate.exists())
}
