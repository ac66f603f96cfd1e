use log::{debug, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{ImageFile, ImageFormat};

/// Collect the image files named by `sources`.
///
/// Directories contribute their direct children only; files are taken
/// as given. Output follows source order, then file name.
pub fn discover_images<P: AsRef<Path>>(sources: &[P], config: &Config) -> Result<Vec<ImageFile>> {
    let paths: Vec<PathBuf> = sources
        .iter()
        .map(|source| source.as_ref().to_path_buf())
        .collect();

    paths
        .par_iter()
        .map(|source| discover_source(source, config))
        .collect::<Vec<Result<Vec<ImageFile>>>>()
        .into_iter()
        .try_fold(Vec::new(), |mut acc, result| {
            acc.extend(result?);
            Ok(acc)
        })
}

fn discover_source(source: &Path, config: &Config) -> Result<Vec<ImageFile>> {
    if !source.exists() {
        return Err(Error::NotFound(source.to_path_buf()));
    }

    if source.is_file() {
        return Ok(vec![ImageFile::new(source)]);
    }

    discover_images_in_directory(source, config)
}

/// List image files directly inside `directory`
fn discover_images_in_directory(directory: &Path, config: &Config) -> Result<Vec<ImageFile>> {
    let mut image_files = Vec::new();

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", directory.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        match get_image_format(path) {
            Some(format) if format.is_supported() || config.process_unsupported_formats => {
                image_files.push(ImageFile::new(path));
            }
            _ => debug!("Ignoring {}", path.display()),
        }
    }

    debug!("Found {} images in {}", image_files.len(), directory.display());
    Ok(image_files)
}

/// Get image format from file extension
fn get_image_format(path: &Path) -> Option<ImageFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(ImageFormat::from_extension)
}

// -- Tests --
