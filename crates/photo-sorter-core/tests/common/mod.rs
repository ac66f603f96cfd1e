#![allow(dead_code)]

// Share the EXIF fixture builder with the unit tests
#[path = "../../src/test_utils/mod.rs"]
mod test_utils;

use std::path::{Path, PathBuf};
use test_utils::{jpeg_with_date_original, write_file};

/// The reference library: one photo from 2013 and a burst of four from 2015
pub const FIXTURE_IMAGES: [(&str, &str); 5] = [
    ("IMG_20130316_233621.jpg", "2013:03:16 23:36:21"),
    ("2015-05-14 12.46.44.jpg", "2015:05:14 12:46:44"),
    ("2015-05-14 12.46.37.jpg", "2015:05:14 12:46:37"),
    ("2015-05-14 12.46.33.jpg", "2015:05:14 12:46:33"),
    ("2015-05-14 12.46.28.jpg", "2015:05:14 12:46:28"),
];

/// Create a JPEG carrying `stamp` as its EXIF DateTimeOriginal
pub fn create_dated_image(dir: &Path, name: &str, stamp: &str) -> PathBuf {
    write_file(dir, name, &jpeg_with_date_original(stamp))
}

/// Create an image file with no metadata at all
pub fn create_undated_image(dir: &Path, name: &str) -> PathBuf {
    write_file(dir, name, b"DUMMY IMAGE DATA")
}

/// Populate `dir` with [`FIXTURE_IMAGES`]
pub fn create_fixture_images(dir: &Path) -> Vec<PathBuf> {
    FIXTURE_IMAGES
        .iter()
        .map(|(name, stamp)| create_dated_image(dir, name, stamp))
        .collect()
}
