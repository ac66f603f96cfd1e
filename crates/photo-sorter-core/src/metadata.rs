//! Capture-date extraction.
//!
//! Everything EXIF-specific stays inside this module: callers only ever see
//! a [`CaptureTimestamp`] or one of the crate's own errors.

use chrono::NaiveDate;
use exif::{In, Reader, Tag, Value};
use log::debug;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::CaptureTimestamp;

/// Source of capture dates for files on disk
pub trait MetadataProvider {
    /// Return the moment the photo at `path` was originally taken
    fn capture_date(&self, path: &Path) -> Result<CaptureTimestamp>;
}

impl<F> MetadataProvider for F
where
    F: Fn(&Path) -> Result<CaptureTimestamp>,
{
    fn capture_date(&self, path: &Path) -> Result<CaptureTimestamp> {
        self(path)
    }
}

/// Reads `DateTimeOriginal` from the EXIF block of an image container
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifMetadataProvider;

impl MetadataProvider for ExifMetadataProvider {
    fn capture_date(&self, path: &Path) -> Result<CaptureTimestamp> {
        let exif = read_exif(path)?;

        let field = exif
            .get_field(Tag::DateTimeOriginal, In::PRIMARY)
            .ok_or_else(|| Error::no_timestamp(path, "no DateTimeOriginal field"))?;

        let raw = match &field.value {
            Value::Ascii(values) if !values.is_empty() => &values[0],
            _ => return Err(Error::no_timestamp(path, "DateTimeOriginal is not text")),
        };

        let stamp = exif::DateTime::from_ascii(raw).map_err(|e| Error::no_timestamp(path, e))?;

        let date = NaiveDate::from_ymd_opt(stamp.year.into(), stamp.month.into(), stamp.day.into())
            .and_then(|d| {
                d.and_hms_opt(stamp.hour.into(), stamp.minute.into(), stamp.second.into())
            })
            .ok_or_else(|| Error::no_timestamp(path, format!("invalid date {}", stamp)))?;

        debug!("Date extracted for {} = {}", path.display(), date);
        Ok(date)
    }
}

/// A decoded EXIF tag, flattened to strings for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExifField {
    pub ifd: String,
    pub tag: String,
    pub value: String,
}

/// Dump every EXIF field in the file at `path`
pub fn read_exif_fields(path: &Path) -> Result<Vec<ExifField>> {
    let exif = read_exif(path)?;

    let fields = exif
        .fields()
        .map(|field| ExifField {
            ifd: field.ifd_num.to_string(),
            tag: field.tag.to_string(),
            value: field.display_value().with_unit(&exif).to_string(),
        })
        .collect::<Vec<_>>();

    debug!("Read {} EXIF fields from {}", fields.len(), path.display());
    Ok(fields)
}

/// Open and decode the EXIF container, normalising every failure
fn read_exif(path: &Path) -> Result<exif::Exif> {
    check_regular_file(path)?;

    let file = File::open(path).map_err(|e| Error::no_timestamp(path, e))?;
    let mut reader = BufReader::new(file);

    Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| Error::no_timestamp(path, e))
}

fn check_regular_file(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Err(Error::UnsupportedEntry(path.to_path_buf())),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::NotFound(path.to_path_buf())),
        Err(e) => Err(Error::no_timestamp(path, e)),
    }
}
