#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `contents` to `dir/name`, creating `dir` if needed
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();

    let file_path = dir.join(name);
    let mut file = File::create(&file_path).unwrap();
    file.write_all(contents).unwrap();
    file_path
}

/// Minimal little-endian TIFF block: IFD0 pointing at an Exif IFD that
/// holds a single DateTimeOriginal entry.
pub fn tiff_with_date_original(stamp: &str) -> Vec<u8> {
    let mut value = stamp.as_bytes().to_vec();
    value.push(0);

    const IFD0: u32 = 8;
    const EXIF_IFD: u32 = IFD0 + 2 + 12 + 4;
    const VALUE: u32 = EXIF_IFD + 2 + 12 + 4;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II*\0");
    tiff.extend_from_slice(&IFD0.to_le_bytes());

    // IFD0: ExifIFDPointer
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x8769u16.to_le_bytes());
    tiff.extend_from_slice(&4u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&EXIF_IFD.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    // Exif IFD: DateTimeOriginal
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x9003u16.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());
    tiff.extend_from_slice(&(value.len() as u32).to_le_bytes());
    tiff.extend_from_slice(&VALUE.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    tiff.extend_from_slice(&value);
    tiff
}

/// JPEG consisting of SOI, one APP1 Exif segment and EOI
pub fn jpeg_with_date_original(stamp: &str) -> Vec<u8> {
    let tiff = tiff_with_date_original(stamp);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    let segment_len = (2 + 6 + tiff.len()) as u16;
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}
