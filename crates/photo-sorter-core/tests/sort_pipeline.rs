mod common;

use common::{create_dated_image, create_fixture_images, create_undated_image};
use photo_sorter_core::{
    CollisionPolicy, Config, Error, ExifMetadataProvider, FileGrouper, ImageFile,
    MetadataProvider, MissingTimestampPolicy, PhotoSorter,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_capture_date_of_fixture_image() {
    let source = tempdir().unwrap();
    let files = create_fixture_images(source.path());

    let date = ExifMetadataProvider.capture_date(&files[0]).unwrap();
    assert_eq!(date.to_string(), "2013-03-16 23:36:21");
}

#[test]
fn test_fixture_groups_into_two_days() {
    let source = tempdir().unwrap();
    let files = create_fixture_images(source.path());
    let images: Vec<ImageFile> = files.iter().map(ImageFile::new).collect();

    let grouping = FileGrouper::new(ExifMetadataProvider)
        .group(images.clone())
        .unwrap();

    assert_eq!(grouping.len(), 2);
    assert_eq!(grouping.file_count(), files.len());
    assert_eq!(grouping.get("2013_03_16 - ").unwrap(), &images[..1]);
    assert_eq!(grouping.get("2015_05_14 - ").unwrap(), &images[1..]);
}

#[test]
fn test_undated_file_fails_grouping() {
    let source = tempdir().unwrap();
    let mut files = create_fixture_images(source.path());
    files.push(create_undated_image(source.path(), "scan.jpg"));
    let images: Vec<ImageFile> = files.iter().map(ImageFile::new).collect();

    let result = FileGrouper::new(ExifMetadataProvider).group(images);
    assert!(matches!(result, Err(Error::NoTimestamp { .. })));
}

#[test]
fn test_run_moves_library_into_day_folders() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let root = dest.path().join("sorted");
    let files = create_fixture_images(source.path());

    let result = PhotoSorter::new(Config::default())
        .run(&[source.path()], &root)
        .unwrap();

    assert_eq!(result.buckets.len(), 2);
    assert_eq!(result.moved_count(), 5);
    for file in &files {
        assert!(!file.exists(), "{} should have moved", file.display());
    }
    assert!(root.join("2013_03_16 - ").join("IMG_20130316_233621.jpg").is_file());
    assert_eq!(fs::read_dir(root.join("2015_05_14 - ")).unwrap().count(), 4);
}

#[test]
fn test_second_run_reuses_existing_folders() {
    let dest = tempdir().unwrap();
    let sorter = PhotoSorter::new(Config::default());

    let first = tempdir().unwrap();
    create_dated_image(first.path(), "a.jpg", "2015:05:14 09:00:00");
    sorter.run(&[first.path()], dest.path()).unwrap();

    let second = tempdir().unwrap();
    create_dated_image(second.path(), "b.jpg", "2015:05:14 18:30:00");
    let result = sorter.run(&[second.path()], dest.path()).unwrap();

    assert_eq!(result.moved_count(), 1);
    let bucket = dest.path().join("2015_05_14 - ");
    assert!(bucket.join("a.jpg").is_file());
    assert!(bucket.join("b.jpg").is_file());
}

#[test]
fn test_sorting_an_already_sorted_bucket_is_a_no_op() {
    let dest = tempdir().unwrap();
    let bucket = dest.path().join("2015_05_14 - ");
    let placed = create_dated_image(&bucket, "a.jpg", "2015:05:14 09:00:00");

    let mut config = Config::default();
    config.collision_policy = CollisionPolicy::Rename;
    let result = PhotoSorter::new(config)
        .run(&[placed.clone()], dest.path())
        .unwrap();

    assert_eq!(result.buckets[0].files[0].destination, placed);
    assert_eq!(fs::read_dir(&bucket).unwrap().count(), 1);
}

#[test]
fn test_root_that_is_a_file_moves_nothing() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let files = create_fixture_images(source.path());
    let root = dest.path().join("photos");
    fs::write(&root, b"not a directory").unwrap();

    let result = PhotoSorter::new(Config::default()).run(&[source.path()], &root);

    assert!(matches!(result, Err(Error::InvalidRoot(_))));
    for file in &files {
        assert!(file.exists());
    }
}

#[test]
fn test_skip_policy_leaves_undated_files_behind() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    create_fixture_images(source.path());
    let undated = create_undated_image(source.path(), "scan.jpg");

    let mut config = Config::default();
    config.missing_timestamp = MissingTimestampPolicy::Skip;
    let sorter = PhotoSorter::new(config);

    let images = sorter.discover(&[source.path()]).unwrap();
    let grouping = sorter.group(images).unwrap();
    assert_eq!(grouping.skipped().len(), 1);

    let result = sorter.sort(&grouping, dest.path()).unwrap();
    assert_eq!(result.moved_count(), 5);
    assert!(undated.exists());
}

#[test]
fn test_sort_result_serializes_to_json() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    create_dated_image(source.path(), "a.jpg", "2013:03:16 23:36:21");

    let result = PhotoSorter::new(Config::default())
        .run(&[source.path()], dest.path())
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["buckets"][0]["key"], "2013_03_16 - ");
    assert_eq!(json["buckets"][0]["files"].as_array().unwrap().len(), 1);
}
