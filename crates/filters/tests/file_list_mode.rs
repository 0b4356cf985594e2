//! Integration tests for files-from lists.
//!
//! Once any path has been listed, the filter answers purely from the list:
//! listed files are included, ancestors of listed files are entered, and
//! everything else is skipped regardless of rules and bounds.

use filters::{Filter, FilterConfig, SizeSuffix};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use test_support::{pattern_file, write_file};

#[test]
fn listed_files_and_their_ancestors() {
    let list = pattern_file("docs/guide/intro.md\nREADME.md\n");
    let config = FilterConfig {
        files_from: vec![list.path().to_path_buf()],
        ..FilterConfig::default()
    };
    let filter = Filter::from_config(&config).unwrap();

    assert!(filter.is_active());
    assert!(filter.include("README.md", 0, UNIX_EPOCH));
    assert!(filter.include("docs/guide/intro.md", 0, UNIX_EPOCH));
    assert!(!filter.include("docs/guide/other.md", 0, UNIX_EPOCH));

    assert!(filter.include_directory("docs"));
    assert!(filter.include_directory("docs/guide"));
    assert!(!filter.include_directory("docs/api"));
    assert!(!filter.include_directory("src"));

    let files = filter.files().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files.dir_count(), 2);
}

#[test]
fn several_lists_are_merged() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_file(dir.path(), "first.txt", "a/one\n");
    let second = write_file(dir.path(), "second.txt", "# listed later\nb/two\n");
    let config = FilterConfig {
        files_from: vec![first, second],
        ..FilterConfig::default()
    };
    let filter = Filter::from_config(&config).unwrap();

    assert!(filter.include("a/one", 0, UNIX_EPOCH));
    assert!(filter.include("b/two", 0, UNIX_EPOCH));
    assert!(filter.include_directory("a"));
    assert!(filter.include_directory("b"));
}

#[test]
fn rules_and_bounds_are_ignored() {
    let list = pattern_file("big/archive.iso\n");
    let config = FilterConfig {
        exclude: vec!["*.iso".into(), "big/".into()],
        files_from: vec![list.path().to_path_buf()],
        max_size: SizeSuffix::from_bytes(10),
        max_age: Some("1s".into()),
        ..FilterConfig::default()
    };
    let filter = Filter::from_config(&config).unwrap();

    let ancient = UNIX_EPOCH + Duration::from_secs(1);
    assert!(filter.include("big/archive.iso", 1 << 30, ancient));
    assert!(filter.include_directory("big"));
    assert!(!filter.include("small.txt", 1, SystemTime::now()));
}

#[test]
fn listed_paths_match_exactly() {
    let mut filter = Filter::new();
    filter.add_file("a/b.txt");

    assert!(filter.include("a/b.txt", 0, UNIX_EPOCH));
    assert!(!filter.include("A/b.txt", 0, UNIX_EPOCH));
    assert!(!filter.include("a/b.txt.bak", 0, UNIX_EPOCH));
    assert!(!filter.include("b.txt", 0, UNIX_EPOCH));
}

#[test]
fn empty_list_file_leaves_filter_open() {
    // A list with no entries never adds a path, so the filter stays open.
    let list = pattern_file("# nothing listed\n");
    let config = FilterConfig {
        files_from: vec![list.path().to_path_buf()],
        ..FilterConfig::default()
    };
    let filter = Filter::from_config(&config).unwrap();

    assert!(filter.files().is_none());
    assert!(!filter.is_active());
    assert!(filter.include("anything", 0, UNIX_EPOCH));
}
