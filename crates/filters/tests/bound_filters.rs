//! Integration tests for size and modification-time bounds.

use filters::{Filter, FilterConfig, FilterError, Object, ParseAgeError, SizeSuffix};
use std::cell::Cell;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const DAY: Duration = Duration::from_secs(86_400);

fn now() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

fn aged(min_age: Option<&str>, max_age: Option<&str>) -> Result<Filter, FilterError> {
    let config = FilterConfig {
        min_age: min_age.map(str::to_owned),
        max_age: max_age.map(str::to_owned),
        ..FilterConfig::default()
    };
    Filter::from_config_at(&config, now())
}

// ============================================================================
// Age bounds
// ============================================================================

#[test]
fn max_age_sets_oldest_accepted_time() {
    let filter = aged(None, Some("2d")).unwrap();
    let bound = now() - 2 * DAY;

    assert_eq!(filter.mod_time_from(), Some(bound));
    assert_eq!(filter.mod_time_to(), None);
    assert!(filter.include("fresh", 0, now()));
    assert!(filter.include("edge", 0, bound));
    assert!(!filter.include("stale", 0, bound - Duration::from_secs(1)));
}

#[test]
fn min_age_sets_newest_accepted_time() {
    let filter = aged(Some("1h"), None).unwrap();
    let bound = now() - Duration::from_secs(3600);

    assert_eq!(filter.mod_time_to(), Some(bound));
    assert!(filter.include("settled", 0, bound));
    assert!(!filter.include("just written", 0, now()));
}

#[test]
fn both_ages_form_a_window() {
    let filter = aged(Some("1d"), Some("1w")).unwrap();
    assert!(filter.include("inside", 0, now() - 3 * DAY));
    assert!(!filter.include("too new", 0, now() - Duration::from_secs(60)));
    assert!(!filter.include("too old", 0, now() - 8 * DAY));
}

#[test]
fn equal_ages_accept_a_single_instant() {
    let filter = aged(Some("1d"), Some("1d")).unwrap();
    assert!(filter.include("exact", 0, now() - DAY));
    assert!(!filter.include("later", 0, now() - DAY + Duration::from_nanos(1)));
}

#[test]
fn min_age_older_than_max_age_is_rejected() {
    let err = aged(Some("1w"), Some("1d")).unwrap_err();
    assert!(matches!(err, FilterError::AgeRange));
    assert_eq!(
        err.to_string(),
        "argument --min-age can't be larger than --max-age"
    );
}

#[test]
fn unparsable_age_names_its_option() {
    match aged(None, Some("soon")).unwrap_err() {
        FilterError::Age { option, source } => {
            assert_eq!(option, "--max-age");
            assert!(matches!(source, ParseAgeError::InvalidNumber { .. }));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn negative_age_is_rejected() {
    let err = aged(Some("-5m"), None).unwrap_err();
    assert!(matches!(
        err,
        FilterError::Age {
            option: "--min-age",
            source: ParseAgeError::OutOfDomain(_)
        }
    ));
}

#[test]
fn ages_appear_in_dump() {
    let filter = aged(Some("1d"), Some("2d")).unwrap();
    let dump = filter.dump_filters();
    let mut lines = dump.lines();
    assert!(
        lines
            .next()
            .unwrap()
            .starts_with("Last-modified date must be equal or greater than: 2023-11-12T")
    );
    assert!(
        lines
            .next()
            .unwrap()
            .starts_with("Last-modified date must be equal or less than: 2023-11-13T")
    );
}

// ============================================================================
// Size bounds
// ============================================================================

#[test]
fn size_bounds_from_config() {
    let config = FilterConfig {
        min_size: "1k".parse().unwrap(),
        max_size: "1M".parse().unwrap(),
        ..FilterConfig::default()
    };
    let filter = Filter::from_config(&config).unwrap();

    assert_eq!(filter.min_size(), SizeSuffix::from_bytes(1024));
    assert!(!filter.include("tiny", 1023, UNIX_EPOCH));
    assert!(filter.include("small", 1024, UNIX_EPOCH));
    assert!(filter.include("limit", 1024 * 1024, UNIX_EPOCH));
    assert!(!filter.include("huge", 1024 * 1024 + 1, UNIX_EPOCH));
}

#[test]
fn off_bounds_leave_filter_inactive() {
    let config = FilterConfig {
        min_size: "off".parse().unwrap(),
        ..FilterConfig::default()
    };
    let filter = Filter::from_config(&config).unwrap();
    assert!(!filter.is_active());
    assert!(filter.include("anything", i64::MAX, UNIX_EPOCH));
}

// ============================================================================
// Objects
// ============================================================================

struct Listed {
    remote: &'static str,
    size: i64,
    mod_time: SystemTime,
    mod_time_reads: Cell<usize>,
}

impl Listed {
    fn new(remote: &'static str, size: i64, mod_time: SystemTime) -> Self {
        Self {
            remote,
            size,
            mod_time,
            mod_time_reads: Cell::new(0),
        }
    }
}

impl Object for Listed {
    fn remote(&self) -> &str {
        self.remote
    }

    fn size(&self) -> i64 {
        self.size
    }

    fn mod_time(&self) -> SystemTime {
        self.mod_time_reads.set(self.mod_time_reads.get() + 1);
        self.mod_time
    }
}

#[test]
fn object_mod_time_is_read_only_for_time_bounds() {
    let mut filter = Filter::new();
    filter.add_rule("- *.tmp").unwrap();
    filter.set_max_size(SizeSuffix::from_bytes(100));

    let object = Listed::new("a/b.txt", 10, now());
    assert!(filter.include_object(&object));
    assert_eq!(object.mod_time_reads.get(), 0);

    let skipped = Listed::new("a/b.tmp", 10, now());
    assert!(!filter.include_object(&skipped));
    assert_eq!(skipped.mod_time_reads.get(), 0);
}

#[test]
fn object_mod_time_feeds_time_bounds() {
    let filter = aged(None, Some("1d")).unwrap();

    let fresh = Listed::new("fresh.txt", 0, now());
    let stale = Listed::new("stale.txt", 0, now() - 2 * DAY);
    assert!(filter.include_object(&fresh));
    assert!(!filter.include_object(&stale));
    assert_eq!(fresh.mod_time_reads.get(), 1);
}

#[test]
fn object_size_feeds_size_bounds() {
    let mut filter = Filter::new();
    filter.set_min_size(SizeSuffix::from_bytes(5));
    assert!(!filter.include_object(&Listed::new("small", 4, now())));
    assert!(filter.include_object(&Listed::new("large", 5, now())));
}
