//! Relative age parsing for `--min-age` and `--max-age`.

use std::num::ParseFloatError;
use std::time::Duration;

const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_DAY: u64 = 24 * 60 * 60 * NANOS_PER_SEC;

/// Unit suffixes in the order they are tried.
///
/// The first suffix the text ends with wins, so `ms` has to precede `s`, and
/// the empty suffix has to come last. `m` (minutes) and `M` (30-day months)
/// differ only by case.
const AGE_SUFFIXES: &[(&str, u64)] = &[
    ("ms", 1_000_000),
    ("s", NANOS_PER_SEC),
    ("m", 60 * NANOS_PER_SEC),
    ("h", 60 * 60 * NANOS_PER_SEC),
    ("d", NANOS_PER_DAY),
    ("w", 7 * NANOS_PER_DAY),
    ("M", 30 * NANOS_PER_DAY),
    ("y", 365 * NANOS_PER_DAY),
    ("", NANOS_PER_SEC),
];

/// Error returned by [`parse_age`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseAgeError {
    /// The numeric part is not a number.
    #[error("invalid age {text:?}: {source}")]
    InvalidNumber {
        /// Full input text.
        text: String,
        /// Float parse failure.
        #[source]
        source: ParseFloatError,
    },
    /// The age is negative or not finite.
    #[error("age {0:?} must be a finite, non-negative value")]
    OutOfDomain(String),
    /// The age does not fit in a [`Duration`].
    #[error("age {0:?} is too large")]
    Overflow(String),
}

/// Parses a relative age such as `90s`, `1.5h` or `2M`.
///
/// Recognised suffixes are `ms`, `s`, `m` (minutes), `h`, `d`, `w`, `M`
/// (30 days) and `y` (365 days). A bare number is read as seconds. The numeric
/// part may be fractional.
///
/// ```
/// use std::time::Duration;
/// use filters::parse_age;
///
/// assert_eq!(parse_age("100ms").unwrap(), Duration::from_millis(100));
/// assert_eq!(parse_age("2m").unwrap(), Duration::from_secs(120));
/// assert_eq!(parse_age("2M").unwrap(), Duration::from_secs(2 * 30 * 86_400));
/// assert_eq!(parse_age("5").unwrap(), Duration::from_secs(5));
/// ```
pub fn parse_age(text: &str) -> Result<Duration, ParseAgeError> {
    let (number, nanos_per_unit) = AGE_SUFFIXES
        .iter()
        .find_map(|&(suffix, nanos)| text.strip_suffix(suffix).map(|number| (number, nanos)))
        .unwrap_or((text, NANOS_PER_SEC));

    let value: f64 = number
        .parse()
        .map_err(|source| ParseAgeError::InvalidNumber {
            text: text.to_owned(),
            source,
        })?;
    if !value.is_finite() || (value.is_sign_negative() && value != 0.0) {
        return Err(ParseAgeError::OutOfDomain(text.to_owned()));
    }

    let nanos = value * nanos_per_unit as f64;
    if nanos >= u64::MAX as f64 {
        return Err(ParseAgeError::Overflow(text.to_owned()));
    }
    Ok(Duration::from_nanos(nanos as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = 86_400;

    #[test]
    fn suffix_table() {
        let cases = [
            ("100ms", Duration::from_millis(100)),
            ("10s", Duration::from_secs(10)),
            ("5", Duration::from_secs(5)),
            ("2m", Duration::from_secs(120)),
            ("3h", Duration::from_secs(3 * 3600)),
            ("1d", Duration::from_secs(DAY)),
            ("2w", Duration::from_secs(14 * DAY)),
            ("2M", Duration::from_secs(60 * DAY)),
            ("1y", Duration::from_secs(365 * DAY)),
            ("1.5h", Duration::from_secs(5400)),
            ("0.5s", Duration::from_millis(500)),
            ("0", Duration::ZERO),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_age(text), Ok(expected), "{text}");
        }
    }

    #[test]
    fn minute_and_month_differ_by_case() {
        assert_ne!(parse_age("5m"), parse_age("5M"));
        assert_eq!(parse_age("5m"), Ok(Duration::from_secs(300)));
    }

    #[test]
    fn milliseconds_take_priority_over_seconds() {
        assert_eq!(parse_age("1500ms"), Ok(Duration::from_millis(1500)));
    }

    #[test]
    fn rejects_garbage() {
        for text in ["", "ms", "abc", "5x", "1 d", "d5", "5mm"] {
            assert!(
                matches!(parse_age(text), Err(ParseAgeError::InvalidNumber { .. })),
                "{text:?} should fail"
            );
        }
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        for text in ["-1s", "-0.5d", "inf", "NaN"] {
            assert_eq!(
                parse_age(text),
                Err(ParseAgeError::OutOfDomain(text.to_owned())),
                "{text:?}"
            );
        }
    }

    #[test]
    fn rejects_overflow() {
        assert!(matches!(parse_age("1000y"), Err(ParseAgeError::Overflow(_))));
    }
}
