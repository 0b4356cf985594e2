//! Byte counts with binary unit suffixes for `--min-size` and `--max-size`.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// A size bound in bytes, or `off`.
///
/// Negative values mean the bound is disabled.
///
/// ```
/// use filters::SizeSuffix;
///
/// let size: SizeSuffix = "1.5k".parse().unwrap();
/// assert_eq!(size.bytes(), Some(1536));
/// assert_eq!(size.to_string(), "1.500k");
///
/// let bare: SizeSuffix = "10".parse().unwrap();
/// assert_eq!(bare.bytes(), Some(10 * 1024));
///
/// assert!("off".parse::<SizeSuffix>().unwrap().is_off());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SizeSuffix(i64);

impl SizeSuffix {
    /// The disabled bound.
    pub const OFF: Self = Self(-1);

    /// Wraps a raw byte count; negative counts disable the bound.
    #[must_use]
    pub const fn from_bytes(bytes: i64) -> Self {
        Self(bytes)
    }

    /// Returns `true` when the bound is disabled.
    #[must_use]
    pub const fn is_off(self) -> bool {
        self.0 < 0
    }

    /// Returns the byte count, or `None` when the bound is disabled.
    #[must_use]
    pub const fn bytes(self) -> Option<i64> {
        if self.0 < 0 { None } else { Some(self.0) }
    }

    /// Raw value, `-1` when disabled.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Renders the size followed by a unit name, e.g. `1.500 kBytes`.
    #[must_use]
    pub fn unit(self, unit: &str) -> String {
        match self.scaled() {
            None => "off".to_owned(),
            Some((value, suffix)) => format!("{value} {suffix}{unit}"),
        }
    }

    fn scaled(self) -> Option<(String, &'static str)> {
        let bytes = self.0;
        let (scaled, suffix) = match bytes {
            i64::MIN..0 => return None,
            0 => return Some(("0".to_owned(), "")),
            1..1024 => (bytes as f64, ""),
            1024..1_048_576 => (bytes as f64 / KIB, "k"),
            1_048_576..1_073_741_824 => (bytes as f64 / MIB, "M"),
            _ => (bytes as f64 / GIB, "G"),
        };
        let text = if scaled.fract() == 0.0 {
            format!("{scaled:.0}")
        } else {
            format!("{scaled:.3}")
        };
        Some((text, suffix))
    }
}

impl Default for SizeSuffix {
    fn default() -> Self {
        Self::OFF
    }
}

impl fmt::Display for SizeSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scaled() {
            None => f.write_str("off"),
            Some((value, suffix)) => write!(f, "{value}{suffix}"),
        }
    }
}

/// Error returned when a size string cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseSizeError {
    /// Nothing to parse.
    #[error("empty string")]
    Empty,
    /// The last character is not a digit or a known unit.
    #[error("bad suffix {0:?}")]
    BadSuffix(char),
    /// The numeric part is not a number.
    #[error("invalid size {text:?}: {source}")]
    InvalidNumber {
        /// Numeric part of the input.
        text: String,
        /// Float parse failure.
        #[source]
        source: ParseFloatError,
    },
    /// Sizes cannot be negative.
    #[error("size can't be negative {0:?}")]
    Negative(String),
    /// The size does not fit in a signed 64-bit byte count.
    #[error("size {0:?} is too large")]
    Overflow(String),
}

impl FromStr for SizeSuffix {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(last) = s.chars().next_back() else {
            return Err(ParseSizeError::Empty);
        };
        if s.eq_ignore_ascii_case("off") {
            return Ok(Self::OFF);
        }

        let (number, multiplier) = match last {
            '0'..='9' | '.' => (s, KIB),
            'b' | 'B' => (&s[..s.len() - 1], 1.0),
            'k' | 'K' => (&s[..s.len() - 1], KIB),
            'm' | 'M' => (&s[..s.len() - 1], MIB),
            'g' | 'G' => (&s[..s.len() - 1], GIB),
            other => return Err(ParseSizeError::BadSuffix(other)),
        };

        let value: f64 = number
            .parse()
            .map_err(|source| ParseSizeError::InvalidNumber {
                text: number.to_owned(),
                source,
            })?;
        if value < 0.0 {
            return Err(ParseSizeError::Negative(number.to_owned()));
        }

        let bytes = value * multiplier;
        if !bytes.is_finite() || bytes >= i64::MAX as f64 {
            return Err(ParseSizeError::Overflow(s.to_owned()));
        }
        Ok(Self(bytes as i64))
    }
}
