//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a `-v` count.
    ///
    /// One `-v` reports progress and statistics, two add skipped entries and
    /// rule construction, three add every per-path decision.
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        let mut config = Self {
            info: InfoLevels {
                misc: 0,
                skip: 0,
                stats: 0,
            },
            debug: DebugLevels {
                filter: 0,
                flist: 0,
                time: 0,
            },
        };

        match level {
            0 => {}
            1 => {
                config.info.misc = 1;
                config.info.stats = 1;
            }
            2 => {
                config.info.misc = 2;
                config.info.skip = 1;
                config.info.stats = 1;
                config.debug.filter = 2;
                config.debug.flist = 2;
                config.debug.time = 2;
            }
            _ => {
                config.info.misc = 2;
                config.info.skip = 1;
                config.info.stats = 1;
                config.debug.filter = 3;
                config.debug.flist = 3;
                config.debug.time = 3;
            }
        }

        config
    }

    /// Apply a single info flag token (e.g., "skip", "stats2", "ALL").
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        if name.eq_ignore_ascii_case("all") {
            self.info.set_all(level);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("none") {
            self.info.set_all(0);
            return Ok(());
        }

        let flag = InfoFlag::from_name(name).ok_or_else(|| format!("unknown info flag: {name}"))?;
        self.info.set(flag, level);
        Ok(())
    }

    /// Apply a single debug flag token (e.g., "filter", "time2", "NONE").
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        if name.eq_ignore_ascii_case("all") {
            self.debug.set_all(level);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("none") {
            self.debug.set_all(0);
            return Ok(());
        }

        let flag =
            DebugFlag::from_name(name).ok_or_else(|| format!("unknown debug flag: {name}"))?;
        self.debug.set(flag, level);
        Ok(())
    }

    /// Apply a comma-separated `--info` value. Empty items are ignored.
    pub fn apply_info_flags(&mut self, list: &str) -> Result<(), String> {
        list.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_info_flag(token))
    }

    /// Apply a comma-separated `--debug` value. Empty items are ignored.
    pub fn apply_debug_flags(&mut self, list: &str) -> Result<(), String> {
        list.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_debug_flag(token))
    }
}

/// Parse a flag token like "skip2" into ("skip", 2) or "stats" into ("stats", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    let digit_start = token.find(|c: char| c.is_ascii_digit());

    match digit_start {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let name = &token[..pos];
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((name, level))
        }
        None => Ok((token, 1)),
    }
}
