//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

use std::fmt;

/// Info flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InfoFlag {
    /// Miscellaneous progress of the run.
    Misc,
    /// Entries skipped by the filter.
    Skip,
    /// Decision statistics.
    Stats,
}

impl InfoFlag {
    /// Every info flag, in display order.
    pub const ALL: [Self; 3] = [Self::Misc, Self::Skip, Self::Stats];

    /// Name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Misc => "misc",
            Self::Skip => "skip",
            Self::Stats => "stats",
        }
    }

    /// Looks up a flag by its command-line name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }
}

impl fmt::Display for InfoFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Debug flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DebugFlag {
    /// Rule construction and per-path decisions.
    Filter,
    /// Explicit file list entries.
    Flist,
    /// Age bound resolution.
    Time,
}

impl DebugFlag {
    /// Every debug flag, in display order.
    pub const ALL: [Self; 3] = [Self::Filter, Self::Flist, Self::Time];

    /// Name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::Flist => "flist",
            Self::Time => "time",
        }
    }

    /// Looks up a flag by its command-line name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }
}

impl fmt::Display for DebugFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct InfoLevels {
    /// Miscellaneous progress level.
    pub misc: u8,
    /// Skipped entries level.
    pub skip: u8,
    /// Statistics level.
    pub stats: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    #[must_use]
    pub const fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Misc => self.misc,
            InfoFlag::Skip => self.skip,
            InfoFlag::Stats => self.stats,
        }
    }

    /// Set the level for a specific flag.
    pub const fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Misc => self.misc = level,
            InfoFlag::Skip => self.skip = level,
            InfoFlag::Stats => self.stats = level,
        }
    }

    /// Set all flags to the specified level.
    pub const fn set_all(&mut self, level: u8) {
        self.misc = level;
        self.skip = level;
        self.stats = level;
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct DebugLevels {
    /// Filter rule and decision level.
    pub filter: u8,
    /// File list level.
    pub flist: u8,
    /// Age bound level.
    pub time: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    #[must_use]
    pub const fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Filter => self.filter,
            DebugFlag::Flist => self.flist,
            DebugFlag::Time => self.time,
        }
    }

    /// Set the level for a specific flag.
    pub const fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Filter => self.filter = level,
            DebugFlag::Flist => self.flist = level,
            DebugFlag::Time => self.time = level,
        }
    }

    /// Set all flags to the specified level.
    pub const fn set_all(&mut self, level: u8) {
        self.filter = level;
        self.flist = level;
        self.time = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_names_round_trip() {
        for flag in InfoFlag::ALL {
            assert_eq!(InfoFlag::from_name(flag.name()), Some(flag));
            assert_eq!(flag.to_string(), flag.name());
        }
        for flag in DebugFlag::ALL {
            assert_eq!(DebugFlag::from_name(flag.name()), Some(flag));
        }
        assert_eq!(InfoFlag::from_name("copy"), None);
        assert_eq!(DebugFlag::from_name("Filter"), None);
    }

    #[test]
    fn default_levels_are_zero() {
        let info = InfoLevels::default();
        let debug = DebugLevels::default();
        assert!(InfoFlag::ALL.iter().all(|&flag| info.get(flag) == 0));
        assert!(DebugFlag::ALL.iter().all(|&flag| debug.get(flag) == 0));
    }

    #[test]
    fn set_updates_only_that_flag() {
        let mut levels = InfoLevels::default();
        levels.set(InfoFlag::Skip, 2);
        assert_eq!(levels.get(InfoFlag::Skip), 2);
        assert_eq!(levels.get(InfoFlag::Misc), 0);
        assert_eq!(levels.get(InfoFlag::Stats), 0);

        let mut levels = DebugLevels::default();
        levels.set(DebugFlag::Time, 3);
        assert_eq!(levels.time, 3);
        assert_eq!(levels.filter, 0);
    }

    #[test]
    fn set_all_updates_all_levels() {
        let mut info = InfoLevels::default();
        info.set_all(4);
        assert_eq!(
            info,
            InfoLevels {
                misc: 4,
                skip: 4,
                stats: 4
            }
        );

        let mut debug = DebugLevels::default();
        debug.set_all(2);
        assert!(DebugFlag::ALL.iter().all(|&flag| debug.get(flag) == 2));
    }
}
