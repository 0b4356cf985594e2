use std::fmt;

/// Verdict a rule hands out when its pattern matches.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FilterAction {
    /// Include the matching path.
    Include,
    /// Exclude the matching path.
    Exclude,
}

impl FilterAction {
    /// Maps an include flag onto the corresponding action.
    #[must_use]
    pub const fn from_include(include: bool) -> Self {
        if include { Self::Include } else { Self::Exclude }
    }

    /// Returns `true` for [`FilterAction::Include`].
    #[must_use]
    pub const fn is_include(self) -> bool {
        matches!(self, Self::Include)
    }

    /// Sign used by the rule mini-language and the filter dump.
    #[must_use]
    pub const fn sign(self) -> char {
        match self {
            Self::Include => '+',
            Self::Exclude => '-',
        }
    }
}

impl fmt::Display for FilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("include"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}
