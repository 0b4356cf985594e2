use std::fmt;

use crate::{CompiledPattern, FilterAction, FilterError, PatternEngine};

/// A compiled include or exclude rule.
///
/// Two rules are considered equal when they share an action and the glob text
/// they were compiled from; the compiled matcher never takes part in the
/// comparison.
#[derive(Clone, Debug)]
pub struct Rule {
    action: FilterAction,
    pattern: CompiledPattern,
}

impl Rule {
    /// Compiles `glob` with `engine` into a rule carrying `action`.
    pub fn new(action: FilterAction, glob: &str, engine: PatternEngine) -> Result<Self, FilterError> {
        let pattern =
            CompiledPattern::compile(glob, engine).map_err(|err| FilterError::pattern(glob, err))?;
        Ok(Self::from_pattern(action, pattern))
    }

    /// Creates an include rule using the default engine.
    pub fn include(glob: &str) -> Result<Self, FilterError> {
        Self::new(FilterAction::Include, glob, PatternEngine::default())
    }

    /// Creates an exclude rule using the default engine.
    pub fn exclude(glob: &str) -> Result<Self, FilterError> {
        Self::new(FilterAction::Exclude, glob, PatternEngine::default())
    }

    /// Wraps an already compiled pattern.
    #[must_use]
    pub const fn from_pattern(action: FilterAction, pattern: CompiledPattern) -> Self {
        Self { action, pattern }
    }

    /// Returns the action applied when the rule matches.
    #[must_use]
    pub const fn action(&self) -> FilterAction {
        self.action
    }

    /// Returns `true` for include rules.
    #[must_use]
    pub const fn is_include(&self) -> bool {
        self.action.is_include()
    }

    /// Returns the glob text the rule was compiled from.
    #[must_use]
    pub fn glob(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub const fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Tests `path` against the rule's pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    pub(crate) fn key(&self) -> (FilterAction, &str) {
        (self.action, self.glob())
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Rule {}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action.sign(), self.glob())
    }
}

/// Which rule sets a glob lands in, decided by its suffix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuleScope {
    /// Matched against file paths only.
    File,
    /// Matched against directory paths only (glob ends in `/`).
    Directory,
    /// Matched against both (glob ends in `**`).
    Both,
}

impl RuleScope {
    /// Classifies `glob` by its suffix.
    #[must_use]
    pub fn classify(glob: &str) -> Self {
        if glob.ends_with('/') {
            Self::Directory
        } else if glob.ends_with("**") {
            Self::Both
        } else {
            Self::File
        }
    }

    /// Returns `true` when the file rule set receives the glob.
    #[must_use]
    pub const fn applies_to_files(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }

    /// Returns `true` when the directory rule set receives the glob.
    #[must_use]
    pub const fn applies_to_directories(self) -> bool {
        matches!(self, Self::Directory | Self::Both)
    }
}

/// One parsed line of the `+`/`-`/`!` rule language.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuleDirective<'a> {
    /// `!`: drop every rule collected so far.
    Clear,
    /// `+ GLOB` or `- GLOB`.
    Add(FilterAction, &'a str),
}

impl<'a> RuleDirective<'a> {
    /// Parses a rule line.
    ///
    /// The sign must be followed by exactly one space; everything after it is
    /// taken verbatim as the glob.
    ///
    /// ```
    /// use filters::{FilterAction, RuleDirective};
    ///
    /// assert_eq!(
    ///     RuleDirective::parse("- *.bak").unwrap(),
    ///     RuleDirective::Add(FilterAction::Exclude, "*.bak")
    /// );
    /// assert_eq!(RuleDirective::parse("!").unwrap(), RuleDirective::Clear);
    /// assert!(RuleDirective::parse("+*.bak").is_err());
    /// ```
    pub fn parse(line: &'a str) -> Result<Self, FilterError> {
        if line == "!" {
            Ok(Self::Clear)
        } else if let Some(glob) = line.strip_prefix("+ ") {
            Ok(Self::Add(FilterAction::Include, glob))
        } else if let Some(glob) = line.strip_prefix("- ") {
            Ok(Self::Add(FilterAction::Exclude, glob))
        } else {
            Err(FilterError::MalformedRule(line.to_owned()))
        }
    }
}
