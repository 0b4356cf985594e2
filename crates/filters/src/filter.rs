use std::time::{Duration, SystemTime, UNIX_EPOCH};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::for_each_line;
use crate::debug_filter::{trace_age_bound, trace_file_listed, trace_rule_added, trace_rules_cleared};
use crate::{
    FileList, FilterAction, FilterConfig, FilterError, PatternEngine, ROOT_RECURSIVE, Rule,
    RuleDirective, RuleScope, RuleSet, SizeSuffix, dir_globs, parse_age,
};

/// Include/exclude rules, bounds and the optional explicit file list.
///
/// A filter is assembled once, either through [`Filter::from_config`] or
/// through the `add*` and `set_*` methods, and is then only read. It is
/// `Send + Sync`, so one instance can be shared by every traversal worker.
///
/// ```
/// use filters::{Filter, FilterAction};
///
/// let mut filter = Filter::new();
/// filter.add(FilterAction::Include, "photos/*.jpg").unwrap();
/// filter.add(FilterAction::Exclude, "/**").unwrap();
///
/// assert!(filter.include_directory("photos"));
/// assert!(!filter.include_directory("music"));
/// assert!(filter.include("photos/cat.jpg", 0, std::time::UNIX_EPOCH));
/// assert!(!filter.include("photos/cat.png", 0, std::time::UNIX_EPOCH));
/// ```
#[derive(Clone, Debug)]
pub struct Filter {
    pub(crate) delete_excluded: bool,
    pub(crate) min_size: SizeSuffix,
    pub(crate) max_size: SizeSuffix,
    pub(crate) mod_time_from: Option<SystemTime>,
    pub(crate) mod_time_to: Option<SystemTime>,
    pub(crate) file_rules: RuleSet,
    pub(crate) dir_rules: RuleSet,
    pub(crate) files: Option<FileList>,
    engine: PatternEngine,
}

impl Default for Filter {
    fn default() -> Self {
        Self::with_engine(PatternEngine::default())
    }
}

impl Filter {
    /// Creates a filter that lets everything through.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty filter compiling globs with `engine`.
    #[must_use]
    pub fn with_engine(engine: PatternEngine) -> Self {
        Self {
            delete_excluded: false,
            min_size: SizeSuffix::OFF,
            max_size: SizeSuffix::OFF,
            mod_time_from: None,
            mod_time_to: None,
            file_rules: RuleSet::new(),
            dir_rules: RuleSet::new(),
            files: None,
            engine,
        }
    }

    /// Builds a filter from `config`, resolving ages against the current time.
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        Self::from_config_at(config, SystemTime::now())
    }

    /// Builds a filter from `config`, resolving ages against `now`.
    ///
    /// When any include glob or include file is configured, an exclude-all
    /// rule (`/**`) is appended after every other source, including the
    /// files-from lists. Rules given through `filter`/`filter_from` never
    /// trigger it.
    pub fn from_config_at(config: &FilterConfig, now: SystemTime) -> Result<Self, FilterError> {
        let mut filter = Self::with_engine(config.engine);
        filter.delete_excluded = config.delete_excluded;
        filter.min_size = config.min_size;
        filter.max_size = config.max_size;

        for glob in &config.include {
            filter.add(FilterAction::Include, glob)?;
        }
        for path in &config.include_from {
            for_each_line(path, |line| filter.add(FilterAction::Include, line))?;
        }
        for glob in &config.exclude {
            filter.add(FilterAction::Exclude, glob)?;
        }
        for path in &config.exclude_from {
            for_each_line(path, |line| filter.add(FilterAction::Exclude, line))?;
        }
        for rule in &config.filter {
            filter.add_rule(rule)?;
        }
        for path in &config.filter_from {
            for_each_line(path, |line| filter.add_rule(line))?;
        }
        for path in &config.files_from {
            for_each_line(path, |line| {
                filter.add_file(line);
                Ok(())
            })?;
        }
        if config.wants_implicit_exclude() {
            filter.add(FilterAction::Exclude, ROOT_RECURSIVE)?;
        }

        if let Some(text) = &config.min_age {
            let bound = resolve_age("--min-age", text, now)?;
            filter.mod_time_to = Some(bound);
        }
        if let Some(text) = &config.max_age {
            let bound = resolve_age("--max-age", text, now)?;
            filter.mod_time_from = Some(bound);
            if filter.mod_time_to.is_some_and(|to| to < bound) {
                return Err(FilterError::AgeRange);
            }
        }

        Ok(filter)
    }

    /// Adds a glob with the given action.
    ///
    /// A glob ending in `/` becomes a directory rule, one ending in `**`
    /// becomes both a file and a directory rule, anything else a file rule.
    /// File-scoped include rules (and `*` with either action) also add the
    /// directory rules needed to reach their matches; file-scoped exclude
    /// rules never prune directories.
    pub fn add(&mut self, action: FilterAction, glob: &str) -> Result<(), FilterError> {
        let scope = RuleScope::classify(glob);
        let rule = Rule::new(action, glob, self.engine)?;
        // Every rule compiles before any set changes.
        let derived = if scope.applies_to_files() && (action.is_include() || glob == "*") {
            self.derive_dir_rules(action, glob)?
        } else {
            Vec::new()
        };

        if scope.applies_to_files() && self.file_rules.add(rule.clone()) {
            trace_rule_added(glob, action.is_include(), false);
        }
        for dir_rule in derived {
            let dir_glob = dir_rule.glob().to_owned();
            if self.dir_rules.add(dir_rule) {
                trace_rule_added(&dir_glob, action.is_include(), true);
            }
        }
        if scope.applies_to_directories() && self.dir_rules.add(rule) {
            trace_rule_added(glob, action.is_include(), true);
        }
        Ok(())
    }

    fn derive_dir_rules(&self, action: FilterAction, glob: &str) -> Result<Vec<Rule>, FilterError> {
        dir_globs(glob)
            .into_iter()
            // The root is always entered.
            .filter(|dir_glob| dir_glob != "/" && !self.dir_rules.contains(action, dir_glob))
            .map(|dir_glob| Rule::new(action, &dir_glob, self.engine))
            .collect()
    }

    /// Applies one line of the `+ GLOB` / `- GLOB` / `!` rule language.
    pub fn add_rule(&mut self, line: &str) -> Result<(), FilterError> {
        match RuleDirective::parse(line)? {
            RuleDirective::Clear => {
                self.clear();
                Ok(())
            }
            RuleDirective::Add(action, glob) => self.add(action, glob),
        }
    }

    /// Adds `path` to the explicit file list, switching the filter into
    /// file-list mode.
    pub fn add_file(&mut self, path: &str) {
        trace_file_listed(path);
        self.files.get_or_insert_with(FileList::new).add(path);
    }

    /// Drops every file and directory rule. Bounds and the file list stay.
    pub fn clear(&mut self) {
        trace_rules_cleared(self.file_rules.len(), self.dir_rules.len());
        self.file_rules.clear();
        self.dir_rules.clear();
    }

    /// Sets the smallest size a file may have.
    pub fn set_min_size(&mut self, size: SizeSuffix) {
        self.min_size = size;
    }

    /// Sets the largest size a file may have.
    pub fn set_max_size(&mut self, size: SizeSuffix) {
        self.max_size = size;
    }

    /// Sets the oldest modification time a file may have.
    pub fn set_mod_time_from(&mut self, time: Option<SystemTime>) {
        self.mod_time_from = time;
    }

    /// Sets the newest modification time a file may have.
    pub fn set_mod_time_to(&mut self, time: Option<SystemTime>) {
        self.mod_time_to = time;
    }

    /// Sets the `--delete-excluded` flag.
    pub fn set_delete_excluded(&mut self, delete_excluded: bool) {
        self.delete_excluded = delete_excluded;
    }

    /// Whether excluded files should be deleted from the destination.
    #[must_use]
    pub const fn delete_excluded(&self) -> bool {
        self.delete_excluded
    }

    /// Lower size bound.
    #[must_use]
    pub const fn min_size(&self) -> SizeSuffix {
        self.min_size
    }

    /// Upper size bound.
    #[must_use]
    pub const fn max_size(&self) -> SizeSuffix {
        self.max_size
    }

    /// Oldest accepted modification time.
    #[must_use]
    pub const fn mod_time_from(&self) -> Option<SystemTime> {
        self.mod_time_from
    }

    /// Newest accepted modification time.
    #[must_use]
    pub const fn mod_time_to(&self) -> Option<SystemTime> {
        self.mod_time_to
    }

    /// Rules matched against file paths.
    #[must_use]
    pub const fn file_rules(&self) -> &RuleSet {
        &self.file_rules
    }

    /// Rules matched against directory paths.
    #[must_use]
    pub const fn dir_rules(&self) -> &RuleSet {
        &self.dir_rules
    }

    /// The explicit file list, when one was given.
    #[must_use]
    pub const fn files(&self) -> Option<&FileList> {
        self.files.as_ref()
    }

    /// Engine used to compile globs.
    #[must_use]
    pub const fn engine(&self) -> PatternEngine {
        self.engine
    }

    /// Renders the time bounds and both rule sets, one entry per line.
    ///
    /// Rule lines use the `+ GLOB` / `- GLOB` form accepted by
    /// [`add_rule`](Self::add_rule).
    #[must_use]
    pub fn dump_filters(&self) -> String {
        let mut lines = Vec::with_capacity(self.file_rules.len() + self.dir_rules.len() + 4);
        if let Some(from) = self.mod_time_from {
            lines.push(format!(
                "Last-modified date must be equal or greater than: {}",
                format_time(from)
            ));
        }
        if let Some(to) = self.mod_time_to {
            lines.push(format!(
                "Last-modified date must be equal or less than: {}",
                format_time(to)
            ));
        }
        lines.push("--- File filter rules ---".to_owned());
        lines.extend(self.file_rules.iter().map(ToString::to_string));
        lines.push("--- Directory filter rules ---".to_owned());
        lines.extend(self.dir_rules.iter().map(ToString::to_string));
        lines.join("\n")
    }
}

fn resolve_age(
    option: &'static str,
    text: &str,
    now: SystemTime,
) -> Result<SystemTime, FilterError> {
    let age: Duration = parse_age(text).map_err(|source| FilterError::Age { option, source })?;
    let bound = now
        .checked_sub(age)
        .ok_or(FilterError::AgeOutOfRange { option })?;
    trace_age_bound(option, age, &format_time(bound));
    Ok(bound)
}

/// Formats `time` as RFC 3339 in UTC, falling back to `Debug` output for
/// instants the calendar cannot represent.
pub(crate) fn format_time(time: SystemTime) -> String {
    let offset = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => time::Duration::try_from(after).ok(),
        Err(before) => time::Duration::try_from(before.duration()).ok().map(|d| -d),
    };
    offset
        .and_then(|offset| OffsetDateTime::UNIX_EPOCH.checked_add(offset))
        .and_then(|datetime| datetime.format(&Rfc3339).ok())
        .unwrap_or_else(|| format!("{time:?}"))
}
