//! Structured tracing for filter construction and evaluation.
//!
//! Every hook is compiled behind the `tracing` feature and collapses to an
//! inline no-op without it, so the decision engine pays nothing when
//! diagnostics are off.
//!
//! Targets map onto the verbosity flags of the `logging` crate:
//!
//! | Target | Flag |
//! |---|---|
//! | `sync::filter` | `--debug=filter` |
//! | `sync::flist` | `--debug=flist` |
//! | `sync::time` | `--debug=time` |
//! | `sync::stats` | `--info=stats` |
//!
//! # Examples
//!
//! ```rust,ignore
//! use filters::debug_filter::{FilterTracer, trace_rule_added};
//!
//! trace_rule_added("*.tmp", false, false);
//!
//! let mut tracer = FilterTracer::new();
//! tracer.record_file(false);
//! tracer.summary();
//! ```

use std::time::Duration;

#[cfg(feature = "tracing")]
const FILTER_TARGET: &str = "sync::filter";
#[cfg(feature = "tracing")]
const FLIST_TARGET: &str = "sync::flist";
#[cfg(feature = "tracing")]
const TIME_TARGET: &str = "sync::time";
#[cfg(feature = "tracing")]
const STATS_TARGET: &str = "sync::stats";

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces a rule being appended to the file or directory rule set.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rule_added(glob: &str, is_include: bool, is_dir_rule: bool) {
    tracing::debug!(
        target: FILTER_TARGET,
        glob = %glob,
        is_include = is_include,
        is_dir_rule = is_dir_rule,
        "{} {} {}",
        if is_dir_rule { "dir rule" } else { "file rule" },
        if is_include { '+' } else { '-' },
        glob
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rule_added(_glob: &str, _is_include: bool, _is_dir_rule: bool) {}

/// Traces the `!` directive dropping every rule collected so far.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rules_cleared(file_rules: usize, dir_rules: usize) {
    tracing::debug!(
        target: FILTER_TARGET,
        file_rules = file_rules,
        dir_rules = dir_rules,
        "cleared {file_rules} file rules and {dir_rules} directory rules"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rules_cleared(_file_rules: usize, _dir_rules: usize) {}

/// Traces an entry read from a files-from list.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_file_listed(path: &str) {
    tracing::debug!(target: FLIST_TARGET, path = %path, "files-from entry {path}");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_file_listed(_path: &str) {}

/// Traces the verdict for a path along with the rule that produced it.
///
/// `matching_rule` is `None` when the default verdict applied or when the
/// explicit file list decided.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_decision(path: &str, is_dir: bool, included: bool, matching_rule: Option<&str>) {
    tracing::trace!(
        target: FILTER_TARGET,
        path = %path,
        is_dir = is_dir,
        included = included,
        matching_rule = ?matching_rule,
        "{} {path}{}: {}",
        if is_dir { "directory" } else { "file" },
        matching_rule.map(|rule| format!(" matched [{rule}]")).unwrap_or_default(),
        if included { "included" } else { "excluded" }
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_decision(_path: &str, _is_dir: bool, _included: bool, _matching_rule: Option<&str>) {}

/// Traces a file rejected by a size or modification time bound.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_bound_rejected(path: &str, bound: &str) {
    tracing::debug!(target: FILTER_TARGET, path = %path, bound = %bound, "{path} fails {bound}");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_bound_rejected(_path: &str, _bound: &str) {}

/// Traces the resolution of an age option into an absolute bound.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_age_bound(option: &str, age: Duration, bound: &str) {
    tracing::debug!(
        target: TIME_TARGET,
        option = %option,
        age = ?age,
        bound = %bound,
        "{option} {age:?} to {bound}"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_age_bound(_option: &str, _age: Duration, _bound: &str) {}

/// Traces aggregate evaluation statistics.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_filter_summary(
    files_included: usize,
    files_excluded: usize,
    dirs_included: usize,
    dirs_pruned: usize,
) {
    tracing::info!(
        target: STATS_TARGET,
        files_included = files_included,
        files_excluded = files_excluded,
        dirs_included = dirs_included,
        dirs_pruned = dirs_pruned,
        "files: {files_included} included, {files_excluded} excluded; \
         directories: {dirs_included} entered, {dirs_pruned} pruned"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_filter_summary(
    _files_included: usize,
    _files_excluded: usize,
    _dirs_included: usize,
    _dirs_pruned: usize,
) {
}

// ============================================================================
// FilterTracer - counts verdicts across a traversal
// ============================================================================

/// Aggregates verdict counts during a traversal.
///
/// # Examples
///
/// ```
/// # use filters::debug_filter::FilterTracer;
/// let mut tracer = FilterTracer::new();
///
/// tracer.record_directory(true);
/// tracer.record_directory(false);
/// tracer.record_file(true);
/// tracer.record_file(false);
/// tracer.record_file(true);
///
/// assert_eq!(tracer.dirs_pruned(), 1);
/// assert_eq!(tracer.files_evaluated(), 3);
/// assert_eq!(tracer.files_included(), 2);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterTracer {
    files_included: usize,
    files_excluded: usize,
    dirs_included: usize,
    dirs_pruned: usize,
}

impl FilterTracer {
    /// Creates a tracer with zero counts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files_included: 0,
            files_excluded: 0,
            dirs_included: 0,
            dirs_pruned: 0,
        }
    }

    /// Records a file verdict.
    pub fn record_file(&mut self, included: bool) {
        if included {
            self.files_included += 1;
        } else {
            self.files_excluded += 1;
        }
    }

    /// Records a directory verdict; excluded directories count as pruned.
    pub fn record_directory(&mut self, included: bool) {
        if included {
            self.dirs_included += 1;
        } else {
            self.dirs_pruned += 1;
        }
    }

    /// Emits the summary event.
    pub fn summary(&self) {
        trace_filter_summary(
            self.files_included,
            self.files_excluded,
            self.dirs_included,
            self.dirs_pruned,
        );
    }

    /// Number of file verdicts recorded.
    #[must_use]
    pub const fn files_evaluated(&self) -> usize {
        self.files_included + self.files_excluded
    }

    /// Number of included files.
    #[must_use]
    pub const fn files_included(&self) -> usize {
        self.files_included
    }

    /// Number of excluded files.
    #[must_use]
    pub const fn files_excluded(&self) -> usize {
        self.files_excluded
    }

    /// Number of directories entered.
    #[must_use]
    pub const fn dirs_included(&self) -> usize {
        self.dirs_included
    }

    /// Number of directories skipped.
    #[must_use]
    pub const fn dirs_pruned(&self) -> usize {
        self.dirs_pruned
    }

    /// Ratio of included files to evaluated files, `0.0` before any file.
    #[must_use]
    pub fn include_ratio(&self) -> f64 {
        let total = self.files_evaluated();
        if total == 0 {
            0.0
        } else {
            self.files_included as f64 / total as f64
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
