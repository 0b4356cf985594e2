use std::time::{SystemTime, UNIX_EPOCH};

use crate::debug_filter::{trace_bound_rejected, trace_decision};
use crate::{Filter, Object, RuleSet};

impl Filter {
    /// Returns `true` if anything is configured: a file list, a time or size
    /// bound, or any rule. Callers may skip filtering altogether otherwise.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.files.is_some()
            || self.mod_time_from.is_some()
            || self.mod_time_to.is_some()
            || !self.min_size.is_off()
            || !self.max_size.is_off()
            || !self.file_rules.is_empty()
            || !self.dir_rules.is_empty()
    }

    /// Decides whether a traversal should descend into the directory `path`.
    ///
    /// With a file list, only ancestors of listed files are entered.
    /// Otherwise the first directory rule matching `path/` decides, and
    /// directories no rule matches are entered.
    #[must_use]
    pub fn include_directory(&self, path: &str) -> bool {
        let path = path.trim_matches('/');
        if let Some(files) = &self.files {
            let included = files.contains_dir(path);
            trace_decision(path, true, included, None);
            return included;
        }
        let mut dir = String::with_capacity(path.len() + 1);
        dir.push_str(path);
        dir.push('/');
        evaluate(&self.dir_rules, &dir, true)
    }

    /// Decides whether the file `path` with the given size and modification
    /// time takes part in the transfer.
    ///
    /// With a file list, membership alone decides and the bounds are
    /// ignored. Otherwise the time window (inclusive at both ends) and the
    /// size bounds (inclusive) are checked before the first matching file
    /// rule; files no rule matches are included.
    #[must_use]
    pub fn include(&self, path: &str, size: i64, mod_time: SystemTime) -> bool {
        if let Some(files) = &self.files {
            let included = files.contains_file(path);
            trace_decision(path, false, included, None);
            return included;
        }
        if let Some(bound) = self.rejected_by_bounds(size, mod_time) {
            trace_bound_rejected(path, bound);
            return false;
        }
        evaluate(&self.file_rules, path, false)
    }

    /// Like [`include`](Self::include) for a listed object, reading its
    /// modification time only when a time bound needs it.
    #[must_use]
    pub fn include_object<O: Object + ?Sized>(&self, object: &O) -> bool {
        let mod_time = if self.mod_time_from.is_some() || self.mod_time_to.is_some() {
            object.mod_time()
        } else {
            UNIX_EPOCH
        };
        self.include(object.remote(), object.size(), mod_time)
    }

    fn rejected_by_bounds(&self, size: i64, mod_time: SystemTime) -> Option<&'static str> {
        if self.mod_time_from.is_some_and(|from| mod_time < from) {
            return Some("max-age");
        }
        if self.mod_time_to.is_some_and(|to| mod_time > to) {
            return Some("min-age");
        }
        if self.min_size.bytes().is_some_and(|min| size < min) {
            return Some("min-size");
        }
        if self.max_size.bytes().is_some_and(|max| size > max) {
            return Some("max-size");
        }
        None
    }
}

fn evaluate(rules: &RuleSet, path: &str, is_dir: bool) -> bool {
    match rules.first_match(path) {
        Some(rule) => {
            let included = rule.is_include();
            trace_decision(path, is_dir, included, Some(rule.glob()));
            included
        }
        None => {
            trace_decision(path, is_dir, true, None);
            true
        }
    }
}
