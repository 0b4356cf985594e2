use std::slice;

use rustc_hash::FxHashSet;

use crate::{FilterAction, Rule};

/// Ordered, de-duplicated list of rules evaluated first match wins.
///
/// Adding a rule whose action and glob are already present is a no-op, so the
/// same rule can arrive from several sources without changing the evaluation
/// order.
///
/// ```
/// use filters::{Rule, RuleSet};
///
/// let mut set = RuleSet::new();
/// set.add(Rule::exclude("*.tmp").unwrap());
/// set.add(Rule::include("keep.tmp").unwrap());
/// set.add(Rule::exclude("*.tmp").unwrap());
///
/// assert_eq!(set.len(), 2);
/// assert!(!set.first_match("keep.tmp").unwrap().is_include());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    keys: FxHashSet<(FilterAction, String)>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `rule` unless an equal rule is already present.
    ///
    /// Returns `true` when the rule was appended.
    pub fn add(&mut self, rule: Rule) -> bool {
        let (action, glob) = rule.key();
        if !self.keys.insert((action, glob.to_owned())) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    /// Removes every rule.
    pub fn clear(&mut self) {
        self.rules.clear();
        self.keys.clear();
    }

    /// Number of rules held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when no rules are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns `true` if an equal rule is present.
    #[must_use]
    pub fn contains(&self, action: FilterAction, glob: &str) -> bool {
        self.keys.contains(&(action, glob.to_owned()))
    }

    /// Iterates the rules in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Returns the first rule matching `path`.
    #[must_use]
    pub fn first_match(&self, path: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Rule> for RuleSet {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        for rule in iter {
            self.add(rule);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rendered(set: &RuleSet) -> Vec<String> {
        set.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut set = RuleSet::new();
        assert!(set.add(Rule::include("*.txt").unwrap()));
        assert!(!set.add(Rule::include("*.txt").unwrap()));
        assert!(set.add(Rule::exclude("*.txt").unwrap()));
        assert_eq!(rendered(&set), ["+ *.txt", "- *.txt"]);
        assert!(set.contains(FilterAction::Include, "*.txt"));
        assert!(!set.contains(FilterAction::Include, "*.md"));
    }

    #[test]
    fn first_match_wins() {
        let mut set = RuleSet::new();
        set.add(Rule::exclude("*.tmp").unwrap());
        set.add(Rule::include("keep.tmp").unwrap());

        let rule = set.first_match("keep.tmp").expect("a rule matches");
        assert_eq!(rule.to_string(), "- *.tmp");
        assert!(set.first_match("notes.md").is_none());
    }

    #[test]
    fn clear_forgets_keys() {
        let mut set = RuleSet::new();
        set.add(Rule::exclude("a").unwrap());
        set.clear();
        assert!(set.is_empty());
        assert!(set.add(Rule::exclude("a").unwrap()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn extend_deduplicates() {
        let mut set = RuleSet::new();
        set.extend(["a", "b", "a"].map(|glob| Rule::include(glob).unwrap()));
        assert_eq!(rendered(&set), ["+ a", "+ b"]);
    }

    proptest! {
        #[test]
        fn re_adding_is_idempotent(
            entries in proptest::collection::vec((any::<bool>(), "[a-z*]{1,4}"), 0..16)
        ) {
            let build = |set: &mut RuleSet| {
                for (include, glob) in &entries {
                    let rule = Rule::new(
                        FilterAction::from_include(*include),
                        glob,
                        crate::PatternEngine::Regex,
                    );
                    if let Ok(rule) = rule {
                        set.add(rule);
                    }
                }
            };

            let mut once = RuleSet::new();
            build(&mut once);
            let before = rendered(&once);

            build(&mut once);
            prop_assert_eq!(rendered(&once), before);

            let mut unique = entries.clone();
            unique.sort();
            unique.dedup();
            prop_assert!(once.len() <= unique.len());
        }
    }
}
