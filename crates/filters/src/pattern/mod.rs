//! Glob compilation.
//!
//! A glob is compiled once into a [`CompiledPattern`], which pairs the source
//! text with an opaque [`PathMatcher`]. Two engines are available:
//!
//! - [`PatternEngine::Regex`] translates the glob into an anchored regular
//!   expression. `**` matches any run of characters wherever it appears.
//! - [`PatternEngine::Glob`] hands the glob to `globset`. A `**` that is not
//!   a whole path component is expanded first, so it crosses separators just
//!   as it does under the regex engine.
//!
//! Both engines share the anchoring rules: a leading `/` ties the pattern to
//! the root of the listing, otherwise the pattern may start at any directory
//! boundary. Matches always extend to the end of the candidate path.

mod dir_globs;
mod glob_engine;
mod regex_engine;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::PatternError;

pub use dir_globs::{ROOT_RECURSIVE, dir_globs};

/// Membership test over forward-slash separated relative paths.
pub trait PathMatcher: fmt::Debug + Send + Sync {
    /// Returns `true` when `path` matches the compiled glob.
    fn is_match(&self, path: &str) -> bool;
}

/// Selects the backend used to compile globs.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PatternEngine {
    /// Translate globs into regular expressions.
    #[default]
    Regex,
    /// Compile globs with `globset`.
    Glob,
}

impl PatternEngine {
    /// Returns the name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regex => "regex",
            Self::Glob => "glob",
        }
    }
}

impl fmt::Display for PatternEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an engine name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown pattern engine {0:?} (expected 'regex' or 'glob')")]
pub struct UnknownEngine(pub String);

impl FromStr for PatternEngine {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regex" => Ok(Self::Regex),
            "glob" => Ok(Self::Glob),
            other => Err(UnknownEngine(other.to_owned())),
        }
    }
}

/// A glob compiled into a matcher, cheap to clone.
#[derive(Clone)]
pub struct CompiledPattern {
    source: Arc<str>,
    matcher: Arc<dyn PathMatcher>,
}

impl CompiledPattern {
    /// Compiles `glob` with the requested engine.
    pub fn compile(glob: &str, engine: PatternEngine) -> Result<Self, PatternError> {
        let matcher: Arc<dyn PathMatcher> = match engine {
            PatternEngine::Regex => Arc::new(regex_engine::RegexMatcher::compile(glob)?),
            PatternEngine::Glob => Arc::new(glob_engine::GlobMatcher::compile(glob)?),
        };
        Ok(Self::from_matcher(glob, matcher))
    }

    /// Wraps a caller-provided matcher under the given source text.
    pub fn from_matcher(source: &str, matcher: Arc<dyn PathMatcher>) -> Self {
        Self {
            source: Arc::from(source),
            matcher,
        }
    }

    /// Returns the glob text the pattern was compiled from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests `path` against the compiled glob.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("source", &self.source)
            .field("matcher", &self.matcher)
            .finish()
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both(glob: &str) -> [CompiledPattern; 2] {
        [
            CompiledPattern::compile(glob, PatternEngine::Regex).expect("regex compiles"),
            CompiledPattern::compile(glob, PatternEngine::Glob).expect("glob compiles"),
        ]
    }

    #[test]
    fn engines_agree_on_component_globs() {
        let cases: &[(&str, &[&str], &[&str])] = &[
            ("*.txt", &["a.txt", "dir/a.txt", "x/y/z.txt"], &["a.txtx", "a.md"]),
            ("/*.txt", &["a.txt"], &["dir/a.txt"]),
            ("/a/*.txt", &["a/b.txt"], &["a/b/c.txt", "x/a/b.txt"]),
            ("a/", &["a/", "x/a/"], &["a", "ba/"]),
            ("?.md", &["x.md", "d/y.md"], &["xy.md"]),
            ("[ab]c.rs", &["ac.rs", "bc.rs"], &["cc.rs"]),
            ("[!ab]c.rs", &["cc.rs"], &["ac.rs"]),
            ("{x,y}.rs", &["x.rs", "y.rs"], &["z.rs"]),
            ("/**", &["a", "a/b/", "a/b/c"], &[]),
            ("docs/**", &["docs/a", "docs/a/b", "x/docs/a"], &["docsa"]),
        ];

        for (glob, hits, misses) in cases {
            for pattern in both(glob) {
                for hit in *hits {
                    assert!(pattern.is_match(hit), "{pattern:?} should match {hit}");
                }
                for miss in *misses {
                    assert!(!pattern.is_match(miss), "{pattern:?} should not match {miss}");
                }
            }
        }
    }

    #[test]
    fn engines_agree_on_embedded_double_stars() {
        let cases: &[(&str, &[&str], &[&str])] = &[
            ("a**z", &["az", "a/b/z", "x/ab/z"], &["a/b/y", "xa/z"]),
            ("/src/**.rs", &["src/a.rs", "src/a/b.rs", "src/a/b/c.rs"], &["lib/a.rs", "src/a.md"]),
            ("/a/**b", &["a/b", "a/xb", "a/x/y/zb"], &["a/x/c", "b"]),
            ("**.log", &["a.log", "x/y/a.log"], &["a.txt"]),
            ("/x**/y", &["x/y", "xa/y", "x/a/b/y"], &["x/ay", "z/y"]),
        ];

        for (glob, hits, misses) in cases {
            for pattern in both(glob) {
                for hit in *hits {
                    assert!(pattern.is_match(hit), "{pattern:?} should match {hit}");
                }
                for miss in *misses {
                    assert!(!pattern.is_match(miss), "{pattern:?} should not match {miss}");
                }
            }
        }
    }

    #[test]
    fn compiled_pattern_keeps_source_text() {
        let pattern = CompiledPattern::compile("hello/*.txt", PatternEngine::Regex).unwrap();
        assert_eq!(pattern.as_str(), "hello/*.txt");
        assert_eq!(pattern.to_string(), "hello/*.txt");
    }

    #[test]
    fn custom_matchers_are_accepted() {
        #[derive(Debug)]
        struct Always;
        impl PathMatcher for Always {
            fn is_match(&self, _path: &str) -> bool {
                true
            }
        }

        let pattern = CompiledPattern::from_matcher("anything", Arc::new(Always));
        assert!(pattern.is_match("whatever/path"));
    }

    #[test]
    fn engine_names_parse() {
        assert_eq!("regex".parse::<PatternEngine>(), Ok(PatternEngine::Regex));
        assert_eq!("glob".parse::<PatternEngine>(), Ok(PatternEngine::Glob));
        assert!("pcre".parse::<PatternEngine>().is_err());
        assert_eq!(PatternEngine::default().to_string(), "regex");
    }
}
