use std::io;
use std::path::PathBuf;

use crate::age::ParseAgeError;

/// Error produced when a glob cannot be compiled into a matcher.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// A `[` was never closed, or a `]` appeared without an opening `[`.
    #[error("mismatched '[' and ']'")]
    UnbalancedClass,
    /// A `{` was never closed, or a `}` appeared without an opening `{`.
    #[error("mismatched '{{' and '}}'")]
    UnbalancedBraces,
    /// Alternation groups cannot nest.
    #[error("can't nest '{{' '}}'")]
    NestedBraces,
    /// Three or more consecutive `*` have no meaning.
    #[error("too many stars")]
    TooManyStars,
    /// The glob ends with a lone `\`.
    #[error("trailing escape character")]
    TrailingEscape,
    /// The translated regular expression was rejected.
    #[error(transparent)]
    Regex(#[from] regex::Error),
    /// The glob was rejected by the globset engine.
    #[error(transparent)]
    Glob(#[from] globset::Error),
}

/// Error produced while building a [`Filter`](crate::Filter).
///
/// Every variant is fatal to construction: callers never receive a partially
/// populated filter.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// A glob failed to compile.
    #[error("failed to compile filter pattern '{pattern}': {source}")]
    Pattern {
        /// Offending glob text.
        pattern: String,
        /// Underlying compiler error.
        #[source]
        source: PatternError,
    },
    /// A `+`/`-`/`!` rule line did not match the rule grammar.
    #[error("malformed rule {0:?}")]
    MalformedRule(String),
    /// A pattern, rule or files-from file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A `--min-age`/`--max-age` value could not be parsed.
    #[error("invalid {option} value: {source}")]
    Age {
        /// Option the value was supplied for.
        option: &'static str,
        /// Parse failure.
        #[source]
        source: ParseAgeError,
    },
    /// An age reaches further back than the clock can represent.
    #[error("{option} value reaches before the start of the clock")]
    AgeOutOfRange {
        /// Option the value was supplied for.
        option: &'static str,
    },
    /// The resolved `--min-age` bound precedes the `--max-age` bound.
    #[error("argument --min-age can't be larger than --max-age")]
    AgeRange,
}

impl FilterError {
    pub(crate) fn pattern(pattern: &str, source: PatternError) -> Self {
        Self::Pattern {
            pattern: pattern.to_owned(),
            source,
        }
    }

    /// Returns the offending glob for [`FilterError::Pattern`] errors.
    #[must_use]
    pub fn offending_pattern(&self) -> Option<&str> {
        match self {
            Self::Pattern { pattern, .. } => Some(pattern),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterError, PatternError};
    use std::error::Error as _;

    #[test]
    fn pattern_error_preserves_pattern_and_source() {
        let error = FilterError::pattern("[", PatternError::UnbalancedClass);

        assert_eq!(error.offending_pattern(), Some("["));
        assert!(error.to_string().contains("failed to compile"));
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("mismatched '[' and ']'")
        );
    }

    #[test]
    fn malformed_rule_quotes_the_line() {
        let error = FilterError::MalformedRule("* foo".into());
        assert_eq!(error.to_string(), "malformed rule \"* foo\"");
        assert_eq!(error.offending_pattern(), None);
    }

    #[test]
    fn brace_messages_render_literal_braces() {
        assert_eq!(
            PatternError::UnbalancedBraces.to_string(),
            "mismatched '{' and '}'"
        );
        assert_eq!(PatternError::NestedBraces.to_string(), "can't nest '{' '}'");
    }
}
