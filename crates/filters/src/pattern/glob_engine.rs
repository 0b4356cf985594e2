use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use super::PathMatcher;
use crate::PatternError;

/// Glob compiled by `globset` with `/` treated as a literal separator.
///
/// `globset` only recurses on `**` when it is a whole path component. Any
/// other `**` is expanded into the two shapes it can take, `*` within one
/// component or `*/**/*` across several, and the alternatives are matched as
/// one set.
#[derive(Debug)]
pub(super) struct GlobMatcher(GlobSet);

impl GlobMatcher {
    pub(super) fn compile(glob: &str) -> Result<Self, PatternError> {
        let text = match glob.strip_prefix('/') {
            Some(anchored) => anchored.to_owned(),
            None => format!("**/{glob}"),
        };
        let mut builder = GlobSetBuilder::new();
        for alternative in expand_double_stars(&text)? {
            builder.add(
                GlobBuilder::new(&alternative)
                    .literal_separator(true)
                    .backslash_escape(true)
                    .build()?,
            );
        }
        Ok(Self(builder.build()?))
    }
}

impl PathMatcher for GlobMatcher {
    fn is_match(&self, path: &str) -> bool {
        self.0.is_match(path)
    }
}

/// Splits `text` at every `**` that is not a whole path component and returns
/// each combination of `*` and `*/**/*` in its place.
fn expand_double_stars(text: &str) -> Result<Vec<String>, PatternError> {
    let chars: Vec<char> = text.chars().collect();
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut in_class = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                current.push(c);
                if let Some(&escaped) = chars.get(i + 1) {
                    current.push(escaped);
                }
                i += 2;
                continue;
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '*' if !in_class => {
                let run = chars[i..].iter().take_while(|&&c| c == '*').count();
                if run > 2 {
                    return Err(PatternError::TooManyStars);
                }
                let whole = i.checked_sub(1).is_none_or(|before| chars[before] == '/')
                    && chars.get(i + run).is_none_or(|&after| after == '/');
                if run == 2 && !whole {
                    pieces.push(std::mem::take(&mut current));
                } else {
                    current.extend(std::iter::repeat_n('*', run));
                }
                i += run;
                continue;
            }
            _ => {}
        }
        current.push(c);
        i += 1;
    }
    pieces.push(current);

    let mut pieces = pieces.into_iter();
    let mut alternatives: Vec<String> = pieces.next().into_iter().collect();
    for piece in pieces {
        alternatives = alternatives
            .into_iter()
            .flat_map(|prefix| {
                [
                    format!("{prefix}*{piece}"),
                    format!("{prefix}*/**/*{piece}"),
                ]
            })
            .collect();
    }
    Ok(alternatives)
}
