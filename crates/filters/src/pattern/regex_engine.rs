use regex::Regex;

use super::PathMatcher;
use crate::PatternError;

/// Glob translated into an anchored regular expression.
#[derive(Debug)]
pub(super) struct RegexMatcher(Regex);

impl RegexMatcher {
    pub(super) fn compile(glob: &str) -> Result<Self, PatternError> {
        let expression = glob_to_regex(glob)?;
        Ok(Self(Regex::new(&expression)?))
    }
}

impl PathMatcher for RegexMatcher {
    fn is_match(&self, path: &str) -> bool {
        self.0.is_match(path)
    }
}

/// Translates a glob into regular expression source.
///
/// `*` becomes `[^/]*`, `**` becomes `.*` and `?` becomes `[^/]`. Classes are
/// copied through with a leading `!` turned into `^`, `{a,b}` becomes a
/// non-capturing alternation, and every other character is matched literally.
pub(crate) fn glob_to_regex(glob: &str) -> Result<String, PatternError> {
    let mut re = String::with_capacity(glob.len() * 2 + 8);
    let body = match glob.strip_prefix('/') {
        Some(rest) => {
            re.push('^');
            rest
        }
        None => {
            re.push_str("(?:^|/)");
            glob
        }
    };

    let mut stars = 0usize;
    let mut class_depth = 0usize;
    let mut class_start = false;
    let mut in_braces = false;
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if class_depth > 0 {
            let at_start = class_start;
            class_start = false;
            match c {
                '\\' => {
                    let escaped = chars.next().ok_or(PatternError::TrailingEscape)?;
                    push_class_literal(&mut re, escaped);
                }
                '!' | '^' if at_start => re.push('^'),
                '[' => {
                    class_depth += 1;
                    re.push('[');
                }
                ']' => {
                    class_depth -= 1;
                    re.push(']');
                }
                '&' | '~' => push_class_literal(&mut re, c),
                _ => re.push(c),
            }
            continue;
        }

        if c != '*' {
            flush_stars(&mut re, &mut stars)?;
        }

        match c {
            '\\' => {
                let escaped = chars.next().ok_or(PatternError::TrailingEscape)?;
                push_literal(&mut re, escaped);
            }
            '*' => stars += 1,
            '?' => re.push_str("[^/]"),
            '[' => {
                class_depth = 1;
                class_start = true;
                re.push('[');
            }
            ']' => return Err(PatternError::UnbalancedClass),
            '{' => {
                if in_braces {
                    return Err(PatternError::NestedBraces);
                }
                in_braces = true;
                re.push_str("(?:");
            }
            '}' => {
                if !in_braces {
                    return Err(PatternError::UnbalancedBraces);
                }
                in_braces = false;
                re.push(')');
            }
            ',' if in_braces => re.push('|'),
            _ => push_literal(&mut re, c),
        }
    }

    flush_stars(&mut re, &mut stars)?;
    if class_depth > 0 {
        return Err(PatternError::UnbalancedClass);
    }
    if in_braces {
        return Err(PatternError::UnbalancedBraces);
    }
    re.push('$');
    Ok(re)
}

fn flush_stars(re: &mut String, stars: &mut usize) -> Result<(), PatternError> {
    match *stars {
        0 => {}
        1 => re.push_str("[^/]*"),
        2 => re.push_str(".*"),
        _ => return Err(PatternError::TooManyStars),
    }
    *stars = 0;
    Ok(())
}

fn push_literal(re: &mut String, c: char) {
    let mut buf = [0u8; 4];
    re.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

fn push_class_literal(re: &mut String, c: char) {
    if matches!(c, '\\' | '[' | ']' | '^' | '-' | '&' | '~') {
        re.push('\\');
    }
    re.push(c);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_wildcards() {
        let cases = [
            ("*.jpg", r"(?:^|/)[^/]*\.jpg$"),
            ("/*.jpg", r"^[^/]*\.jpg$"),
            ("a/**/b", r"(?:^|/)a/.*/b$"),
            ("/**", r"^.*$"),
            ("?x", r"(?:^|/)[^/]x$"),
            ("[!a-c]d", r"(?:^|/)[^a-c]d$"),
            ("{one,two}.md", r"(?:^|/)(?:one|two)\.md$"),
            ("a+b(c)", r"(?:^|/)a\+b\(c\)$"),
            (r"a\*b", r"(?:^|/)a\*b$"),
            ("x,y", r"(?:^|/)x,y$"),
        ];

        for (glob, expected) in cases {
            assert_eq!(glob_to_regex(glob).unwrap(), expected, "glob {glob}");
        }
    }

    #[test]
    fn nested_classes_are_copied_through() {
        assert_eq!(
            glob_to_regex("[[:digit:]]x").unwrap(),
            r"(?:^|/)[[:digit:]]x$"
        );
        let matcher = RegexMatcher::compile("[[:digit:]]x").unwrap();
        assert!(matcher.is_match("7x"));
        assert!(!matcher.is_match("ax"));
    }

    #[test]
    fn malformed_globs_are_rejected() {
        assert!(matches!(
            glob_to_regex("[abc"),
            Err(PatternError::UnbalancedClass)
        ));
        assert!(matches!(
            glob_to_regex("abc]"),
            Err(PatternError::UnbalancedClass)
        ));
        assert!(matches!(
            glob_to_regex("{a,b"),
            Err(PatternError::UnbalancedBraces)
        ));
        assert!(matches!(
            glob_to_regex("a,b}"),
            Err(PatternError::UnbalancedBraces)
        ));
        assert!(matches!(
            glob_to_regex("{a,{b}}"),
            Err(PatternError::NestedBraces)
        ));
        assert!(matches!(
            glob_to_regex("a***"),
            Err(PatternError::TooManyStars)
        ));
        assert!(matches!(
            glob_to_regex("trailing\\"),
            Err(PatternError::TrailingEscape)
        ));
    }

    #[test]
    fn single_star_stops_at_separator() {
        let matcher = RegexMatcher::compile("/a/*").unwrap();
        assert!(matcher.is_match("a/b"));
        assert!(!matcher.is_match("a/b/c"));
    }

    #[test]
    fn unanchored_globs_match_at_component_boundaries_only() {
        let matcher = RegexMatcher::compile("b.txt").unwrap();
        assert!(matcher.is_match("b.txt"));
        assert!(matcher.is_match("a/b.txt"));
        assert!(!matcher.is_match("ab.txt"));
        assert!(!matcher.is_match("b.txt.bak"));
    }
}
