/// Directory glob matching every directory from the root down.
pub const ROOT_RECURSIVE: &str = "/**";

/// Derives the directory globs a traversal must enter to reach files matching
/// `glob`.
///
/// Each returned glob ends in `/` and is meant to be matched against directory
/// paths carrying a trailing `/`. The glob is cut repeatedly at its last `/` or
/// last `**`, whichever comes later, and every prefix becomes one directory
/// level. A glob without any separator yields [`ROOT_RECURSIVE`], as does an
/// alternation group hiding a `/` or `**` or a character class containing
/// `/`, since none of them can be cut cleanly.
///
/// For root-anchored globs and separator-free globs the result is sound: no
/// directory that could hold a match is left out, though directories that end
/// up holding nothing may be kept. An unanchored glob with several components
/// yields prefixes that only match where the glob's first component can start
/// a path, so `hello/*.txt` does not enter `x/` even though
/// `x/hello/a.txt` would match.
///
/// ```
/// use filters::dir_globs;
///
/// assert_eq!(dir_globs("a/b/*.txt"), ["a/b/", "a/"]);
/// assert_eq!(dir_globs("/top/*.jpg"), ["/top/", "/"]);
/// assert_eq!(dir_globs("*.jpg"), ["/**"]);
/// ```
#[must_use]
pub fn dir_globs(glob: &str) -> Vec<String> {
    if has_opaque_group(glob) || has_separator_class(glob) {
        return vec![ROOT_RECURSIVE.to_owned()];
    }

    let mut glob = squash_slashes(glob);
    let mut out: Vec<String> = Vec::new();

    loop {
        let slash = glob.rfind('/');
        let stars = glob.rfind("**");
        let (cut, suffix) = match (slash, stars) {
            (slash, Some(stars)) if slash.is_none_or(|slash| stars > slash) => (stars, "**"),
            (Some(slash), _) => (slash, ""),
            _ => {
                if out.is_empty() {
                    out.push(ROOT_RECURSIVE.to_owned());
                }
                break;
            }
        };

        glob.truncate(cut);
        let candidate = format!("{glob}{suffix}/");
        if out.last() != Some(&candidate) {
            out.push(candidate);
        }
    }

    out
}

/// Reports whether a `{...}` group contains a `/` or `**`.
fn has_opaque_group(glob: &str) -> bool {
    let mut rest = glob;
    while let Some(open) = rest.find('{') {
        let group = &rest[open + 1..];
        let Some(close) = group.find(['{', '}']) else {
            return false;
        };
        if group[close..].starts_with('}') {
            let body = &group[..close];
            if body.contains('/') || body.contains("**") {
                return true;
            }
            rest = &group[close + 1..];
        } else {
            rest = &group[close..];
        }
    }
    false
}

/// Reports whether a `[...]` class contains a `/`.
fn has_separator_class(glob: &str) -> bool {
    let mut chars = glob.chars();
    let mut in_class = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next() == Some('/') && in_class {
                    return true;
                }
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '/' if in_class => return true,
            _ => {}
        }
    }
    false
}

fn squash_slashes(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len());
    let mut previous_slash = false;
    for c in glob.chars() {
        if c == '/' && previous_slash {
            continue;
        }
        previous_slash = c == '/';
        out.push(c);
    }
    out
}
