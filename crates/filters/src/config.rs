use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::{FilterError, PatternEngine, SizeSuffix};

/// Everything [`Filter::from_config`](crate::Filter::from_config) needs.
///
/// Each list is processed as one block, and the blocks run in the order the
/// fields are declared: include globs, include files, exclude globs, exclude
/// files, rule strings, rule files, then files-from lists. `Default` leaves
/// every filter off.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterConfig {
    /// `--include` globs.
    pub include: Vec<String>,
    /// `--include-from` files, one glob per line.
    pub include_from: Vec<PathBuf>,
    /// `--exclude` globs.
    pub exclude: Vec<String>,
    /// `--exclude-from` files, one glob per line.
    pub exclude_from: Vec<PathBuf>,
    /// `--filter` rules in the `+ GLOB` / `- GLOB` / `!` language.
    pub filter: Vec<String>,
    /// `--filter-from` files, one rule per line.
    pub filter_from: Vec<PathBuf>,
    /// `--files-from` files, one path per line.
    pub files_from: Vec<PathBuf>,
    /// `--min-age`: skip files modified more recently than this.
    pub min_age: Option<String>,
    /// `--max-age`: skip files modified longer ago than this.
    pub max_age: Option<String>,
    /// `--min-size`.
    pub min_size: SizeSuffix,
    /// `--max-size`.
    pub max_size: SizeSuffix,
    /// `--delete-excluded`, carried for the sync engine.
    pub delete_excluded: bool,
    /// Backend used to compile globs.
    pub engine: PatternEngine,
}

impl FilterConfig {
    /// Returns `true` when an include glob or include file was given, which
    /// makes the filter append a trailing exclude-all rule.
    #[must_use]
    pub fn wants_implicit_exclude(&self) -> bool {
        !self.include.is_empty() || !self.include_from.is_empty()
    }
}

/// Calls `f` with every meaningful line of the file at `path`.
///
/// Lines are trimmed; blank lines and lines starting with `#` or `;` are
/// skipped. The first error from `f` stops the walk.
pub fn for_each_line<F>(path: &Path, mut f: F) -> Result<(), FilterError>
where
    F: FnMut(&str) -> Result<(), FilterError>,
{
    let io_error = |source| FilterError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_error)?);
    for line in reader.lines() {
        let line = line.map_err(io_error)?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(['#', ';']) {
            continue;
        }
        f(line)?;
    }
    Ok(())
}
