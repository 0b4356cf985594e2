//! Evaluation of a traversal listing against a [`Filter`].
//!
//! Each listing line is `PATH[\tSIZE[\tMTIME]]`. A trailing `/` marks a
//! directory, `SIZE` defaults to 0 and `MTIME` (Unix seconds) to the epoch.
//! Entries are visited in listing order and an entry is only considered when
//! every ancestor directory passes [`Filter::include_directory`], as it would
//! be during a real traversal.

use std::io::{BufRead, Write};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use filters::debug_filter::FilterTracer;
use filters::{Filter, Object};
use rustc_hash::FxHashMap;

use crate::CliError;

/// One parsed listing line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Entry {
    path: String,
    is_dir: bool,
    size: i64,
    mod_time: SystemTime,
}

impl Entry {
    /// Parses a listing line. Returns `Ok(None)` for blank lines.
    pub(crate) fn parse(line: &str, number: usize) -> Result<Option<Self>, CliError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let invalid = |reason: String| CliError::ListingLine {
            line: number,
            reason,
        };
        let mut fields = line.split('\t');
        let raw_path = fields.next().unwrap_or_default();
        let size = match fields.next() {
            Some(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|error| invalid(format!("bad size {text:?}: {error}")))?,
            None => 0,
        };
        let mod_time = match fields.next() {
            Some(text) => {
                let seconds = text
                    .trim()
                    .parse::<i64>()
                    .map_err(|error| invalid(format!("bad mtime {text:?}: {error}")))?;
                unix_time(seconds)
                    .ok_or_else(|| invalid(format!("mtime {seconds} is out of range")))?
            }
            None => UNIX_EPOCH,
        };
        if fields.next().is_some() {
            return Err(invalid("too many fields".to_owned()));
        }

        let is_dir = raw_path.ends_with('/');
        let path = raw_path.trim_matches('/');
        if path.is_empty() {
            return Err(invalid("empty path".to_owned()));
        }

        Ok(Some(Self {
            path: path.to_owned(),
            is_dir,
            size,
            mod_time,
        }))
    }
}

impl Object for Entry {
    fn remote(&self) -> &str {
        &self.path
    }

    fn size(&self) -> i64 {
        self.size
    }

    fn mod_time(&self) -> SystemTime {
        self.mod_time
    }
}

fn unix_time(seconds: i64) -> Option<SystemTime> {
    let offset = Duration::from_secs(seconds.unsigned_abs());
    if seconds >= 0 {
        UNIX_EPOCH.checked_add(offset)
    } else {
        UNIX_EPOCH.checked_sub(offset)
    }
}

/// Walks listing entries, caching directory verdicts.
pub(crate) struct Evaluator<'a> {
    filter: &'a Filter,
    directories: FxHashMap<String, bool>,
    tracer: FilterTracer,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(filter: &'a Filter) -> Self {
        Self {
            filter,
            directories: FxHashMap::default(),
            tracer: FilterTracer::new(),
        }
    }

    /// Evaluates every line of `input`, writing included entries to `out`.
    ///
    /// `source` names the listing in read errors.
    pub(crate) fn run<R, W>(&mut self, input: R, source: &Path, out: &mut W) -> Result<(), CliError>
    where
        R: BufRead,
        W: Write,
    {
        for (index, line) in input.lines().enumerate() {
            let line = line.map_err(|error| CliError::Listing {
                path: source.to_path_buf(),
                source: error,
            })?;
            if let Some(entry) = Entry::parse(&line, index + 1)?
                && self.visit(&entry)
            {
                if entry.is_dir {
                    writeln!(out, "{}/", entry.path)?;
                } else {
                    writeln!(out, "{}", entry.path)?;
                }
            }
        }
        Ok(())
    }

    /// Returns `true` when `entry` is reachable and included.
    pub(crate) fn visit(&mut self, entry: &Entry) -> bool {
        if let Some(pruned) = self.pruned_ancestor(&entry.path) {
            logging::trace_skip!("{}: skipped, parent {pruned}/ was pruned", entry.path);
            return false;
        }

        if entry.is_dir {
            let included = self.directory(&entry.path);
            self.tracer.record_directory(included);
            if !included {
                logging::trace_skip!("{}/: directory pruned", entry.path);
            }
            included
        } else {
            let included = self.filter.include_object(entry);
            self.tracer.record_file(included);
            if !included {
                logging::trace_skip!("{}: excluded", entry.path);
            }
            included
        }
    }

    /// Emits the decision summary on the `stats` flag.
    pub(crate) fn finish(&self) {
        self.tracer.summary();
    }

    /// Counters collected so far.
    pub(crate) const fn tracer(&self) -> &FilterTracer {
        &self.tracer
    }

    fn pruned_ancestor(&mut self, path: &str) -> Option<String> {
        let ancestors: Vec<&str> = path.match_indices('/').map(|(idx, _)| &path[..idx]).collect();
        ancestors
            .into_iter()
            .find(|dir| !self.directory(dir))
            .map(str::to_owned)
    }

    fn directory(&mut self, dir: &str) -> bool {
        if let Some(&cached) = self.directories.get(dir) {
            return cached;
        }
        let included = self.filter.include_directory(dir);
        logging::trace_filter!("directory {dir}/ cached as {included}");
        self.directories.insert(dir.to_owned(), included);
        included
    }
}
