#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` decides, for every path a traversal of a remote tree discovers,
//! whether the entry takes part in a sync, and which directories the traversal
//! may skip without missing a wanted file. Decisions are pure functions of the
//! path, its size and its modification time; the only I/O happens while
//! reading pattern, rule and files-from files during construction.
//!
//! # Design
//!
//! - [`CompiledPattern`] holds a glob compiled by one of two engines behind the
//!   [`PathMatcher`] trait. [`dir_globs`] derives from a file glob the
//!   directory globs a traversal must enter to reach its matches.
//! - [`Rule`] pairs a [`FilterAction`] with a compiled pattern. [`RuleSet`]
//!   keeps rules in insertion order and drops exact duplicates, keyed by
//!   action and glob text.
//! - [`Filter`] owns one rule set for files and one for directories, the size
//!   and modification-time bounds, and an optional [`FileList`]. It is built
//!   from a [`FilterConfig`] by [`Filter::from_config`] and never changes
//!   afterwards.
//!
//! # Invariants
//!
//! - The first matching rule decides; paths no rule matches are included.
//! - Directory rules are matched against the directory path with a trailing
//!   `/`, so `logs/` only ever matches directories.
//! - Only file-scoped include rules (and `*`) derive directory rules.
//!   Excluding some files never prunes the directories holding them.
//! - While a file list is present the rule sets are ignored: files must be
//!   listed, directories must be ancestors of listed files, and the size and
//!   time bounds do not apply.
//! - Include globs and include files append a trailing `/**` exclude after
//!   every other source, files-from lists included. `+` rules do not.
//!
//! # Errors
//!
//! Construction reports [`FilterError`]: globs that fail to compile, malformed
//! rule lines, unreadable files, unparsable ages, and a `--min-age` bound older
//! than the `--max-age` bound. Decisions never fail.
//!
//! # Examples
//!
//! Include Rust sources under `src/` and nothing else:
//!
//! ```
//! use filters::{Filter, FilterConfig};
//! use std::time::UNIX_EPOCH;
//!
//! let config = FilterConfig {
//!     include: vec!["/src/**.rs".into()],
//!     ..FilterConfig::default()
//! };
//! let filter = Filter::from_config(&config).expect("filter builds");
//!
//! assert!(filter.include_directory("src"));
//! assert!(filter.include_directory("src/net"));
//! assert!(!filter.include_directory("target"));
//! assert!(filter.include("src/net/tcp.rs", 120, UNIX_EPOCH));
//! assert!(!filter.include("README.md", 120, UNIX_EPOCH));
//! ```
//!
//! # See also
//!
//! - [`debug_filter`] for the tracing hooks emitted while building and
//!   evaluating a filter.

mod action;
mod age;
mod config;
pub mod debug_filter;
mod decision;
mod error;
mod file_list;
mod filter;
mod object;
mod pattern;
mod rule;
mod set;
mod size;

pub use action::FilterAction;
pub use age::{ParseAgeError, parse_age};
pub use config::{FilterConfig, for_each_line};
pub use error::{FilterError, PatternError};
pub use file_list::FileList;
pub use filter::Filter;
pub use object::Object;
pub use pattern::{
    CompiledPattern, PathMatcher, PatternEngine, ROOT_RECURSIVE, UnknownEngine, dir_globs,
};
pub use rule::{Rule, RuleDirective, RuleScope};
pub use set::RuleSet;
pub use size::{ParseSizeError, SizeSuffix};
