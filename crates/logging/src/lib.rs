#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the verbosity flag system shared by the `syncfilter`
//! workspace. Output is split into info flags (`misc`, `skip`, `stats`) and
//! debug flags (`filter`, `flist`, `time`), each with its own level, set from a
//! `-v` count or from `--info=FLAGS` / `--debug=FLAGS` lists.
//!
//! # Design
//!
//! - [`VerbosityConfig`] stores one level per flag and understands the
//!   `name[level]` token syntax, including the `ALL` and `NONE` keywords.
//! - The active configuration lives in thread-local storage ([`init`],
//!   [`info_gte`], [`debug_gte`]), next to a buffer of [`DiagnosticEvent`]s
//!   that the front-end drains and prints.
//! - With the `tracing` feature, `SyncLayer` turns ordinary `tracing` events
//!   with `sync::<flag>` targets into buffered diagnostics, so libraries never
//!   depend on this crate directly.
//!
//! # Invariants
//!
//! - A flag at level `n` accepts every event of level `n` or below.
//! - Configuration and buffered events never cross threads.
//!
//! # Errors
//!
//! Flag parsing returns a `String` naming the offending token; nothing else in
//! the crate fails.
//!
//! # Examples
//!
//! ```
//! use logging::{InfoFlag, VerbosityConfig, info_gte, init};
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_info_flags("skip,stats2").unwrap();
//! init(config);
//!
//! assert!(info_gte(InfoFlag::Skip, 1));
//! assert!(info_gte(InfoFlag::Stats, 2));
//! ```

mod config;
mod levels;
mod thread_local;
#[cfg(feature = "tracing")]
mod tracing_bridge;
#[cfg(feature = "tracing")]
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use thread_local::{
    DiagnosticEvent, apply_debug_flag, apply_info_flag, debug_gte, drain_events, emit_debug,
    emit_info, info_gte, init,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{SyncLayer, init_tracing};
