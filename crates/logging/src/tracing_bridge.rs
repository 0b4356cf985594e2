//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the verbosity flag system.
//!
//! This module provides a tracing subscriber layer that maps tracing events
//! to info and debug flags. Libraries such as `filters` emit ordinary
//! `tracing` events under `sync::<flag>` targets; the layer keeps the ones the
//! current [`VerbosityConfig`] asks for and buffers them as
//! [`DiagnosticEvent`](crate::DiagnosticEvent)s.
//!
//! # Architecture
//!
//! - [`SyncLayer`]: A tracing-subscriber layer that filters and records events
//! - Targets `sync::filter`, `sync::flist` and `sync::time` map to debug flags;
//!   `sync::misc`, `sync::skip` and `sync::stats` map to info flags
//! - `INFO` and above count as level 1, `DEBUG` as level 2, `TRACE` as level 3
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, drain_events, init_tracing};
//!
//! let _guard = init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "sync::filter", "file rule - *.tmp");
//! for event in drain_events() {
//!     eprintln!("{event}");
//! }
//! ```

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use super::thread_local::{debug_gte, emit_debug, emit_info, info_gte};
use tracing::subscriber::DefaultGuard;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

const TARGET_PREFIX: &str = "sync::";

/// A tracing layer that bridges tracing events to the verbosity flags.
#[derive(Debug, Default)]
pub struct SyncLayer;

impl SyncLayer {
    /// Create a new layer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Map a tracing target to an info flag.
    fn target_to_info_flag(target: &str) -> Option<InfoFlag> {
        target
            .strip_prefix(TARGET_PREFIX)
            .and_then(InfoFlag::from_name)
    }

    /// Map a tracing target to a debug flag.
    fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
        target
            .strip_prefix(TARGET_PREFIX)
            .and_then(DebugFlag::from_name)
    }

    /// Map a tracing level to a verbosity level.
    const fn level_to_verbosity_level(level: &Level) -> u8 {
        match *level {
            Level::ERROR | Level::WARN | Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
        }
    }
}

impl<S> Layer<S> for SyncLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        let verbosity_level = Self::level_to_verbosity_level(metadata.level());

        if let Some(debug_flag) = Self::target_to_debug_flag(target) {
            if debug_gte(debug_flag, verbosity_level) {
                let mut visitor = MessageVisitor::default();
                event.record(&mut visitor);
                if let Some(message) = visitor.message {
                    emit_debug(debug_flag, verbosity_level, message);
                }
            }
            return;
        }

        if let Some(info_flag) = Self::target_to_info_flag(target)
            && info_gte(info_flag, verbosity_level)
        {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            if let Some(message) = visitor.message {
                emit_info(info_flag, verbosity_level, message);
            }
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a [`SyncLayer`] subscriber for the current thread.
///
/// The thread-local verbosity configuration is replaced by `config`, and
/// events are buffered until [`drain_events`](crate::drain_events) is called.
/// The subscriber stays in place until the returned guard is dropped, so
/// repeated runs on one thread (as in tests) never conflict.
#[must_use = "the subscriber is removed when the guard is dropped"]
pub fn init_tracing(config: VerbosityConfig) -> DefaultGuard {
    use tracing_subscriber::layer::SubscriberExt;

    super::thread_local::init(config);
    let subscriber = tracing_subscriber::registry().with(SyncLayer::new());
    tracing::subscriber::set_default(subscriber)
}
