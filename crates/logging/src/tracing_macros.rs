//! crates/logging/src/tracing_macros.rs
//! Convenience macros for flag-targeted tracing.
//!
//! These macros provide ergonomic wrappers around standard tracing macros
//! with the targets [`SyncLayer`](crate::SyncLayer) maps onto flags.

/// Emit a miscellaneous progress trace (`--info=misc`).
///
/// # Example
/// ```ignore
/// trace_misc!("reading listing from {}", source);
/// ```
#[macro_export]
macro_rules! trace_misc {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "sync::misc", $($arg)*);
    };
}

/// Emit a skipped-entry trace (`--info=skip`).
///
/// # Example
/// ```ignore
/// trace_skip!("excluded {}", path);
/// ```
#[macro_export]
macro_rules! trace_skip {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "sync::skip", $($arg)*);
    };
}

/// Emit a statistics trace (`--info=stats`).
///
/// # Example
/// ```ignore
/// trace_stats!("{} files included", count);
/// ```
#[macro_export]
macro_rules! trace_stats {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "sync::stats", $($arg)*);
    };
}

/// Emit a filter trace (`--debug=filter2`).
///
/// # Example
/// ```ignore
/// trace_filter!("cached verdict for {}", dir);
/// ```
#[macro_export]
macro_rules! trace_filter {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "sync::filter", $($arg)*);
    };
}
