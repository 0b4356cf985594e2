use std::io;
use std::path::PathBuf;

use filters::FilterError;

/// Exit code for syntax or usage errors, including invalid filter options.
pub const EXIT_SYNTAX: i32 = 1;
/// Exit code for errors selecting input files, such as an unreadable listing.
pub const EXIT_FILE_SELECTION: i32 = 3;
/// Exit code for failures writing results.
pub const EXIT_FILE_IO: i32 = 11;

/// Failure of one `syncfilter` invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The command line could not be parsed.
    #[error("{0}")]
    Usage(String),
    /// An option value was rejected.
    #[error("invalid {option} value {value:?}: {reason}")]
    InvalidOption {
        /// Option name including dashes.
        option: &'static str,
        /// Value given.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// Building the filter failed.
    #[error(transparent)]
    Filter(#[from] FilterError),
    /// The listing could not be opened or read.
    #[error("failed to read listing '{}': {source}", path.display())]
    Listing {
        /// Listing path, `-` for standard input.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A listing line did not follow `PATH[\tSIZE[\tMTIME]]`.
    #[error("invalid listing line {line}: {reason}")]
    ListingLine {
        /// One-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::InvalidOption { .. } | Self::Filter(_) => EXIT_SYNTAX,
            Self::Listing { .. } | Self::ListingLine { .. } => EXIT_FILE_SELECTION,
            Self::Output(_) => EXIT_FILE_IO,
        }
    }

    pub(crate) fn usage(error: &clap::Error) -> Self {
        let rendered = error.to_string();
        let first = rendered.lines().next().unwrap_or_default();
        Self::Usage(first.strip_prefix("error: ").unwrap_or(first).to_owned())
    }

    /// Renders the one-line diagnostic printed on standard error.
    #[must_use]
    pub fn render(&self) -> String {
        format!("syncfilter error: {self} (code {})", self.exit_code())
    }
}
