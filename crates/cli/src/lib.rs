#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of `syncfilter`. It maps the
//! include/exclude options onto a [`FilterConfig`], builds the
//! [`Filter`], optionally prints the compiled rules, and evaluates a traversal
//! listing the way a sync engine would: directories are pruned as soon as the
//! filter rejects them, and only entries below entered directories are tested.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for standard
//! output and error, and returns the process exit code. [`run_with_input`]
//! additionally takes the reader used for a listing on standard input, which
//! keeps the whole front-end testable with in-memory buffers. A
//! [`clap`](https://docs.rs/clap/) command definition performs the parse;
//! help and version output are rendered here rather than by clap so the text
//! stays stable.
//!
//! # Invariants
//!
//! - `run` never panics; every failure becomes a [`CliError`] with an exit
//!   code.
//! - Diagnostics enabled through `-v`, `--info` or `--debug` go to standard
//!   error after the run, never to standard output.
//!
//! # Errors
//!
//! Argument and filter errors exit with `1`, unreadable or malformed listings
//! with `3`, and failures writing standard output with `11`. Each is reported
//! on standard error as `syncfilter error: <message> (code N)`.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let listing = "src/\nsrc/main.rs\nnotes.tmp\n";
//! let exit_code = cli::run_with_input(
//!     ["syncfilter", "--exclude", "*.tmp"],
//!     listing.as_bytes(),
//!     &mut stdout,
//!     &mut stderr,
//! );
//!
//! assert_eq!(exit_code, 0);
//! assert_eq!(String::from_utf8(stdout).unwrap(), "src/\nsrc/main.rs\n");
//! assert!(stderr.is_empty());
//! ```
//!
//! # See also
//!
//! - `src/bin/syncfilter.rs` in the root package for the binary that wires
//!   [`run`] into `main`.

mod arguments;
mod error;
mod listing;

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use filters::{Filter, FilterConfig};

use arguments::{ParsedArgs, parse_args};
pub use error::{CliError, EXIT_FILE_IO, EXIT_FILE_SELECTION, EXIT_SYNTAX};
use listing::Evaluator;

/// Deterministic help text describing the command-line surface.
const HELP_TEXT: &str = concat!(
    "syncfilter ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: syncfilter [OPTIONS]\n",
    "\n",
    "Builds an include/exclude filter and applies it to a traversal listing\n",
    "read from --list FILE or standard input. Each listing line is\n",
    "PATH[<TAB>SIZE[<TAB>MTIME]] with MTIME in Unix seconds; a trailing '/'\n",
    "marks a directory. Included entries are printed in listing order.\n",
    "\n",
    "Filter options:\n",
    "      --include=PATTERN      Include files matching PATTERN.\n",
    "      --include-from=FILE    Read include patterns from FILE.\n",
    "      --exclude=PATTERN      Exclude files matching PATTERN.\n",
    "      --exclude-from=FILE    Read exclude patterns from FILE.\n",
    "  -f, --filter=RULE          Add a '+ PATTERN', '- PATTERN' or '!' rule.\n",
    "      --filter-from=FILE     Read filter rules from FILE.\n",
    "      --files-from=FILE      Read the exact list of files from FILE.\n",
    "      --min-age=DURATION     Skip files newer than DURATION (ms|s|m|h|d|w|M|y).\n",
    "      --max-age=DURATION     Skip files older than DURATION.\n",
    "      --min-size=SIZE        Skip files smaller than SIZE (b|k|M|G, default k).\n",
    "      --max-size=SIZE        Skip files larger than SIZE.\n",
    "      --delete-excluded      Delete excluded files on the destination.\n",
    "      --glob-engine=ENGINE   Glob backend: 'regex' (default) or 'glob'.\n",
    "\n",
    "Output options:\n",
    "      --dump-filters         Print the compiled filters. Without --list,\n",
    "                             exit after printing.\n",
    "      --list=FILE            Read the listing from FILE ('-' for stdin).\n",
    "  -v, --verbose              Increase verbosity (repeatable).\n",
    "      --info=FLAGS           Info flags: misc, skip, stats, ALL, NONE.\n",
    "      --debug=FLAGS          Debug flags: filter, flist, time, ALL, NONE.\n",
    "  -h, --help                 Show this help message and exit.\n",
    "  -V, --version              Output version information and exit.\n",
);

/// Runs the CLI, reading a listing on standard input when one is needed.
///
/// The function returns the process exit code that should be used by the
/// caller. On success, `0` is returned.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let stdin = io::stdin();
    run_with_input(arguments, stdin.lock(), stdout, stderr)
}

/// Runs the CLI with `input` standing in for standard input.
pub fn run_with_input<I, S, R, Out, Err>(
    arguments: I,
    input: R,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    R: BufRead,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return report(&error, stderr),
    };

    let guard = logging::init_tracing(parsed.verbosity.clone());
    let result = execute(parsed, input, stdout);
    drop(guard);

    for event in logging::drain_events() {
        let _ = writeln!(stderr, "{event}");
    }

    match result {
        Ok(()) => 0,
        Err(error) => report(&error, stderr),
    }
}

fn report<Err: Write>(error: &CliError, stderr: &mut Err) -> i32 {
    let _ = writeln!(stderr, "{}", error.render());
    error.exit_code()
}

fn execute<R, Out>(parsed: ParsedArgs, input: R, stdout: &mut Out) -> Result<(), CliError>
where
    R: BufRead,
    Out: Write,
{
    let ParsedArgs {
        show_help,
        show_version,
        dump_filters,
        list,
        config,
        verbosity: _,
    } = parsed;

    if show_help {
        stdout.write_all(HELP_TEXT.as_bytes())?;
        return Ok(());
    }
    if show_version {
        writeln!(stdout, "syncfilter {}", env!("CARGO_PKG_VERSION"))?;
        return Ok(());
    }

    let filter = build_filter(&config)?;

    if dump_filters {
        writeln!(stdout, "--- start filters ---")?;
        writeln!(stdout, "{}", filter.dump_filters())?;
        writeln!(stdout, "--- end filters ---")?;
        if list.is_none() {
            stdout.flush()?;
            return Ok(());
        }
    }

    let mut evaluator = Evaluator::new(&filter);
    match list.as_deref() {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path).map_err(|source| CliError::Listing {
                path: path.to_path_buf(),
                source,
            })?;
            logging::trace_misc!("reading listing from {}", path.display());
            evaluator.run(BufReader::new(file), path, stdout)?;
        }
        _ => {
            logging::trace_misc!("reading listing from standard input");
            evaluator.run(input, Path::new("-"), stdout)?;
        }
    }
    evaluator.finish();
    stdout.flush()?;
    Ok(())
}

fn build_filter(config: &FilterConfig) -> Result<Filter, CliError> {
    let filter = Filter::from_config(config)?;
    logging::trace_misc!(
        "filter built: {} file rules, {} directory rules{}",
        filter.file_rules().len(),
        filter.dir_rules().len(),
        if filter.files().is_some() {
            ", file list active"
        } else {
            ""
        }
    );
    Ok(filter)
}
