//! Command-line parsing and conversion into a [`FilterConfig`].

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::{OsStringValueParser, PathBufValueParser};
use clap::{Arg, ArgAction, ArgMatches, Command};
use filters::{FilterConfig, PatternEngine, SizeSuffix};
use logging::VerbosityConfig;

use crate::CliError;

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) dump_filters: bool,
    pub(crate) list: Option<PathBuf>,
    pub(crate) config: FilterConfig,
    pub(crate) verbosity: VerbosityConfig,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("syncfilter")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("include")
                .long("include")
                .value_name("PATTERN")
                .help("Include files matching PATTERN.")
                .action(ArgAction::Append),
        )
        .arg(path_list("include-from", "Read include patterns from FILE."))
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .value_name("PATTERN")
                .help("Exclude files matching PATTERN.")
                .action(ArgAction::Append),
        )
        .arg(path_list("exclude-from", "Read exclude patterns from FILE."))
        .arg(
            Arg::new("filter")
                .long("filter")
                .short('f')
                .value_name("RULE")
                .help("Add a '+ PATTERN', '- PATTERN' or '!' rule.")
                .allow_hyphen_values(true)
                .action(ArgAction::Append),
        )
        .arg(path_list("filter-from", "Read filter rules from FILE."))
        .arg(path_list("files-from", "Read the exact list of files from FILE."))
        .arg(value_option("min-age", "DURATION", "Skip files newer than DURATION."))
        .arg(value_option("max-age", "DURATION", "Skip files older than DURATION."))
        .arg(value_option("min-size", "SIZE", "Skip files smaller than SIZE."))
        .arg(value_option("max-size", "SIZE", "Skip files larger than SIZE."))
        .arg(
            Arg::new("delete-excluded")
                .long("delete-excluded")
                .help("Delete excluded files on the destination.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dump-filters")
                .long("dump-filters")
                .help("Print the compiled filters.")
                .action(ArgAction::SetTrue),
        )
        .arg(value_option(
            "glob-engine",
            "ENGINE",
            "Glob backend: 'regex' (default) or 'glob'.",
        ))
        .arg(
            Arg::new("list")
                .long("list")
                .value_name("FILE")
                .help("Read the traversal listing from FILE ('-' for stdin).")
                .value_parser(PathBufValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase verbosity.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("info")
                .long("info")
                .value_name("FLAGS")
                .help("Fine-grained informational verbosity.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAGS")
                .help("Fine-grained debug verbosity.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
}

fn path_list(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("FILE")
        .help(help)
        .value_parser(PathBufValueParser::new())
        .action(ArgAction::Append)
}

fn value_option(name: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name(value_name)
        .help(help)
        .overrides_with(name)
        .action(ArgAction::Set)
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from("syncfilter"));
    }

    let mut matches = clap_command()
        .try_get_matches_from(args)
        .map_err(|error| CliError::usage(&error))?;

    let config = FilterConfig {
        include: take_many(&mut matches, "include"),
        include_from: take_many(&mut matches, "include-from"),
        exclude: take_many(&mut matches, "exclude"),
        exclude_from: take_many(&mut matches, "exclude-from"),
        filter: take_many(&mut matches, "filter"),
        filter_from: take_many(&mut matches, "filter-from"),
        files_from: take_many(&mut matches, "files-from"),
        min_age: matches.remove_one::<String>("min-age"),
        max_age: matches.remove_one::<String>("max-age"),
        min_size: size_option(&mut matches, "min-size", "--min-size")?,
        max_size: size_option(&mut matches, "max-size", "--max-size")?,
        delete_excluded: matches.get_flag("delete-excluded"),
        engine: engine_option(&mut matches)?,
    };

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        dump_filters: matches.get_flag("dump-filters"),
        list: matches.remove_one::<PathBuf>("list"),
        verbosity: verbosity(&mut matches)?,
        config,
    })
}

fn take_many<T>(matches: &mut ArgMatches, id: &str) -> Vec<T>
where
    T: Clone + Send + Sync + 'static,
{
    matches
        .remove_many::<T>(id)
        .map(Iterator::collect)
        .unwrap_or_default()
}

fn size_option(
    matches: &mut ArgMatches,
    id: &str,
    option: &'static str,
) -> Result<SizeSuffix, CliError> {
    let Some(value) = matches.remove_one::<String>(id) else {
        return Ok(SizeSuffix::OFF);
    };
    value
        .parse()
        .map_err(|error: filters::ParseSizeError| CliError::InvalidOption {
            option,
            reason: error.to_string(),
            value,
        })
}

fn engine_option(matches: &mut ArgMatches) -> Result<PatternEngine, CliError> {
    let Some(value) = matches.remove_one::<String>("glob-engine") else {
        return Ok(PatternEngine::default());
    };
    value
        .parse()
        .map_err(|error: filters::UnknownEngine| CliError::InvalidOption {
            option: "--glob-engine",
            reason: error.to_string(),
            value,
        })
}

fn verbosity(matches: &mut ArgMatches) -> Result<VerbosityConfig, CliError> {
    let mut config = VerbosityConfig::from_verbose_level(matches.get_count("verbose"));
    for (id, option) in [("info", "--info"), ("debug", "--debug")] {
        for value in take_many::<OsString>(matches, id) {
            let list = value.to_string_lossy();
            let applied = if id == "info" {
                config.apply_info_flags(&list)
            } else {
                config.apply_debug_flags(&list)
            };
            applied.map_err(|reason| CliError::InvalidOption {
                option,
                value: list.into_owned(),
                reason,
            })?;
        }
    }
    Ok(config)
}
