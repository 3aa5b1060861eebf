//! Command line handling for `xcpick [-hHv] [-p prefix]`.
//!
//! clap does the parsing; its own help, version and error reporting are
//! switched off so that every failure surfaces as a [`PickError`] and goes
//! through the same `xcpick: <message>` path with exit status 1.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{value_parser, Arg, ArgAction, ArgMatches};
use std::ffi::OsString;

use crate::constants::{PROGRAM_NAME, VERSION};
use crate::error::PickError;

pub const USAGE: &str = "usage: xcpick [-hHv] [-p prefix]";

// Runtime options for a picking session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    // Raw bytes, written to stdout untouched
    pub prefix: OsString,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Pick(Options),
}

pub fn version_line() -> String {
    format!("{} version {}", PROGRAM_NAME, VERSION)
}

fn command() -> clap::Command {
    clap::Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
        .arg(Arg::new("help").short('h').action(ArgAction::SetTrue))
        .arg(Arg::new("version").short('v').action(ArgAction::SetTrue))
        .arg(
            Arg::new("hash")
                .short('H')
                .action(ArgAction::SetTrue)
                .overrides_with("prefix"),
        )
        .arg(
            Arg::new("prefix")
                .short('p')
                .value_name("prefix")
                .action(ArgAction::Set)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(OsString))
                .overrides_with("hash"),
        )
}

/// Parses the arguments that follow the program name.
///
/// Flags may be clustered (`-Hp rgb:`). Of `-H` and `-p`, the one given last
/// wins.
pub fn parse<I, S>(args: I) -> Result<Command, PickError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let argv = std::iter::once(OsString::from(PROGRAM_NAME)).chain(args.into_iter().map(Into::into));
    let matches = command().try_get_matches_from(argv).map_err(usage_error)?;

    Ok(from_matches(&matches))
}

fn from_matches(matches: &ArgMatches) -> Command {
    if matches.get_flag("help") {
        return Command::Help;
    }
    if matches.get_flag("version") {
        return Command::Version;
    }

    let prefix = if matches.get_flag("hash") {
        OsString::from("#")
    } else {
        matches.get_one::<OsString>("prefix").cloned().unwrap_or_default()
    };

    Command::Pick(Options { prefix })
}

fn usage_error(err: clap::Error) -> PickError {
    let offending = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.clone(),
        _ => String::new(),
    };

    match err.kind() {
        // -p is the only option that takes a value
        ErrorKind::InvalidValue | ErrorKind::WrongNumberOfValues | ErrorKind::NoEquals => {
            PickError::MissingValue("prefix")
        }
        ErrorKind::UnknownArgument if !offending.starts_with('-') => {
            PickError::UnexpectedArgument(offending)
        }
        _ if !offending.is_empty() => PickError::InvalidOption(offending),
        kind => PickError::InvalidOption(kind.to_string()),
    }
}
