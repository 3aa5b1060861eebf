use anyhow::Result;
use std::ffi::OsStr;
use std::io::{self, IsTerminal, Write};
use std::os::unix::ffi::OsStrExt;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod backend;
mod cli;
mod constants;
mod error;
#[cfg(test)]
mod mock;
mod picker;
mod sampler;
mod session;
mod types;
mod window;

use backend::X11Backend;
use cli::{Command, Options};
use constants::PROGRAM_NAME;
use picker::Picker;
use session::Session;
use types::{Color, Outcome};

const EXIT_FAILURE: u8 = 1;
const EXIT_CANCELLED: u8 = 2;

// What the process writes and the status it exits with
#[derive(Debug, PartialEq, Eq)]
struct Report {
    code: u8,
    stdout: Vec<u8>,
    stderr: Option<String>,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout is reserved for the picked color.
    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let newline = io::stdout().is_terminal();

    let report = match cli::parse(std::env::args_os().skip(1)) {
        Ok(Command::Help) => Report::line(cli::USAGE),
        Ok(Command::Version) => Report::line(&cli::version_line()),
        Ok(Command::Pick(options)) => report(run(), &options, newline),
        Err(e) => report(Err(e.into()), &Options::default(), newline),
    };

    emit(report)
}

// The session is torn down on every path out of the picker, errors included
fn run() -> Result<Outcome> {
    let mut session = Session::open()?;
    let result = pick(&mut session);
    session.close();
    result
}

fn pick(session: &mut Session) -> Result<Outcome> {
    let mut backend = X11Backend::new(session);
    let picker = Picker::start(&mut backend)?;
    picker.run(&mut backend)
}

/// Maps the end of a session to its output and exit status: 0 with the color
/// on confirmation, 2 with nothing on cancel, 1 with a message on any error.
fn report(result: Result<Outcome>, options: &Options, newline: bool) -> Report {
    match result {
        Ok(Outcome::Confirmed(color)) => Report {
            code: 0,
            stdout: render_color(&options.prefix, color, newline),
            stderr: None,
        },
        Ok(Outcome::Cancelled) => Report {
            code: EXIT_CANCELLED,
            stdout: Vec::new(),
            stderr: None,
        },
        Err(e) => Report::failure(&e),
    }
}

impl Report {
    fn line(text: &str) -> Self {
        Self {
            code: 0,
            stdout: format!("{}\n", text).into_bytes(),
            stderr: None,
        }
    }

    fn failure(err: &anyhow::Error) -> Self {
        debug!("{:?}", err);
        Self {
            code: EXIT_FAILURE,
            stdout: Vec::new(),
            stderr: Some(format!("{}: {}", PROGRAM_NAME, err)),
        }
    }
}

fn emit(report: Report) -> ExitCode {
    if let Some(message) = &report.stderr {
        eprintln!("{}", message);
    }

    if let Err(e) = write_stdout(&report.stdout) {
        eprintln!("{}: {}", PROGRAM_NAME, e);
        return ExitCode::from(EXIT_FAILURE);
    }

    ExitCode::from(report.code)
}

fn write_stdout(bytes: &[u8]) -> io::Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()
}

// A trailing newline only for terminals, so pipes get the bare value.
// The prefix is written byte for byte.
fn render_color(prefix: &OsStr, color: Color, newline: bool) -> Vec<u8> {
    let mut out = prefix.as_bytes().to_vec();
    out.extend_from_slice(color.to_string().as_bytes());
    if newline {
        out.push(b'\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PickError;

    fn options_for(args: &[&str]) -> Options {
        match cli::parse(args.iter().copied()).unwrap() {
            Command::Pick(options) => options,
            other => panic!("expected a pick command, got {:?}", other),
        }
    }

    fn confirmed(rgb: u32) -> Result<Outcome> {
        Ok(Outcome::Confirmed(Color::new(rgb)))
    }

    #[test]
    fn test_output_without_prefix_is_bare_hex() {
        let report = report(confirmed(0x00ff00), &options_for(&[]), false);
        assert_eq!(report.stdout, b"00ff00");
    }

    #[test]
    fn test_output_with_hash_flag() {
        let report = report(confirmed(0x1a2b3c), &options_for(&["-H"]), false);
        assert_eq!(report.stdout, b"#1a2b3c");
    }

    #[test]
    fn test_output_with_custom_prefix() {
        let report = report(confirmed(0xABCDEF), &options_for(&["-p", "rgb:"]), false);
        assert_eq!(report.stdout, b"rgb:abcdef");
    }

    #[test]
    fn test_output_keeps_non_utf8_prefix() {
        let prefix = OsStr::from_bytes(b"\xfe");
        assert_eq!(render_color(prefix, Color::new(0x010203), false), b"\xfe010203");
    }

    #[test]
    fn test_newline_only_for_terminals() {
        let options = Options::default();
        assert_eq!(report(confirmed(0x00ff00), &options, true).stdout, b"00ff00\n");
        assert_eq!(report(confirmed(0x00ff00), &options, false).stdout, b"00ff00");
    }

    #[test]
    fn test_confirmation_exits_zero() {
        // Act
        let report = report(confirmed(0x00ff00), &Options::default(), false);

        // Assert
        assert_eq!(report.code, 0);
        assert_eq!(report.stderr, None);
    }

    #[test]
    fn test_cancel_exits_two_without_output() {
        // Act
        let report = report(Ok(Outcome::Cancelled), &options_for(&["-H"]), true);

        // Assert
        assert_eq!(report.code, 2);
        assert!(report.stdout.is_empty());
        assert_eq!(report.stderr, None);
    }

    #[test]
    fn test_missing_prefix_exits_one_with_message() {
        // Arrange
        let err = cli::parse(["-p"]).unwrap_err();

        // Act
        let report = report(Err(err.into()), &Options::default(), false);

        // Assert
        assert_eq!(report.code, 1);
        assert!(report.stdout.is_empty());
        assert_eq!(report.stderr.as_deref(), Some("xcpick: prefix cannot be null"));
    }

    #[test]
    fn test_protocol_error_exits_one_with_code() {
        let err = PickError::Request { request: "get_image", code: 8 };

        let report = report(Err(err.into()), &Options::default(), false);

        assert_eq!(report.code, 1);
        assert_eq!(
            report.stderr.as_deref(),
            Some("xcpick: get_image failed with error code: 8")
        );
    }

    #[test]
    fn test_help_and_version_exit_zero() {
        assert_eq!(Report::line(cli::USAGE).code, 0);
        assert_eq!(Report::line(cli::USAGE).stdout, b"usage: xcpick [-hHv] [-p prefix]\n");
    }
}
