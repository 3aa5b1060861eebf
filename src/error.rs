//! Error taxonomy for the picker.
//!
//! Every variant is fatal; `main` prints it as `xcpick: <message>` and
//! exits with status 1.

use x11rb::errors::{ConnectError, ReplyError, ReplyOrIdError};

#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error("can't open display")]
    OpenDisplay(#[source] ConnectError),
    #[error("can't get default screen")]
    NoScreen,
    /// A request came back with an X11 error.
    #[error("{request} failed with error code: {code}")]
    Request { request: &'static str, code: u8 },
    #[error("can't grab pointer")]
    GrabFailed,
    /// The sampled pixel was not 32 bits wide; carries the observed depth in bits.
    #[error("invalid pixel format received, expected: 32bpp got: {0}bpp")]
    PixelFormat(usize),
    #[error("event stream ended unexpectedly")]
    EventStreamClosed,
    #[error("invalid option {0}")]
    InvalidOption(String),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error("{0} cannot be null")]
    MissingValue(&'static str),
}

impl PickError {
    /// Wraps a failed reply, keeping the X11 error code when there is one.
    pub fn from_reply(request: &'static str, err: ReplyError) -> anyhow::Error {
        match err {
            ReplyError::X11Error(e) => PickError::Request {
                request,
                code: e.error_code,
            }
            .into(),
            ReplyError::ConnectionError(e) => anyhow::Error::new(e)
                .context(format!("{request} failed: connection to the display server lost")),
        }
    }

    pub fn from_reply_or_id(request: &'static str, err: ReplyOrIdError) -> anyhow::Error {
        match err {
            ReplyOrIdError::X11Error(e) => PickError::Request {
                request,
                code: e.error_code,
            }
            .into(),
            other => anyhow::Error::new(other).context(format!("{request} failed")),
        }
    }
}
