#![forbid(unsafe_code)]

//! kilo: a small screen-oriented terminal text editor.
//!
//! One logical loop: read exactly one key, apply it to the editor state,
//! recompute the viewport, compose one frame, flush it as a single write,
//! block again. The editor state is exclusively owned by that loop.

use std::fmt;
use std::io;

pub mod cli;
pub mod editor;

/// Top-level error type for the editor binary.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations or file loading.
    Io(io::Error),
    /// Terminal error with message.
    Terminal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Terminal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for the editor.
pub type Result<T> = std::result::Result<T, Error>;
