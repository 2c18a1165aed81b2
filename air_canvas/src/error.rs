//! Crate error type for the fallible seams: window handling and the
//! recognition capability. Transient per-tick sensing failures never
//! surface here — the tick loop consumes them as "no hands this tick".

use std::fmt;

#[derive(Debug)]
pub enum Error {
    WindowInit(String),
    WindowUpdate(String),
    /// The recognition capability failed for a frame.
    Recognizer(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(msg) => write!(f, "window init: {}", msg),
            Error::WindowUpdate(msg) => write!(f, "window update: {}", msg),
            Error::Recognizer(msg) => write!(f, "recognizer: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
