//! Error types for the scoreboard engine.
//!
//! Operator-level mistakes (negative scores, bad timer text, team counts out
//! of range) are not errors: those operations report whether they applied.
//! The variants below only cover resource boundaries such as decoding an
//! image, parsing a font or opening an audio device.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for scoreboard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for scoreboard operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading an asset.
    Io(io::Error),
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
    /// Surface dimension error (e.g., zero width/height).
    InvalidDimensions { width: u32, height: u32 },
    /// Image could not be opened or decoded.
    Image { path: PathBuf, message: String },
    /// Font data could not be parsed.
    Font(String),
    /// Audio device or clip failure.
    Audio(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            Self::Image { path, message } => {
                write!(f, "image {}: {message}", path.display())
            }
            Self::Font(s) => write!(f, "font error: {s}"),
            Self::Audio(s) => write!(f, "audio error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
