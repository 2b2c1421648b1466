use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Bit length {0} is not a multiple of 8")]
    MisalignedLength(usize),

    #[error("Decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("Invalid binary digit {found:?} at position {index}")]
    InvalidDigit { index: usize, found: char },

    #[error("Invalid basis symbol {found:?} at position {index}")]
    InvalidBasisSymbol { index: usize, found: char },
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Cannot append to trace log {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Message corpus {} is unavailable: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Message corpus {} contains no messages", .0.display())]
    Empty(PathBuf),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Cannot read trace log {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed value {value:?} on line {line}")]
    MalformedValue { line: usize, value: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot install log subscriber: {0}")]
    Logging(String),
}
