use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// I/O errors that can occur when reading from a byte source
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource exists but cannot be opened
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Any other failure while opening, seeking or reading
    #[error("Read failed for {identifier}: {message}")]
    Read { identifier: String, message: String },
}

impl IoError {
    /// Classify a `std::io::Error` raised while accessing `identifier`.
    pub fn from_std(identifier: &str, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => IoError::NotFound(identifier.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                IoError::PermissionDenied(identifier.to_string())
            }
            _ => IoError::Read {
                identifier: identifier.to_string(),
                message: err.to_string(),
            },
        }
    }
}

/// Errors that can occur when parsing TIFF files
#[derive(Debug, Clone, Error)]
pub enum TiffError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Invalid TIFF magic bytes (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42, got {0}")]
    InvalidVersion(u16),

    /// Fewer bytes were available than the structure being read requires
    #[error("Truncated input: need {required} bytes, got {actual}")]
    Truncated { required: u64, actual: u64 },

    /// Required tag is missing from IFD
    #[error("Missing required tag: {0}")]
    MissingTag(&'static str),

    /// Rational value with a zero denominator
    #[error("Malformed rational for {tag}: {numerator}/0")]
    MalformedRational { tag: &'static str, numerator: u32 },
}

impl TiffError {
    /// Coarse classification used by callers that report per-file failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TiffError::Io(_) => ErrorKind::IoFailure,
            TiffError::InvalidMagic(_) | TiffError::InvalidVersion(_) => ErrorKind::InvalidFormat,
            TiffError::Truncated { .. } => ErrorKind::TruncatedInput,
            TiffError::MissingTag(_) => ErrorKind::MissingTag,
            TiffError::MalformedRational { .. } => ErrorKind::MalformedRational,
        }
    }
}

/// Failure categories for a single metadata extraction.
///
/// None of these are retried: each one is deterministic for a given file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Byte-order marker or magic number is wrong
    InvalidFormat,
    /// A stage needed more bytes than the file provided
    TruncatedInput,
    /// One of the four required tags is absent
    MissingTag,
    /// A resolution tag has a zero denominator
    MalformedRational,
    /// The byte source itself failed
    IoFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::TruncatedInput => "truncated_input",
            ErrorKind::MissingTag => "missing_tag",
            ErrorKind::MalformedRational => "malformed_rational",
            ErrorKind::IoFailure => "io_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline stage at which an extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Opening the byte source
    Open,
    /// Reading and validating the 8-byte header
    Header,
    /// Reading the IFD entry count
    EntryCount,
    /// Reading and parsing the IFD entries
    Directory,
    /// Resolving ImageWidth / ImageLength
    Dimensions,
    /// Resolving XResolution / YResolution
    Resolution,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Open => "open",
            Stage::Header => "header",
            Stage::EntryCount => "entry count",
            Stage::Directory => "directory",
            Stage::Dimensions => "dimensions",
            Stage::Resolution => "resolution",
        };
        f.write_str(name)
    }
}

/// A failed metadata extraction for one file.
#[derive(Debug, Clone, Error)]
#[error("{identifier}: {stage} stage failed: {source}")]
pub struct MetadataError {
    /// Identifier of the byte source (usually the file path)
    pub identifier: String,

    /// Stage that failed
    pub stage: Stage,

    /// Underlying cause
    #[source]
    pub source: TiffError,
}

impl MetadataError {
    pub fn new(identifier: impl Into<String>, stage: Stage, source: TiffError) -> Self {
        Self {
            identifier: identifier.into(),
            stage,
            source,
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Errors raised while discovering TIFF files under a root directory
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root path does not exist
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),

    /// Root path exists but is not a directory
    #[error("Root is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory walk failed at the root itself
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
