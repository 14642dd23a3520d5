//! Error types shared by the map and vehicle codecs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading, saving or editing map and vehicle files
#[derive(Debug, Error)]
pub enum Error {
    /// Input path does not exist; no file handle was opened
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Fewer bytes remain than a record, segment or padding region requires
    #[error(
        "Truncated stream at offset {offset:#x}: needed {needed} bytes, {available} available"
    )]
    TruncatedStream {
        /// Stream offset where the read was attempted
        offset: u64,
        /// Bytes the read required
        needed: u64,
        /// Bytes left in the stream
        available: u64,
    },

    /// A positional segment tag does not match its expected ordinal
    #[error("Tag mismatch at offset {offset:#x}: expected {expected:#04x}, got {actual:#04x}")]
    TagMismatch {
        /// Tag the format requires at this point
        expected: u8,
        /// Tag byte found in the stream
        actual: u8,
        /// Stream offset of the tag byte
        offset: u64,
    },

    /// Indexed setter was given a position past the end of its list
    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current list length
        len: usize,
    },

    /// The map was built in memory, so there is no original path to save to
    #[error("Map has no original path; it was not loaded from a file")]
    NoSourcePath,

    /// List length differs from the count the header (or a fixed layout) declares
    #[error("Count mismatch in {segment}: expected {expected}, list holds {actual}")]
    CountMismatch {
        /// Segment or list name
        segment: &'static str,
        /// Count from the header or layout
        expected: u64,
        /// Actual list length
        actual: usize,
    },

    /// Opaque padding buffer differs from its declared length
    #[error("Padding length mismatch in {segment}: expected {expected} bytes, found {actual}")]
    PaddingLength {
        /// Segment name
        segment: &'static str,
        /// Declared padding length in bytes
        expected: usize,
        /// Actual buffer length in bytes
        actual: usize,
    },

    /// Sentinel-terminated list does not end on its terminal record
    #[error("Malformed sentinel list {list}: expected {expected} terminal records ending the list, found {actual}")]
    MalformedSentinelList {
        /// List name
        list: &'static str,
        /// Terminal records the protocol stops after
        expected: usize,
        /// Terminal records found (or position of the last one is wrong)
        actual: usize,
    },

    /// Rebuilt bytes differ from the parsed input
    #[error(
        "Round-trip mismatch at offset {offset:#x} (original {original_len} bytes, rebuilt {rebuilt_len} bytes)"
    )]
    RoundTripMismatch {
        /// First differing offset
        offset: u64,
        /// Length of the parsed input
        original_len: u64,
        /// Length of the rebuilt output
        rebuilt_len: u64,
    },

    /// Binary read/write error
    #[error("Binary parsing error: {0}")]
    BinRead(String),

    /// IO error during loading or saving
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for Error {
    fn from(e: binrw::Error) -> Self {
        match e {
            binrw::Error::Io(io) => Self::Io(io),
            other => Self::BinRead(other.to_string()),
        }
    }
}

impl Error {
    /// Whether the error describes the file contents rather than access to it
    ///
    /// True for layout violations found while parsing or rebuilding: a
    /// tag, count, padding or sentinel list that does not line up, or a
    /// stream that ends early.
    pub fn is_malformed_data(&self) -> bool {
        matches!(
            self,
            Self::TruncatedStream { .. }
                | Self::TagMismatch { .. }
                | Self::CountMismatch { .. }
                | Self::PaddingLength { .. }
                | Self::MalformedSentinelList { .. }
                | Self::RoundTripMismatch { .. }
                | Self::BinRead(_)
        )
    }
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;
