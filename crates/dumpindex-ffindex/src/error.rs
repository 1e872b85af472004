//! Error types for dumpindex-ffindex.

use std::io;
use thiserror::Error;

use crate::version::ProducerVersion;

/// Result type for index decoding operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Error type for index decoding operations.
///
/// Every variant aborts the decode; no partial index is ever returned.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The zlib layer could not parse the input.
    #[error("Corrupt index stream: {0}")]
    CorruptStream(String),

    /// Fewer bytes were available than a field required.
    #[error("Truncated index: {width}-byte field at offset {offset} runs past the end")]
    TruncatedStream { offset: u64, width: usize },

    /// The leading identifier is not the FFMS2 index magic.
    #[error("Not an FFMS2 index (magic {found:#010x})")]
    BadMagic { found: u32 },

    /// The index was written by a producer too old to carry a schema version.
    #[error("Unsupported producer version {version}: indexes older than 2.22.0.1 are not supported")]
    UnsupportedProducer { version: ProducerVersion },

    /// The schema version is present but not the one this decoder understands.
    #[error("Unsupported index schema version {found} (supported: {supported})")]
    UnsupportedSchema { found: u16, supported: u16 },

    /// The header declares zero tracks.
    #[error("Invalid track count: index declares no tracks")]
    InvalidTrackCount,

    /// A track's kind byte is neither audio nor video.
    #[error("Unknown track kind {kind} in track {track}")]
    UnknownTrackKind { track: u32, kind: u8 },

    /// I/O error outside the compressed stream (e.g. opening the file).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl IndexError {
    /// Create a corrupt stream error.
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptStream(msg.into())
    }

    /// Whether the error comes from the stream itself rather than its contents.
    pub fn is_stream_error(&self) -> bool {
        matches!(
            self,
            Self::CorruptStream(_) | Self::TruncatedStream { .. } | Self::Io(_)
        )
    }
}
