//! Index header decoding.
//!
//! The header is fully read and validated before any track data is touched.
//! Its producer version decides which [`Schema`] the rest of the file uses.

use crate::reader::FieldReader;
use crate::version::{LibraryVersion, ProducerVersion};
use crate::{DecodeOptions, IndexError, Result};
use std::fmt;
use std::io::Read;

/// Leading identifier of every FFMS2 index.
pub const INDEX_MAGIC: u32 = 0x5392_0873;

/// The one index schema version this decoder understands.
pub const SUPPORTED_INDEX_VERSION: u16 = 5;

/// Size of the source file digest stored in the header.
pub const DIGEST_LEN: usize = 20;

/// Binary layout of the header tail, track records and frame records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Schema {
    /// Written by producers up to 2.22.0.0, before the schema field existed.
    Legacy,
    /// Schema version [`SUPPORTED_INDEX_VERSION`].
    Current,
}

/// How the producer was told to react to decoding errors while indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorHandling {
    Abort,
    ClearTrack,
    StopTrack,
    Ignore,
    Unknown(u32),
}

impl ErrorHandling {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Abort,
            1 => Self::ClearTrack,
            2 => Self::StopTrack,
            3 => Self::Ignore,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ErrorHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => f.write_str("abort"),
            Self::ClearTrack => f.write_str("clear-track"),
            Self::StopTrack => f.write_str("stop-track"),
            Self::Ignore => f.write_str("ignore"),
            Self::Unknown(raw) => write!(f, "unknown ({raw})"),
        }
    }
}

/// Decoded index header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Header {
    /// Magic identifier, always [`INDEX_MAGIC`] once decoded.
    pub id: u32,
    /// FFMS2 release that wrote the index.
    pub version: ProducerVersion,
    /// Layout the index was decoded with.
    pub schema: Schema,
    /// Schema version field; absent in legacy indexes.
    pub index_version: Option<u16>,
    /// Number of tracks that follow the header.
    pub tracks: u32,
    /// Decoder selection field; only present in legacy indexes.
    #[cfg_attr(feature = "serialize", serde(skip_serializing_if = "Option::is_none"))]
    pub decoder: Option<u32>,
    /// Raw error handling mode, see [`Header::error_handling_mode`].
    pub error_handling: u32,
    pub avutil_version: LibraryVersion,
    pub avformat_version: LibraryVersion,
    pub avcodec_version: LibraryVersion,
    pub swscale_version: LibraryVersion,
    /// Size in bytes of the indexed media file.
    pub file_size: i64,
    /// Digest of the indexed media file.
    pub digest: [u8; DIGEST_LEN],
}

impl Header {
    /// Decode and validate a header.
    pub(crate) fn decode<R: Read>(
        reader: &mut FieldReader<R>,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let id = reader.read_u32()?;
        if id != INDEX_MAGIC {
            return Err(IndexError::BadMagic { found: id });
        }

        let bump = reader.read_u8()?;
        let micro = reader.read_u8()?;
        let minor = reader.read_u8()?;
        let major = reader.read_u8()?;
        let version = ProducerVersion {
            major,
            minor,
            micro,
            bump,
        };

        let (schema, index_version) = if version.predates_schema_field() {
            if !options.legacy || version.major != 2 {
                return Err(IndexError::UnsupportedProducer { version });
            }
            (Schema::Legacy, None)
        } else {
            let found = reader.read_u16()?;
            if found != SUPPORTED_INDEX_VERSION {
                return Err(IndexError::UnsupportedSchema {
                    found,
                    supported: SUPPORTED_INDEX_VERSION,
                });
            }
            (Schema::Current, Some(found))
        };

        let tracks = reader.read_u32()?;
        if tracks == 0 {
            return Err(IndexError::InvalidTrackCount);
        }

        let decoder = match schema {
            Schema::Legacy => Some(reader.read_u32()?),
            Schema::Current => None,
        };

        let error_handling = reader.read_u32()?;
        let avutil_version = LibraryVersion::from_packed(reader.read_u32()?);
        let avformat_version = LibraryVersion::from_packed(reader.read_u32()?);
        let avcodec_version = LibraryVersion::from_packed(reader.read_u32()?);
        let swscale_version = LibraryVersion::from_packed(reader.read_u32()?);
        let file_size = reader.read_i64()?;
        let digest = reader.read_array::<DIGEST_LEN>()?;

        tracing::debug!(
            "Index header: producer {}, schema {:?}, {} tracks, file size {}",
            version,
            schema,
            tracks,
            file_size
        );

        Ok(Self {
            id,
            version,
            schema,
            index_version,
            tracks,
            decoder,
            error_handling,
            avutil_version,
            avformat_version,
            avcodec_version,
            swscale_version,
            file_size,
            digest,
        })
    }

    /// Interpret the raw error handling field.
    pub fn error_handling_mode(&self) -> ErrorHandling {
        ErrorHandling::from_raw(self.error_handling)
    }

    /// Digest as a lowercase hex string.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}
