//! Library version fields.
//!
//! Indexes record the FFMS2 release that wrote them and the FFmpeg library
//! versions it was linked against. The FFmpeg versions are stored packed as
//! `major << 16 | minor << 8 | micro` in a little-endian `u32`.

use std::fmt;

/// A packed FFmpeg library version (avutil, avformat, avcodec, swscale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct LibraryVersion {
    pub major: u8,
    pub minor: u8,
    pub micro: u8,
}

impl LibraryVersion {
    /// Unpack a version from its 32-bit on-disk form. The top byte is unused.
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            major: ((packed & 0x00FF_0000) >> 16) as u8,
            minor: ((packed & 0x0000_FF00) >> 8) as u8,
            micro: (packed & 0x0000_00FF) as u8,
        }
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

/// Version of the FFMS2 release that produced the index.
///
/// Stored on disk as four single bytes in the order bump, micro, minor, major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ProducerVersion {
    pub major: u8,
    pub minor: u8,
    pub micro: u8,
    pub bump: u8,
}

impl ProducerVersion {
    /// Whether this producer predates the explicit index schema field.
    ///
    /// Component-wise, not a lexicographic comparison.
    pub const fn predates_schema_field(&self) -> bool {
        self.major <= 2 && self.minor <= 22 && self.micro == 0 && self.bump < 1
    }
}

impl fmt::Display for ProducerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.micro, self.bump
        )
    }
}
