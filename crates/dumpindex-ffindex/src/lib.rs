//! dumpindex-ffindex: decoder for FFMS2 index files
//!
//! An FFMS2 index is a zlib-compressed record of every frame a decoder
//! scanned in a media file: its timestamp, byte position, and whether it is
//! a keyframe or a hidden frame. This crate decodes such a file into an
//! [`Index`] and derives the views players and encoders need from it.
//!
//! # Modules
//!
//! - `header` - Magic, producer version gate, schema version
//! - `track` - Track metadata and delta-coded frame tables
//! - `views` - Visible frames, keyframe lists and timestamps
//! - `version` - Packed library version fields
//!
//! # Example
//!
//! ```no_run
//! use dumpindex_ffindex::{DecodeOptions, Index};
//!
//! let index = Index::open("video.mkv.ffindex", &DecodeOptions::default())?;
//! for track in &index.tracks {
//!     println!("{}: {} keyframes", track.kind, track.keyframes().len());
//! }
//! # Ok::<(), dumpindex_ffindex::IndexError>(())
//! ```

pub mod error;
pub mod header;
mod index;
mod reader;
pub mod track;
pub mod version;
mod views;

pub use error::{IndexError, Result};
pub use header::{ErrorHandling, Header, Schema, INDEX_MAGIC, SUPPORTED_INDEX_VERSION};
pub use index::{DecodeOptions, Index};
pub use track::{Frame, FrameDetail, TimeBase, Track, TrackKind};
pub use version::{LibraryVersion, ProducerVersion};

use std::io::Read;

/// Decode an index with default options.
pub fn decode<R: Read>(reader: R) -> Result<Index> {
    Index::decode(reader, &DecodeOptions::default())
}

/// Decode an index with the given options.
pub fn decode_with<R: Read>(reader: R, options: &DecodeOptions) -> Result<Index> {
    Index::decode(reader, options)
}
