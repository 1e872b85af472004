//! Whole-index decoding.

use crate::header::Header;
use crate::reader::FieldReader;
use crate::track::Track;
use crate::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Options controlling which index files are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialize",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DecodeOptions {
    /// Decode indexes written before the schema version field existed
    /// (FFMS2 2.22.0.0 and earlier) instead of rejecting them.
    pub legacy: bool,
}

/// A fully decoded index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Index {
    pub header: Header,
    pub tracks: Vec<Track>,
}

impl Index {
    /// Decode an index file from the given path.
    pub fn open<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Self> {
        let file = File::open(path)?;
        Self::decode(BufReader::new(file), options)
    }

    /// Decode an index from a zlib-compressed stream.
    ///
    /// The stream is read to its end. On error nothing is returned and the
    /// decompressor is released.
    pub fn decode<R: Read>(reader: R, options: &DecodeOptions) -> Result<Self> {
        let mut reader = FieldReader::new(reader);

        let header = Header::decode(&mut reader, options)?;

        let mut tracks = Vec::with_capacity(header.tracks.min(64) as usize);
        for number in 0..header.tracks {
            tracks.push(Track::decode(&mut reader, header.schema, number)?);
        }

        for track in &mut tracks {
            track.index_visible_frames();
        }

        let trailing = reader.drain()?;
        if trailing > 0 {
            tracing::warn!(
                "Ignoring {} trailing bytes after the last track",
                trailing
            );
        }

        Ok(Self { header, tracks })
    }

    /// Get a track by position.
    pub fn track(&self, number: usize) -> Option<&Track> {
        self.tracks.get(number)
    }

    /// Total number of frames across all tracks.
    pub fn total_frames(&self) -> usize {
        self.tracks.iter().map(Track::frame_count).sum()
    }
}
