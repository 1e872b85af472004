//! Track and frame table decoding.
//!
//! Frame records are delta coded: PTS, original PTS, file position, original
//! position and sample count are stored as the difference from the previous
//! frame of the same track. A [`FrameDecoder`] carries the running sums for
//! one track and is dropped when the track is done.

use crate::header::Schema;
use crate::reader::FieldReader;
use crate::{IndexError, Result};
use std::fmt;
use std::io::Read;

/// Kind of media a track carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Video,
    Audio,
    /// A kind byte this decoder does not know. Never produced by a
    /// successful decode, but kept so the value can still be displayed.
    Unknown(u8),
}

impl TrackKind {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Video,
            1 => Self::Audio,
            other => Self::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serialize")]
impl serde::Serialize for TrackKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Rational time base of a track.
///
/// FFMS2 scales time bases so that `pts * num / den` is in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct TimeBase {
    pub num: i64,
    pub den: i64,
}

impl TimeBase {
    /// Convert a timestamp to milliseconds. Returns 0.0 for a zero denominator.
    pub fn pts_to_millis(&self, pts: i64) -> f64 {
        if self.den == 0 {
            0.0
        } else {
            pts as f64 * self.num as f64 / self.den as f64
        }
    }
}

/// Kind-specific part of a frame record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize), serde(untagged))]
pub enum FrameDetail {
    Video {
        /// Position of the packet in demuxer order.
        original_pos: u64,
        repeat_pict: i32,
    },
    Audio {
        /// First sample of this block within the track.
        sample_start: i64,
        sample_count: u32,
    },
}

/// One frame (video) or sample block (audio) of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Frame {
    pub pts: i64,
    /// Timestamp before any reordering. Zero in legacy indexes.
    pub original_pts: i64,
    /// Byte offset of the packet in the source media file.
    pub file_pos: i64,
    pub key_frame: bool,
    /// Decoded but never displayed (e.g. VP8/VP9 alt-ref frames).
    pub hidden: bool,
    #[cfg_attr(feature = "serialize", serde(flatten))]
    pub detail: FrameDetail,
}

impl Frame {
    pub fn original_pos(&self) -> Option<u64> {
        match self.detail {
            FrameDetail::Video { original_pos, .. } => Some(original_pos),
            FrameDetail::Audio { .. } => None,
        }
    }

    pub fn repeat_pict(&self) -> Option<i32> {
        match self.detail {
            FrameDetail::Video { repeat_pict, .. } => Some(repeat_pict),
            FrameDetail::Audio { .. } => None,
        }
    }

    pub fn sample_start(&self) -> Option<i64> {
        match self.detail {
            FrameDetail::Audio { sample_start, .. } => Some(sample_start),
            FrameDetail::Video { .. } => None,
        }
    }

    pub fn sample_count(&self) -> Option<u32> {
        match self.detail {
            FrameDetail::Audio { sample_count, .. } => Some(sample_count),
            FrameDetail::Video { .. } => None,
        }
    }
}

/// A decoded track: timing metadata plus its frame table in decode order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Track {
    pub kind: TrackKind,
    pub time_base: TimeBase,
    /// Duration of the final frame; absent in legacy indexes.
    #[cfg_attr(feature = "serialize", serde(skip_serializing_if = "Option::is_none"))]
    pub last_duration: Option<i64>,
    pub max_b_frames: i32,
    pub use_dts: bool,
    pub has_ts: bool,
    pub(crate) frames: Vec<Frame>,
    /// Indices into `frames` of the non-hidden frames, in order.
    #[cfg_attr(feature = "serialize", serde(skip))]
    pub(crate) visible: Vec<usize>,
}

impl Track {
    /// Decode one track record and its frame table.
    ///
    /// The visible frame list is left empty; it is filled by the index once
    /// every track has been decoded.
    pub(crate) fn decode<R: Read>(
        reader: &mut FieldReader<R>,
        schema: Schema,
        number: u32,
    ) -> Result<Self> {
        let kind_byte = reader.read_u8()?;
        let kind = TrackKind::from_byte(kind_byte);
        let num = reader.read_i64()?;
        let den = reader.read_i64()?;
        let last_duration = match schema {
            Schema::Current => Some(reader.read_i64()?),
            Schema::Legacy => None,
        };
        let max_b_frames = reader.read_i32()?;
        let use_dts = reader.read_bool()?;
        let has_ts = reader.read_bool()?;
        let frame_count = reader.read_u64()?;

        let layout = FrameLayout::select(schema, kind).ok_or(IndexError::UnknownTrackKind {
            track: number,
            kind: kind_byte,
        })?;

        tracing::debug!(
            "Track {}: {} with {} frames, time base {}/{}",
            number,
            kind,
            frame_count,
            num,
            den
        );

        // The count comes from the file, so cap the up-front allocation.
        let mut frames = Vec::with_capacity(frame_count.min(1 << 16) as usize);
        let mut decoder = FrameDecoder::new(layout);
        for _ in 0..frame_count {
            frames.push(decoder.next_frame(reader)?);
        }

        tracing::trace!(
            "Track {} frame table ends at decompressed offset {}",
            number,
            reader.offset()
        );

        Ok(Self {
            kind,
            time_base: TimeBase { num, den },
            last_duration,
            max_b_frames,
            use_dts,
            has_ts,
            frames,
            visible: Vec::new(),
        })
    }

    /// The frame table in decode order, hidden frames included.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Total number of frames, hidden ones included.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Field order of a frame record, fixed per track from schema and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameLayout {
    CurrentVideo,
    CurrentAudio,
    LegacyVideo,
    LegacyAudio,
}

impl FrameLayout {
    fn select(schema: Schema, kind: TrackKind) -> Option<Self> {
        match (schema, kind) {
            (Schema::Current, TrackKind::Video) => Some(Self::CurrentVideo),
            (Schema::Current, TrackKind::Audio) => Some(Self::CurrentAudio),
            (Schema::Legacy, TrackKind::Video) => Some(Self::LegacyVideo),
            (Schema::Legacy, TrackKind::Audio) => Some(Self::LegacyAudio),
            (_, TrackKind::Unknown(_)) => None,
        }
    }
}

/// Running sums for the delta-coded fields of one track.
#[derive(Debug, Default)]
struct Accumulators {
    pts: i64,
    original_pts: i64,
    file_pos: i64,
    original_pos: u64,
    sample_start: i64,
    sample_count: u32,
}

/// Per-track frame record decoder.
struct FrameDecoder {
    layout: FrameLayout,
    acc: Accumulators,
}

impl FrameDecoder {
    fn new(layout: FrameLayout) -> Self {
        Self {
            layout,
            acc: Accumulators::default(),
        }
    }

    fn next_frame<R: Read>(&mut self, reader: &mut FieldReader<R>) -> Result<Frame> {
        match self.layout {
            FrameLayout::CurrentVideo | FrameLayout::CurrentAudio => self.next_current(reader),
            FrameLayout::LegacyVideo | FrameLayout::LegacyAudio => self.next_legacy(reader),
        }
    }

    fn next_current<R: Read>(&mut self, reader: &mut FieldReader<R>) -> Result<Frame> {
        let acc = &mut self.acc;

        acc.pts = acc.pts.wrapping_add(reader.read_i64()?);
        acc.original_pts = acc.original_pts.wrapping_add(reader.read_i64()?);
        let key_frame = reader.read_bool()?;
        acc.file_pos = acc.file_pos.wrapping_add(reader.read_i64()?);
        let hidden = reader.read_bool()?;

        let detail = if self.layout == FrameLayout::CurrentVideo {
            // Original positions are written as `pos - prev - 1`.
            acc.original_pos = acc
                .original_pos
                .wrapping_add(reader.read_u64()?)
                .wrapping_add(1);
            FrameDetail::Video {
                original_pos: acc.original_pos,
                repeat_pict: reader.read_i32()?,
            }
        } else {
            // Sample blocks are contiguous; only the count is stored.
            acc.sample_start = acc.sample_start.wrapping_add(i64::from(acc.sample_count));
            let sample_start = acc.sample_start;
            acc.sample_count = acc.sample_count.wrapping_add(reader.read_u32()?);
            FrameDetail::Audio {
                sample_start,
                sample_count: acc.sample_count,
            }
        };

        Ok(Frame {
            pts: acc.pts,
            original_pts: acc.original_pts,
            file_pos: acc.file_pos,
            key_frame,
            hidden,
            detail,
        })
    }

    fn next_legacy<R: Read>(&mut self, reader: &mut FieldReader<R>) -> Result<Frame> {
        let acc = &mut self.acc;

        acc.pts = acc.pts.wrapping_add(reader.read_i64()?);
        let key_frame = reader.read_bool()?;
        acc.file_pos = acc.file_pos.wrapping_add(reader.read_i64()?);

        let (detail, hidden) = if self.layout == FrameLayout::LegacyVideo {
            acc.original_pos = acc
                .original_pos
                .wrapping_add(reader.read_u64()?)
                .wrapping_add(1);
            let repeat_pict = reader.read_i32()?;
            let hidden = reader.read_bool()?;
            (
                FrameDetail::Video {
                    original_pos: acc.original_pos,
                    repeat_pict,
                },
                hidden,
            )
        } else {
            acc.sample_start = acc.sample_start.wrapping_add(reader.read_i64()?);
            acc.sample_count = acc.sample_count.wrapping_add(reader.read_u32()?);
            (
                FrameDetail::Audio {
                    sample_start: acc.sample_start,
                    sample_count: acc.sample_count,
                },
                false,
            )
        };

        Ok(Frame {
            pts: acc.pts,
            original_pts: 0,
            file_pos: acc.file_pos,
            key_frame,
            hidden,
            detail,
        })
    }
}
