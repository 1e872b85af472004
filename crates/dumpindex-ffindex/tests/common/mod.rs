//! Test-only writer for schema 5 index files.

#![allow(dead_code)]

use dumpindex_ffindex::INDEX_MAGIC;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::PathBuf;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// A frame as the test wants it decoded (absolute values).
#[derive(Debug, Clone, Copy)]
pub struct TestFrame {
    pub pts: i64,
    pub key_frame: bool,
    pub hidden: bool,
    pub file_pos: i64,
    /// Video: original position. Audio: sample count.
    pub extra: u64,
}

impl TestFrame {
    pub fn video(pts: i64, key_frame: bool, hidden: bool) -> Self {
        Self {
            pts,
            key_frame,
            hidden,
            file_pos: 4096 + pts * 1000,
            extra: pts as u64,
        }
    }

    pub fn audio(pts: i64, sample_count: u32) -> Self {
        Self {
            pts,
            key_frame: true,
            hidden: false,
            file_pos: 512 + pts * 10,
            extra: u64::from(sample_count),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn with_key_frame(mut self, key_frame: bool) -> Self {
        self.key_frame = key_frame;
        self
    }
}

pub struct TestTrack {
    pub kind: u8,
    pub frames: Vec<TestFrame>,
}

/// Builds raw (uncompressed) index bytes, delta-coding frames the way the
/// producer does.
pub struct IndexBuilder {
    pub producer: [u8; 4],
    pub schema: u16,
    pub declared_tracks: Option<u32>,
    pub tracks: Vec<TestTrack>,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self {
            producer: [2, 30, 0, 0],
            schema: 5,
            declared_tracks: None,
            tracks: Vec::new(),
        }
    }
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(mut self, kind: u8, frames: Vec<TestFrame>) -> Self {
        self.tracks.push(TestTrack { kind, frames });
        self
    }

    pub fn raw(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&INDEX_MAGIC.to_le_bytes());
        let [major, minor, micro, bump] = self.producer;
        out.extend_from_slice(&[bump, micro, minor, major]);
        out.extend_from_slice(&self.schema.to_le_bytes());
        let declared = self.declared_tracks.unwrap_or(self.tracks.len() as u32);
        out.extend_from_slice(&declared.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        for packed in [0x0038_0564u32, 0x003A_0364, 0x003A_0667, 0x0005_0065] {
            out.extend_from_slice(&packed.to_le_bytes());
        }
        out.extend_from_slice(&1_234_567i64.to_le_bytes());
        out.extend_from_slice(&[0x5a; 20]);

        for track in &self.tracks {
            out.push(track.kind);
            out.extend_from_slice(&1000i64.to_le_bytes());
            out.extend_from_slice(&25i64.to_le_bytes());
            out.extend_from_slice(&1i64.to_le_bytes());
            out.extend_from_slice(&0i32.to_le_bytes());
            out.push(0);
            out.push(1);
            out.extend_from_slice(&(track.frames.len() as u64).to_le_bytes());

            let (mut pts, mut pos, mut extra) = (0i64, 0i64, 0u64);
            let mut orig = 0u64;
            for f in &track.frames {
                out.extend_from_slice(&(f.pts - pts).to_le_bytes());
                out.extend_from_slice(&(f.pts - pts).to_le_bytes());
                out.push(f.key_frame as u8);
                out.extend_from_slice(&(f.file_pos - pos).to_le_bytes());
                out.push(f.hidden as u8);
                if track.kind == 1 {
                    let delta = (f.extra as u32).wrapping_sub(extra as u32);
                    out.extend_from_slice(&delta.to_le_bytes());
                } else {
                    let delta = f.extra.wrapping_sub(orig).wrapping_sub(1);
                    out.extend_from_slice(&delta.to_le_bytes());
                    out.extend_from_slice(&0i32.to_le_bytes());
                    orig = f.extra;
                }
                pts = f.pts;
                pos = f.file_pos;
                extra = f.extra;
            }
        }
        out
    }

    pub fn build(&self) -> Vec<u8> {
        compress(&self.raw())
    }
}

pub fn compress(raw: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(raw).unwrap();
    enc.finish().unwrap()
}
