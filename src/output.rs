//! Rendering of decoded indexes for the command line.

use crate::config::OutputConfig;
use anyhow::{Context, Result};
use clap::ValueEnum;
use dumpindex_ffindex::{Index, Track};
use serde::Serialize;
use std::fmt::Write;

/// What to print for a decoded index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum View {
    /// The whole index as JSON
    #[default]
    Json,
    /// Header and per-track overview
    Summary,
    /// Visible frame numbers of keyframes
    Keyframes,
    /// Raw frame table indices of visible keyframes
    KeyframeIndices,
    /// Visible frame timestamps in time base units
    Timestamps,
    /// Visible frame timestamps as a v2 timecode file
    Timecodes,
}

/// Render an index in the requested view.
pub fn render(index: &Index, view: View, output: &OutputConfig) -> Result<String> {
    match view {
        View::Json => to_json(index, output),
        View::Summary => Ok(summary(index)),
        View::Keyframes => Ok(lines(select_track(index, output.track)?.keyframes())),
        View::KeyframeIndices => Ok(lines(
            select_track(index, output.track)?.keyframe_indices(),
        )),
        View::Timestamps => Ok(lines(select_track(index, output.track)?.timestamps())),
        View::Timecodes => Ok(timecodes(select_track(index, output.track)?)),
    }
}

/// Serialize to JSON, indented with `output.indent` spaces unless compact.
pub fn to_json<T: Serialize>(value: &T, output: &OutputConfig) -> Result<String> {
    if output.compact {
        return serde_json::to_string(value).context("Failed to serialize index");
    }

    let indent = vec![b' '; output.indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .context("Failed to serialize index")?;
    String::from_utf8(buf).context("Serialized index is not UTF-8")
}

fn select_track(index: &Index, number: usize) -> Result<&Track> {
    index.track(number).with_context(|| {
        format!(
            "Track {} out of range (index has {} tracks)",
            number,
            index.tracks.len()
        )
    })
}

fn lines<T: std::fmt::Display>(values: Vec<T>) -> String {
    let mut out = String::new();
    for v in values {
        let _ = writeln!(out, "{}", v);
    }
    out
}

fn timecodes(track: &Track) -> String {
    let mut out = String::from("# timecode format v2\n");
    for ms in track.timecodes_millis() {
        let _ = writeln!(out, "{:.2}", ms);
    }
    out
}

fn summary(index: &Index) -> String {
    let h = &index.header;
    let mut out = String::new();

    let _ = writeln!(out, "Producer: FFMS2 {}", h.version);
    match h.index_version {
        Some(v) => {
            let _ = writeln!(out, "Schema: {}", v);
        }
        None => {
            let _ = writeln!(out, "Schema: legacy");
        }
    }
    let _ = writeln!(out, "Error handling: {}", h.error_handling_mode());
    let _ = writeln!(
        out,
        "Libraries: avutil {}, avformat {}, avcodec {}, swscale {}",
        h.avutil_version, h.avformat_version, h.avcodec_version, h.swscale_version
    );
    let _ = writeln!(out, "File size: {} bytes", h.file_size);
    let _ = writeln!(out, "Digest: {}", h.digest_hex());

    let _ = writeln!(out, "\nTracks: {}", index.tracks.len());
    for (i, track) in index.tracks.iter().enumerate() {
        let _ = writeln!(
            out,
            "  [{}] {} {} frames ({} visible), {} keyframes, time base {}/{}",
            i,
            track.kind,
            track.frame_count(),
            track.visible_frame_count(),
            track.keyframes().len(),
            track.time_base.num,
            track.time_base.den
        );
    }

    out
}
