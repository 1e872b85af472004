//! Visible frame index and derived seeking views.
//!
//! Some codecs emit frames that are decoded but never displayed. Display
//! oriented consumers (frame numbers, timestamps, keyframe distances) work on
//! the visible subset, while seeking into the source file needs raw indices.

use crate::track::{Frame, Track};

impl Track {
    /// Build the visible frame list. Called once per track after decoding.
    pub(crate) fn index_visible_frames(&mut self) {
        self.visible = self
            .frames
            .iter()
            .enumerate()
            .filter(|(_, frame)| !frame.hidden)
            .map(|(i, _)| i)
            .collect();
    }

    /// Raw indices of the non-hidden frames, in decode order.
    pub fn visible_frames(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_frame_count(&self) -> usize {
        self.visible.len()
    }

    /// The frame at the given visible frame number.
    pub fn visible_frame(&self, rank: usize) -> Option<&Frame> {
        self.visible.get(rank).and_then(|&i| self.frames.get(i))
    }

    /// Visible frames paired with their raw indices, in decode order.
    fn visible_iter(&self) -> impl Iterator<Item = (usize, &Frame)> + '_ {
        self.visible
            .iter()
            .filter_map(move |&i| self.frames.get(i).map(|frame| (i, frame)))
    }

    /// Visible frame numbers of the keyframes.
    ///
    /// These differ from positions in [`Track::frames`] when the track has
    /// hidden frames; they are what frame-accurate seeking and keyframe
    /// distance measurements want.
    pub fn keyframes(&self) -> Vec<usize> {
        self.visible_iter()
            .enumerate()
            .filter(|(_, (_, frame))| frame.key_frame)
            .map(|(rank, _)| rank)
            .collect()
    }

    /// Indices into [`Track::frames`] of the visible keyframes.
    pub fn keyframe_indices(&self) -> Vec<usize> {
        self.visible_iter()
            .filter(|(_, frame)| frame.key_frame)
            .map(|(i, _)| i)
            .collect()
    }

    /// Timestamps of the visible frames, in time base units.
    pub fn timestamps(&self) -> Vec<i64> {
        self.visible_iter().map(|(_, frame)| frame.pts).collect()
    }

    /// Timestamps of the visible frames in milliseconds.
    pub fn timecodes_millis(&self) -> Vec<f64> {
        self.visible_iter()
            .map(|(_, frame)| self.time_base.pts_to_millis(frame.pts))
            .collect()
    }
}
