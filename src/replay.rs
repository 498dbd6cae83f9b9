//! Stroke replay stepping.
//!
//! Replays a glyph's strokes in writing order, each over its authored
//! duration. Time is owned by the rendering collaborator: it calls
//! [`ReplayTimeline::frame_at`] with elapsed milliseconds and gets back
//! which points of which strokes are visible. There is no internal clock
//! and no mutable replay state, so a frame can be recomputed for any
//! instant (seek, replay, pause) for free.

use glam::DVec2;

use crate::reference::{ReferenceGlyph, ReferenceStroke};

/// Visible portion of one stroke at some instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeProgress<'a> {
    pub stroke: &'a ReferenceStroke,
    /// How many leading points of `stroke.path` to draw.
    pub visible_points: usize,
}

/// Draw state for one replay instant.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayFrame<'a> {
    /// Per-stroke visible point counts, in writing order.
    pub strokes: Vec<StrokeProgress<'a>>,
    /// Index of the stroke currently being revealed; equals the stroke
    /// count once the replay has finished.
    pub current_stroke: usize,
    pub done: bool,
}

/// Precomputed per-stroke start times for a glyph replay.
#[derive(Clone, Debug)]
pub struct ReplayTimeline<'a> {
    strokes: &'a [ReferenceStroke],
    /// Start time of each stroke, in ms from replay start.
    starts: Vec<f64>,
    total_ms: f64,
}

impl<'a> ReplayTimeline<'a> {
    pub fn new(glyph: &'a ReferenceGlyph) -> ReplayTimeline<'a> {
        let strokes = glyph.strokes_in_order();
        let mut starts = Vec::with_capacity(strokes.len());
        let mut t = 0.0;
        for stroke in strokes {
            starts.push(t);
            // A non-positive duration plays back instantly
            t += stroke.duration_ms.max(0.0);
        }
        ReplayTimeline {
            strokes,
            starts,
            total_ms: t,
        }
    }

    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// The draw state at `elapsed_ms` after replay start.
    pub fn frame_at(&self, elapsed_ms: f64) -> ReplayFrame<'a> {
        let mut frames = Vec::with_capacity(self.strokes.len());
        let mut current = self.strokes.len();

        for (i, stroke) in self.strokes.iter().enumerate() {
            let start = self.starts[i];
            let duration = stroke.duration_ms.max(0.0);
            let visible_points = if elapsed_ms >= start + duration {
                stroke.path.len()
            } else if elapsed_ms >= start && duration > 0.0 {
                if current == self.strokes.len() {
                    current = i;
                }
                let progress = (elapsed_ms - start) / duration;
                ((progress * stroke.path.len() as f64).ceil() as usize).min(stroke.path.len())
            } else {
                if current == self.strokes.len() && elapsed_ms < start {
                    current = i;
                }
                0
            };
            frames.push(StrokeProgress {
                stroke,
                visible_points,
            });
        }

        let done = elapsed_ms >= self.total_ms;
        ReplayFrame {
            strokes: frames,
            current_stroke: if done { self.strokes.len() } else { current },
            done,
        }
    }
}

/// Uniform fit of the glyph canvas into a square display: returns
/// `(scale, offset)` such that `display = offset + canvas_point * scale`.
pub fn display_transform(canvas_width: f64, canvas_height: f64, display_size: f64) -> (f64, DVec2) {
    let scale = (display_size / canvas_width).min(display_size / canvas_height);
    let offset = DVec2::new(
        (display_size - canvas_width * scale) / 2.0,
        (display_size - canvas_height * scale) / 2.0,
    );
    (scale, offset)
}
