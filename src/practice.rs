//! Progressive stroke-by-stroke practice.
//!
//! The session is an explicit state machine owned by the caller: it holds
//! the reference glyph and the 1-indexed stroke currently being practiced,
//! and nothing else. Timing, canvas clearing and rendering belong to the
//! presentation layer; the session only decides accept-and-advance versus
//! reject-and-retry from the match score.

use crate::matcher::{accepts, stroke_match_score};
use crate::reference::{ReferenceGlyph, ReferenceStroke};
use crate::types::{Score, Stroke};

/// Outcome of submitting one drawn stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Attempt {
    /// Accepted; the session moved on to the next stroke.
    Advanced { score: Score },
    /// Accepted and it was the last stroke; the glyph is complete.
    Completed { score: Score },
    /// Rejected; the caller should clear the canvas and stay on the same
    /// stroke number.
    Rejected { score: Score },
}

impl Attempt {
    pub fn score(self) -> Score {
        match self {
            Attempt::Advanced { score }
            | Attempt::Completed { score }
            | Attempt::Rejected { score } => score,
        }
    }
}

/// One practice run through a glyph's strokes, in writing order.
#[derive(Clone, Debug)]
pub struct PracticeSession<'a> {
    glyph: &'a ReferenceGlyph,
    /// Index into the sorted stroke list; equals the stroke count once
    /// every stroke has been accepted.
    next_index: usize,
}

impl<'a> PracticeSession<'a> {
    pub fn new(glyph: &'a ReferenceGlyph) -> PracticeSession<'a> {
        PracticeSession {
            glyph,
            next_index: 0,
        }
    }

    /// The 1-indexed stroke number currently being practiced.
    pub fn stroke_number(&self) -> u32 {
        self.next_index as u32 + 1
    }

    /// The reference stroke currently being practiced, or `None` once the
    /// glyph is complete.
    pub fn current_stroke(&self) -> Option<&'a ReferenceStroke> {
        self.glyph.strokes_in_order().get(self.next_index)
    }

    pub fn is_complete(&self) -> bool {
        self.next_index >= self.glyph.strokes_in_order().len()
    }

    /// Score a drawn stroke against the current reference stroke and step
    /// the session. Returns `None` when the glyph is already complete.
    ///
    /// `capture_size` is the side length of the capture canvas, forwarded
    /// to the matcher for coordinate normalization.
    pub fn submit(&mut self, user: &Stroke, capture_size: f64) -> Option<Attempt> {
        let current = self.current_stroke()?;
        let score = stroke_match_score(user, &current.points(), capture_size);
        if !accepts(score) {
            return Some(Attempt::Rejected { score });
        }
        self.next_index += 1;
        if self.is_complete() {
            Some(Attempt::Completed { score })
        } else {
            Some(Attempt::Advanced { score })
        }
    }

    /// Back to the first stroke.
    pub fn restart(&mut self) {
        self.next_index = 0;
    }
}
