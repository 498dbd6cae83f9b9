//! Core value types: match scores and captured strokes.
//!
//! Design goals:
//! - No raw percentages in domain logic: scores travel as [`Score`]
//! - Coordinate spaces (capture pixels vs normalized 0–1) are never mixed
//!   implicitly; conversions go through `geometry::normalize_to_unit_box`

use std::fmt;

use glam::DVec2;

/// A match score in `[0, 100]`. Higher is better.
///
/// `0` means "no reasonable correspondence" (wrong stroke count, empty
/// input, or distance beyond tolerance); `100` means "accepted as correct".
/// "Not computable" is expressed as `Option<Score>::None` by the scoring
/// functions, never as a score value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Score(u8);

impl Score {
    pub const ZERO: Score = Score(0);
    pub const MAX: Score = Score(100);

    /// Create a score, clamping to the valid range.
    #[inline]
    pub const fn new(value: u8) -> Score {
        if value > 100 { Score(100) } else { Score(value) }
    }

    /// Convert a `[0.0, 1.0]` ratio to a score, rounding to the nearest
    /// integer and clamping. NaN maps to zero.
    pub fn from_ratio(ratio: f64) -> Score {
        if ratio.is_nan() {
            return Score::ZERO;
        }
        Score((ratio * 100.0).round().clamp(0.0, 100.0) as u8)
    }

    /// The raw integer value in `[0, 100]`.
    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One continuous pen-down-to-pen-up gesture: an ordered point sequence.
///
/// Points are in whatever coordinate space the capture source delivered
/// (usually canvas pixels). Strokes are created transiently per gesture
/// and discarded after scoring.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    points: Vec<DVec2>,
}

impl Stroke {
    pub fn new(points: Vec<DVec2>) -> Stroke {
        Stroke { points }
    }

    /// Convenience constructor from `(x, y)` pairs.
    pub fn from_xy(pairs: &[(f64, f64)]) -> Stroke {
        Stroke {
            points: pairs.iter().map(|&(x, y)| DVec2::new(x, y)).collect(),
        }
    }

    /// Append a captured point (called by the capture collaborator while
    /// the pen is down).
    pub fn push(&mut self, point: DVec2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Strokes with fewer than 3 points are treated as noise by the
    /// matching logic (a stray tap, not a gesture).
    pub fn is_noise(&self) -> bool {
        self.points.len() < 3
    }
}
