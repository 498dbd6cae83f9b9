//! Single-stroke shape matching.
//!
//! Decides, as the user completes one stroke, whether it matches the one
//! reference stroke currently being practiced. Both paths are normalized
//! to their own unit bounding boxes (independently: relative position to
//! other strokes is irrelevant for a one-to-one comparison), resampled to
//! a fixed point count, and compared by bidirectional average
//! nearest-point distance. Averaging both directions instead of taking
//! the max keeps a single outlier point from dominating the score.

use glam::DVec2;

use crate::geometry::{normalize_to_unit_box, resample};
use crate::types::{Score, Stroke};

/// Fixed resampling count for both paths.
const SAMPLE_POINTS: usize = 32;

/// Calibrated maximum acceptable normalized distance: shapes recognizable
/// as the same glyph stay below this.
const MAX_ACCEPTABLE_DIST: f64 = 0.25;

/// Fixed acceptance threshold for the progressive-practice gate. Tunable,
/// not derived per letter.
pub const STROKE_MATCH_THRESHOLD: Score = Score::new(45);

/// Average distance from each point in `a` to its nearest point in `b`.
fn avg_nearest_distance(a: &[DVec2], b: &[DVec2]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let sum: f64 = a
        .iter()
        .map(|pa| {
            b.iter()
                .map(|pb| pa.distance(*pb))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();
    sum / a.len() as f64
}

/// Match score 0-100 between one user stroke and one reference stroke
/// path. Higher is a better match.
///
/// `capture_size` is the side length of the capture canvas; user points
/// are divided by it to leave capture space before normalization. The
/// user stroke is rejected outright (score 0) with fewer than 3 captured
/// points, as is a reference path with fewer than 2 points.
pub fn stroke_match_score(user: &Stroke, reference: &[DVec2], capture_size: f64) -> Score {
    if user.is_noise() || reference.len() < 2 {
        return Score::ZERO;
    }

    let size = if capture_size.is_finite() && capture_size > 0.0 {
        capture_size
    } else {
        1.0
    };

    let ref_norm = normalize_to_unit_box(reference);
    let user_scaled: Vec<DVec2> = user.points().iter().map(|&p| p / size).collect();
    let user_norm = normalize_to_unit_box(&user_scaled);

    let ref_sampled = resample(&ref_norm, SAMPLE_POINTS);
    let user_sampled = resample(&user_norm, SAMPLE_POINTS);

    let d1 = avg_nearest_distance(&user_sampled, &ref_sampled);
    let d2 = avg_nearest_distance(&ref_sampled, &user_sampled);
    let avg_dist = (d1 + d2) / 2.0;
    crate::log::debug!(avg_dist, "stroke match distance");

    let score = (100.0 - (avg_dist / MAX_ACCEPTABLE_DIST) * 100.0).clamp(0.0, 100.0);
    Score::new(score.round() as u8)
}

/// The progressive-practice acceptance gate: does this score let the
/// learner advance to the next stroke?
pub fn accepts(score: Score) -> bool {
    score >= STROKE_MATCH_THRESHOLD
}
