//! Multi-stroke order accuracy.
//!
//! Given the set of strokes the user drew (already segmented at pen-up)
//! and the reference's ordered strokes, score whether the strokes were
//! drawn in the correct relative order, independent of exact shape.
//!
//! Matching is greedy nearest-centroid: the first-drawn stroke picks the
//! nearest reference centroid among all references, the second picks among
//! the remaining, and so on, with no reassignment. Not a globally optimal
//! assignment, but letters have few strokes and gross order errors still
//! produce low scores.

use glam::DVec2;

use crate::geometry::{BBox, centroid};
use crate::types::{Score, Stroke};

/// Normalize all user strokes jointly to the 0-1 bounding box of the
/// whole drawing. Joint (not per-stroke) normalization preserves the
/// relative positions of strokes, which is what centroid matching needs.
fn normalize_jointly(strokes: &[Stroke]) -> Vec<Vec<DVec2>> {
    let all: Vec<DVec2> = strokes
        .iter()
        .flat_map(|s| s.points().iter().copied())
        .collect();
    let bb = BBox::of_points(&all);
    let ranges = bb.ranges();
    strokes
        .iter()
        .map(|s| s.points().iter().map(|&p| (p - bb.min) / ranges).collect())
        .collect()
}

/// Match each user stroke (in drawing order) to the unclaimed reference
/// stroke with the closest centroid. Returns reference indices.
fn match_strokes(user: &[Vec<DVec2>], reference: &[Stroke]) -> Vec<usize> {
    let user_centroids: Vec<DVec2> = user.iter().map(|s| centroid(s)).collect();
    let ref_centroids: Vec<DVec2> = reference.iter().map(|s| centroid(s.points())).collect();

    let mut matched = Vec::with_capacity(user.len());
    let mut used = vec![false; ref_centroids.len()];

    for uc in &user_centroids {
        let mut best = None;
        let mut best_dist = f64::INFINITY;
        for (r, rc) in ref_centroids.iter().enumerate() {
            if used[r] {
                continue;
            }
            let d = uc.distance_squared(*rc);
            if d < best_dist {
                best_dist = d;
                best = Some(r);
            }
        }
        match best {
            Some(r) => {
                used[r] = true;
                matched.push(r);
            }
            None => matched.push(0),
        }
    }
    matched
}

/// Stroke order accuracy as a score 0-100, or `None` if it cannot be
/// computed (no reference data, or nothing drawn yet).
///
/// - Wrong stroke count is an unambiguous segmentation failure: exactly 0,
///   no partial credit.
/// - A one-stroke letter drawn in one stroke trivially has correct order:
///   100 (shape is scored separately).
/// - Otherwise the score is the fraction of correctly ordered pairs among
///   the greedily matched reference indices.
pub fn order_accuracy(user: &[Stroke], reference: &[Stroke]) -> Option<Score> {
    if reference.is_empty() || user.is_empty() {
        return None;
    }

    if user.len() != reference.len() {
        return Some(Score::ZERO);
    }

    if reference.len() == 1 {
        return Some(Score::MAX);
    }

    let normalized = normalize_jointly(user);
    let matched = match_strokes(&normalized, reference);
    crate::log::debug!(?matched, "stroke order matching");

    let mut correct_pairs = 0u32;
    let mut total_pairs = 0u32;
    for i in 0..matched.len() {
        for j in (i + 1)..matched.len() {
            total_pairs += 1;
            if matched[i] < matched[j] {
                correct_pairs += 1;
            }
        }
    }

    if total_pairs == 0 {
        return Some(Score::MAX);
    }
    Some(Score::from_ratio(correct_pairs as f64 / total_pairs as f64))
}
