//! Shared geometric utilities: path length, bounding boxes, unit-box
//! normalization and arc-length resampling.
//!
//! Everything here is coordinate-space agnostic and reused by all three
//! scoring algorithms.

use glam::DVec2;

/// Total traveled distance along a polyline; 0 for fewer than 2 points.
pub fn path_length(points: &[DVec2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Mean point of a sequence. Empty input maps to the center of the unit
/// box so degenerate strokes still produce a usable centroid.
pub fn centroid(points: &[DVec2]) -> DVec2 {
    if points.is_empty() {
        return DVec2::new(0.5, 0.5);
    }
    let sum: DVec2 = points.iter().copied().sum();
    sum / points.len() as f64
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl BBox {
    /// Bounding box of a point set. Empty input yields the degenerate unit
    /// box `[0,1]x[0,1]` so callers never divide by zero.
    pub fn of_points(points: &[DVec2]) -> BBox {
        let Some((&first, rest)) = points.split_first() else {
            return BBox {
                min: DVec2::ZERO,
                max: DVec2::ONE,
            };
        };
        let mut bb = BBox {
            min: first,
            max: first,
        };
        for &p in rest {
            bb.expand(p);
        }
        bb
    }

    pub fn expand(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Per-axis ranges with a fallback of 1 when an axis is degenerate
    /// (min == max), so normalization never divides by zero.
    pub fn ranges(&self) -> DVec2 {
        let range = |r: f64| if r == 0.0 { 1.0 } else { r };
        DVec2::new(range(self.width()), range(self.height()))
    }
}

/// Affine-map points so their bounding box becomes `[0,1]x[0,1]`.
///
/// The scale is per-axis (aspect distortion is preserved on purpose): a
/// correctly shaped but differently proportioned stroke should still score
/// well. A degenerate axis collapses to 0 via the range fallback.
pub fn normalize_to_unit_box(points: &[DVec2]) -> Vec<DVec2> {
    let bb = BBox::of_points(points);
    let ranges = bb.ranges();
    points.iter().map(|&p| (p - bb.min) / ranges).collect()
}

/// Resample a polyline to `n` points evenly spaced by arc length, first
/// and last point inclusive.
///
/// This decouples comparison from the sampling rate of the original
/// gesture: two strokes of the same shape drawn at different speeds or
/// pointer polling rates resample to comparable point sets.
///
/// Degenerate inputs are returned as-is: fewer than 2 points directly,
/// zero path length truncated to at most `n` points.
pub fn resample(points: &[DVec2], n: usize) -> Vec<DVec2> {
    debug_assert!(n >= 2);
    if points.len() < 2 {
        return points.to_vec();
    }
    let total_len = path_length(points);
    if total_len == 0.0 {
        return points[..points.len().min(n)].to_vec();
    }

    let mut result = Vec::with_capacity(n);
    let mut walked = 0.0;
    let mut seg_idx = 0;
    let mut seg_start = points[0];
    let mut seg_end = points[1];
    let mut seg_len = seg_start.distance(seg_end);

    for i in 0..n {
        let target = (i as f64 / (n - 1) as f64) * total_len;
        while seg_idx < points.len() - 1 && walked + seg_len < target - 1e-6 {
            walked += seg_len;
            seg_idx += 1;
            seg_start = points[seg_idx];
            seg_end = points[(seg_idx + 1).min(points.len() - 1)];
            seg_len = seg_start.distance(seg_end);
        }
        if seg_idx >= points.len() - 1 {
            result.push(points[points.len() - 1]);
            continue;
        }
        let t = if seg_len == 0.0 {
            0.0
        } else {
            (target - walked) / seg_len
        };
        result.push(seg_start.lerp(seg_end, t));
    }
    result
}
