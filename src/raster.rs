//! Pixel-overlap shape similarity.
//!
//! Both the user's drawing and the reference stroke paths are rendered
//! into a fixed-size ink/no-ink grid, aligned by bounding box (uniform
//! scale, letterboxed and centered), and compared with the Dice overlap
//! coefficient. Alignment makes the score independent of where on the
//! canvas and how large the letter was drawn; Dice tolerates reasonable
//! line-width mismatches while still penalizing wrong overall shape.
//!
//! The rasterizer for reference polylines is tiny-skia; the user side is
//! an abstract [`PixelSource`] so any RGBA surface can be scored.

use glam::DVec2;
use tiny_skia::{
    Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke as StrokeStyle, Transform,
};

use crate::geometry::BBox;
use crate::types::{Score, Stroke};

/// Side length of the square comparison grid, in pixels.
const GRID_SIZE: u32 = 128;
/// Margin around the drawable area on each side.
const PAD: u32 = 8;
/// Stroke width used when rendering reference paths.
const REF_STROKE_WIDTH: f32 = 8.0;
/// Pixel values below this (0-255) count as stroke ink.
const LUMINANCE_THRESHOLD: u8 = 250;
/// Alpha above this (0-255) counts as visible.
const ALPHA_THRESHOLD: u8 = 64;

/// A straight-alpha RGBA pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// An abstract readable RGBA surface: the user's drawing canvas.
///
/// The core only needs to classify pixels as ink or background, so any
/// 2D drawing surface can participate by exposing its pixels.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Pixel at `(x, y)`; coordinates are guaranteed in-bounds by callers.
    fn rgba(&self, x: u32, y: u32) -> Rgba;
}

impl PixelSource for Pixmap {
    fn width(&self) -> u32 {
        Pixmap::width(self)
    }

    fn height(&self) -> u32 {
        Pixmap::height(self)
    }

    fn rgba(&self, x: u32, y: u32) -> Rgba {
        // Out-of-bounds is a caller bug; fall back to transparent.
        let Some(px) = self.pixel(x, y) else {
            return Rgba {
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            };
        };
        let c = px.demultiply();
        Rgba {
            r: c.red(),
            g: c.green(),
            b: c.blue(),
            a: c.alpha(),
        }
    }
}

/// True if a user pixel is drawn stroke: opaque enough and not near-white.
/// The practice canvas has a transparent background.
fn is_ink(p: Rgba) -> bool {
    p.a > ALPHA_THRESHOLD
        && (p.r < LUMINANCE_THRESHOLD || p.g < LUMINANCE_THRESHOLD || p.b < LUMINANCE_THRESHOLD)
}

/// Fixed-size binary ink classification grid.
#[derive(Clone, Debug)]
pub struct InkGrid {
    bits: Vec<bool>,
}

impl InkGrid {
    fn new() -> InkGrid {
        InkGrid {
            bits: vec![false; (GRID_SIZE * GRID_SIZE) as usize],
        }
    }

    fn set(&mut self, x: u32, y: u32) {
        self.bits[(y * GRID_SIZE + x) as usize] = true;
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[(y * GRID_SIZE + x) as usize]
    }

    pub fn ink_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Dice overlap coefficient `2|A∩B| / (|A|+|B|)` over ink pixels.
    /// Returns 0 when both grids are empty (avoids NaN).
    pub fn dice(&self, other: &InkGrid) -> f64 {
        let mut count_a = 0usize;
        let mut count_b = 0usize;
        let mut intersection = 0usize;
        for (&a, &b) in self.bits.iter().zip(&other.bits) {
            count_a += a as usize;
            count_b += b as usize;
            intersection += (a && b) as usize;
        }
        let sum = count_a + count_b;
        if sum == 0 {
            return 0.0;
        }
        2.0 * intersection as f64 / sum as f64
    }
}

/// Uniform fit-and-center of a `range_x` x `range_y` box into the inner
/// drawable area. Returns `(scale, offset)`: destination = offset +
/// (source - source_min) * scale. The aspect ratio is preserved
/// (letterboxed, not stretched).
fn fit_to_inner(range_x: f64, range_y: f64) -> (f64, DVec2) {
    let inner = (GRID_SIZE - PAD * 2) as f64;
    let scale = (inner / range_x).min(inner / range_y);
    let dw = range_x * scale;
    let dh = range_y * scale;
    let offset = DVec2::new(
        PAD as f64 + (inner - dw) / 2.0,
        PAD as f64 + (inner - dh) / 2.0,
    );
    (scale, offset)
}

/// Render reference stroke paths into an ink grid: black strokes of fixed
/// width on white, scaled uniformly to fit the inner area and centered.
fn rasterize_reference(strokes: &[Stroke]) -> Option<InkGrid> {
    let all_points: Vec<DVec2> = strokes
        .iter()
        .flat_map(|s| s.points().iter().copied())
        .collect();
    let bb = BBox::of_points(&all_points);
    let ranges = bb.ranges();
    let (scale, offset) = fit_to_inner(ranges.x, ranges.y);

    let mut pixmap = Pixmap::new(GRID_SIZE, GRID_SIZE)?;
    pixmap.fill(Color::WHITE);

    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = true;

    let style = StrokeStyle {
        width: REF_STROKE_WIDTH,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..StrokeStyle::default()
    };

    for stroke in strokes {
        let points = stroke.points();
        if points.len() < 2 {
            continue;
        }
        let mut pb = PathBuilder::new();
        let to_grid = |p: DVec2| offset + (p - bb.min) * scale;
        let first = to_grid(points[0]);
        pb.move_to(first.x as f32, first.y as f32);
        for &p in &points[1..] {
            let g = to_grid(p);
            pb.line_to(g.x as f32, g.y as f32);
        }
        let Some(path) = pb.finish() else { continue };
        pixmap.stroke_path(&path, &paint, &style, Transform::identity(), None);
    }

    // White background is fully opaque, so the red channel alone separates
    // ink from background on this grayscale render.
    let mut grid = InkGrid::new();
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            if PixelSource::rgba(&pixmap, x, y).r < LUMINANCE_THRESHOLD {
                grid.set(x, y);
            }
        }
    }
    Some(grid)
}

/// Bounding box of ink pixels in the user's canvas, or `None` if blank.
fn user_ink_bbox(src: &impl PixelSource) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = (src.width(), src.height());
    let mut min_x = w;
    let mut min_y = h;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    for y in 0..h {
        for x in 0..w {
            if is_ink(src.rgba(x, y)) {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
    }
    if min_x > max_x || min_y > max_y {
        return None;
    }
    Some((min_x, min_y, max_x, max_y))
}

/// Classify the user's drawing into an ink grid: crop to the ink bounding
/// box, then fit-and-center into the inner area with the same rule as the
/// reference. Sampling is nearest-pixel; classification is binary so this
/// matches a filtered rescale closely enough.
fn rasterize_user(src: &impl PixelSource) -> InkGrid {
    let mut grid = InkGrid::new();
    let Some((min_x, min_y, max_x, max_y)) = user_ink_bbox(src) else {
        return grid;
    };

    let crop_w = (max_x - min_x + 1) as f64;
    let crop_h = (max_y - min_y + 1) as f64;
    let (scale, offset) = fit_to_inner(crop_w, crop_h);

    for gy in 0..GRID_SIZE {
        for gx in 0..GRID_SIZE {
            // Inverse-map the grid pixel center back into the crop box
            let sx = (gx as f64 + 0.5 - offset.x) / scale;
            let sy = (gy as f64 + 0.5 - offset.y) / scale;
            if sx < 0.0 || sy < 0.0 || sx >= crop_w || sy >= crop_h {
                continue;
            }
            let px = min_x + sx as u32;
            let py = min_y + sy as u32;
            if is_ink(src.rgba(px.min(max_x), py.min(max_y))) {
                grid.set(gx, gy);
            }
        }
    }
    grid
}

/// Shape similarity 0-100 (Dice overlap) between the user's canvas and
/// the reference stroke path(s).
///
/// Returns `None` ("not computable", distinct from a failing score) when
/// there are no reference strokes or the canvas has zero dimensions, so
/// the caller can render "not yet available" instead of a false negative.
pub fn shape_similarity(user: &impl PixelSource, reference: &[Stroke]) -> Option<Score> {
    if reference.is_empty() || user.width() == 0 || user.height() == 0 {
        return None;
    }
    let ref_grid = rasterize_reference(reference)?;
    let user_grid = rasterize_user(user);
    let dice = ref_grid.dice(&user_grid);
    crate::log::debug!(
        ref_ink = ref_grid.ink_count(),
        user_ink = user_grid.ink_count(),
        dice,
        "shape similarity"
    );
    Some(Score::from_ratio(dice))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyCanvas;

    impl PixelSource for EmptyCanvas {
        fn width(&self) -> u32 {
            0
        }
        fn height(&self) -> u32 {
            0
        }
        fn rgba(&self, _x: u32, _y: u32) -> Rgba {
            Rgba {
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            }
        }
    }

    fn grid_with_rect(x0: u32, y0: u32, x1: u32, y1: u32) -> InkGrid {
        let mut g = InkGrid::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                g.set(x, y);
            }
        }
        g
    }

    #[test]
    fn dice_of_grid_with_itself_is_one() {
        let g = grid_with_rect(10, 10, 40, 40);
        assert_eq!(g.dice(&g), 1.0);
        assert_eq!(Score::from_ratio(g.dice(&g)), Score::MAX);
    }

    #[test]
    fn dice_of_disjoint_regions_is_zero() {
        let a = grid_with_rect(0, 0, 20, 20);
        let b = grid_with_rect(60, 60, 90, 90);
        assert_eq!(a.dice(&b), 0.0);
    }

    #[test]
    fn dice_of_two_empty_grids_is_zero_not_nan() {
        let a = InkGrid::new();
        let b = InkGrid::new();
        assert_eq!(a.dice(&b), 0.0);
    }

    #[test]
    fn dice_half_overlap() {
        // Two same-sized rects sharing half their area
        let a = grid_with_rect(10, 10, 29, 19); // 20x10
        let b = grid_with_rect(20, 10, 39, 19); // 20x10, half shared
        let dice = a.dice(&b);
        assert!((dice - 0.5).abs() < 1e-12, "dice = {dice}");
    }

    #[test]
    fn reference_raster_has_ink_inside_drawable_area() {
        let strokes = [Stroke::from_xy(&[(0.1, 0.1), (0.9, 0.1), (0.9, 0.9)])];
        let grid = rasterize_reference(&strokes).unwrap();
        assert!(grid.ink_count() > 0);
        // Nothing substantially outside the padded area (antialiasing can
        // bleed a pixel, the fit itself must not)
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                if grid.get(x, y) {
                    assert!(x >= 1 && x < GRID_SIZE - 1);
                    assert!(y >= 1 && y < GRID_SIZE - 1);
                }
            }
        }
    }

    #[test]
    fn similarity_not_computable_without_reference() {
        let user = Pixmap::new(100, 100).unwrap();
        assert_eq!(shape_similarity(&user, &[]), None);
    }

    #[test]
    fn similarity_not_computable_on_zero_size_canvas() {
        let strokes = [Stroke::from_xy(&[(0.0, 0.0), (1.0, 1.0)])];
        assert_eq!(shape_similarity(&EmptyCanvas, &strokes), None);
    }

    #[test]
    fn blank_canvas_scores_zero_against_reference() {
        // Transparent canvas: computable, but no overlap
        let user = Pixmap::new(100, 100).unwrap();
        let strokes = [Stroke::from_xy(&[(0.0, 0.0), (1.0, 1.0)])];
        assert_eq!(shape_similarity(&user, &strokes), Some(Score::ZERO));
    }

    #[test]
    fn user_raster_is_position_and_scale_invariant() {
        // The same small square drawn in two corners at two sizes must
        // classify into (nearly) the same grid cells.
        let draw = |origin: f32, size: f32| {
            let mut pixmap = Pixmap::new(400, 400).unwrap();
            let mut paint = Paint::default();
            paint.set_color_rgba8(20, 20, 20, 255);
            let mut pb = PathBuilder::new();
            pb.move_to(origin, origin);
            pb.line_to(origin + size, origin);
            pb.line_to(origin + size, origin + size);
            pb.line_to(origin, origin + size);
            pb.close();
            let style = StrokeStyle {
                width: size / 10.0,
                ..StrokeStyle::default()
            };
            pixmap.stroke_path(
                &pb.finish().unwrap(),
                &paint,
                &style,
                Transform::identity(),
                None,
            );
            rasterize_user(&pixmap)
        };
        let small = draw(10.0, 80.0);
        let large = draw(150.0, 240.0);
        let dice = small.dice(&large);
        assert!(dice > 0.8, "dice = {dice}");
    }
}
