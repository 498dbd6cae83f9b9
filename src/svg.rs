//! Reference strokes as SVG path data, for dotted-outline rendering.

use std::fmt::Write;

use crate::reference::ReferenceStroke;

/// Convert a stroke's path points to an SVG path string (`d` attribute),
/// scaling from the glyph canvas size to the target display size.
/// Returns an empty string for an empty path.
pub fn stroke_to_svg_path(
    stroke: &ReferenceStroke,
    source_width: f64,
    source_height: f64,
    target_size: f64,
) -> String {
    if stroke.path.is_empty() {
        return String::new();
    }

    let scale_x = target_size / source_width;
    let scale_y = target_size / source_height;

    let mut d = String::new();
    for (i, point) in stroke.path.iter().enumerate() {
        let x = point.x * scale_x;
        let y = point.y * scale_y;
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            d.push(' ');
        }
        // Infallible for String
        let _ = write!(d, "{cmd} {x:.2} {y:.2}");
    }
    d
}
