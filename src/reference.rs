//! Reference glyph data: the authored ground truth each letter is scored
//! against.
//!
//! Two sources exist: full animation metadata records (JSON, one per
//! letter, with timed stroke paths in canvas coordinates) and the built-in
//! letter registry carrying stroke counts plus, where authored, normalized
//! stroke paths. Absence of path data is a valid state: it means accuracy
//! scoring is unavailable for that letter and only the stroke count can be
//! shown.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::errors::MetadataError;
use crate::types::Stroke;

/// One point of a reference stroke path, in the glyph's canvas space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

/// One authored reference stroke. The rendering metadata (color, brush
/// size, duration) is irrelevant to matching but drives replay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceStroke {
    /// 1-indexed position in the letter's writing order.
    pub stroke_number: u32,
    pub point_count: usize,
    pub color: String,
    pub brush_size: f64,
    pub duration_ms: f64,
    pub path: Vec<PathPoint>,
}

impl ReferenceStroke {
    /// The stroke path as plain points for the matching algorithms.
    pub fn points(&self) -> Vec<DVec2> {
        self.path.iter().map(|p| DVec2::new(p.x, p.y)).collect()
    }

    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(self.points())
    }
}

/// Ordered stroke-by-stroke ground truth for one letter, plus the canvas
/// dimensions its coordinates are expressed in. Loaded once per session
/// and treated as immutable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceGlyph {
    pub character: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_delay_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_frames: Option<u32>,
    pub stroke_count: usize,
    pub strokes: Vec<ReferenceStroke>,
}

impl ReferenceGlyph {
    /// Parse and validate a glyph metadata record.
    ///
    /// Strokes are sorted by `stroke_number` and the numbers must form a
    /// contiguous `1..=N` sequence matching array order after sorting.
    pub fn from_json(json: &str) -> Result<ReferenceGlyph, MetadataError> {
        let mut glyph: ReferenceGlyph = serde_json::from_str(json)?;
        glyph.validate()?;
        glyph
            .strokes
            .sort_by_key(|s| s.stroke_number);
        Ok(glyph)
    }

    fn validate(&self) -> Result<(), MetadataError> {
        if self.strokes.is_empty() {
            return Err(MetadataError::NoStrokes {
                character: self.character.clone(),
            });
        }
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0)
            || !self.canvas_width.is_finite()
            || !self.canvas_height.is_finite()
        {
            return Err(MetadataError::BadCanvas {
                character: self.character.clone(),
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.stroke_count != self.strokes.len() {
            return Err(MetadataError::StrokeCountMismatch {
                character: self.character.clone(),
                declared: self.stroke_count,
                actual: self.strokes.len(),
            });
        }
        let mut numbers: Vec<u32> = self.strokes.iter().map(|s| s.stroke_number).collect();
        numbers.sort_unstable();
        for (index, &found) in numbers.iter().enumerate() {
            if found != index as u32 + 1 {
                return Err(MetadataError::BadStrokeNumbers {
                    character: self.character.clone(),
                    expected: self.strokes.len(),
                    found,
                    index,
                });
            }
        }
        Ok(())
    }

    /// Strokes in writing order (sorted on load).
    pub fn strokes_in_order(&self) -> &[ReferenceStroke] {
        &self.strokes
    }

    /// All stroke paths as plain strokes, for the whole-letter scoring
    /// algorithms.
    pub fn stroke_paths(&self) -> Vec<Stroke> {
        self.strokes.iter().map(|s| s.to_stroke()).collect()
    }
}

/// Built-in reference data for a letter: stroke count, and stroke paths
/// where authored. Paths are in normalized 0-1 space.
#[derive(Clone, Debug, PartialEq)]
pub struct LetterReference {
    pub letter_id: &'static str,
    /// Number of strokes in the correct writing order.
    pub stroke_count: usize,
    /// Ordered stroke paths for shape/order matching; `None` until
    /// authored for the letter.
    pub strokes: Option<Vec<Stroke>>,
}

/// Full built-in reference for a letter, or `None` if unknown.
pub fn letter_reference(letter_id: &str) -> Option<LetterReference> {
    match letter_id {
        // అ - one stroke (loop), points in normalized 0-1
        "a" => Some(LetterReference {
            letter_id: "a",
            stroke_count: 1,
            strokes: Some(vec![Stroke::from_xy(&[
                (0.5, 0.2),
                (0.65, 0.25),
                (0.78, 0.4),
                (0.8, 0.55),
                (0.72, 0.72),
                (0.55, 0.8),
                (0.38, 0.75),
                (0.25, 0.6),
                (0.22, 0.45),
                (0.3, 0.3),
                (0.42, 0.22),
                (0.5, 0.2),
            ])]),
        }),
        // ఆ - the అ loop continuing into the tail without a pen lift
        "aa" => Some(LetterReference {
            letter_id: "aa",
            stroke_count: 1,
            strokes: Some(vec![Stroke::from_xy(&[
                (0.5, 0.2),
                (0.65, 0.25),
                (0.78, 0.4),
                (0.8, 0.55),
                (0.72, 0.72),
                (0.55, 0.8),
                (0.38, 0.75),
                (0.25, 0.6),
                (0.22, 0.45),
                (0.3, 0.3),
                (0.42, 0.22),
                (0.55, 0.25),
                (0.68, 0.32),
                (0.78, 0.42),
                (0.85, 0.55),
                (0.88, 0.7),
                (0.85, 0.9),
            ])]),
        }),
        _ => None,
    }
}

/// Reference stroke count for a letter, or `None` if unknown.
pub fn stroke_count_for_letter(letter_id: &str) -> Option<usize> {
    letter_reference(letter_id).map(|r| r.stroke_count)
}
