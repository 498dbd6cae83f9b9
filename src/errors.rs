//! Error types for the reference-metadata boundary.
//!
//! The scoring algorithms themselves never return errors; they degrade to
//! sentinel values (`None` / `Score::ZERO`). Errors only exist where
//! external glyph metadata enters the crate.

use thiserror::Error;

/// Failures when loading or validating reference glyph metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("invalid glyph metadata JSON")]
    Json(#[from] serde_json::Error),

    #[error("glyph {character:?} has no strokes")]
    NoStrokes { character: String },

    #[error("glyph {character:?} has invalid canvas dimensions {width}x{height}")]
    BadCanvas {
        character: String,
        width: f64,
        height: f64,
    },

    #[error(
        "glyph {character:?}: stroke numbers must be a contiguous 1..={expected} \
         sequence, found {found} at position {index}"
    )]
    BadStrokeNumbers {
        character: String,
        expected: usize,
        found: u32,
        index: usize,
    },

    #[error("glyph {character:?}: stroke_count is {declared} but {actual} strokes present")]
    StrokeCountMismatch {
        character: String,
        declared: usize,
        actual: usize,
    },
}
