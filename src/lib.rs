//! Stroke matching and scoring for Telugu handwriting practice.
//!
//! A learner traces a reference glyph on a canvas; this crate scores how
//! well the captured strokes match the reference, three different ways:
//!
//! - [`shape_similarity`]: Dice overlap of the rasterized drawing against
//!   the rasterized reference stroke paths (whole-letter shape).
//! - [`order_accuracy`]: were the strokes drawn in the correct relative
//!   order, judged by centroid matching (multi-stroke letters).
//! - [`stroke_match_score`]: does one freshly drawn stroke match the one
//!   reference stroke currently being practiced (progressive mode), with
//!   [`accepts`] as the advance/retry gate.
//!
//! All scoring entry points are pure, synchronous functions over in-memory
//! point data. They never panic on degenerate input; they degrade to
//! sentinel values instead (`None` for "not computable", [`Score::ZERO`]
//! for rejection).
//!
//! Module layout:
//! - `types`: `Score` and `Stroke` value types
//! - `geometry`: path length, bounding boxes, unit-box normalization,
//!   arc-length resampling
//! - `raster`: ink grids, pixel classification and Dice overlap
//! - `order`: multi-stroke order accuracy
//! - `matcher`: single-stroke shape matching and the acceptance gate
//! - `reference`: reference glyph metadata (JSON records + built-in letters)
//! - `practice`: progressive stroke-by-stroke practice session
//! - `replay`: time-parameterized stroke replay stepping
//! - `svg`: reference strokes as SVG path strings

pub mod errors;
pub mod geometry;
pub mod log;
pub mod matcher;
pub mod order;
pub mod practice;
pub mod raster;
pub mod reference;
pub mod replay;
pub mod svg;
pub mod types;

pub use errors::MetadataError;
pub use matcher::{STROKE_MATCH_THRESHOLD, accepts, stroke_match_score};
pub use order::order_accuracy;
pub use practice::{Attempt, PracticeSession};
pub use raster::{PixelSource, Rgba, shape_similarity};
pub use reference::{LetterReference, ReferenceGlyph, ReferenceStroke};
pub use replay::{ReplayFrame, ReplayTimeline};
pub use types::{Score, Stroke};
