//! End-to-end scoring scenarios through the public API: a learner traces
//! a letter on a canvas and the engine scores shape, order and the
//! progressive practice flow.

use aksharam::{
    Attempt, PracticeSession, ReferenceGlyph, Score, Stroke, accepts, order_accuracy,
    shape_similarity, stroke_match_score,
};
use glam::DVec2;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke as StrokeStyle, Transform};

/// Reference square outline in normalized 0-1 coordinates.
fn square_reference() -> Vec<Stroke> {
    vec![Stroke::from_xy(&[
        (0.1, 0.1),
        (0.9, 0.1),
        (0.9, 0.9),
        (0.1, 0.9),
        (0.1, 0.1),
    ])]
}

/// Draw a polyline onto a transparent 300x300 capture canvas, the way the
/// practice canvas renders pen input.
fn draw_on_canvas(points: &[(f32, f32)], width: f32) -> Pixmap {
    let mut pixmap = Pixmap::new(300, 300).unwrap();
    let mut paint = Paint::default();
    paint.set_color_rgba8(30, 30, 30, 255);
    let mut pb = PathBuilder::new();
    pb.move_to(points[0].0, points[0].1);
    for &(x, y) in &points[1..] {
        pb.line_to(x, y);
    }
    let style = StrokeStyle {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..StrokeStyle::default()
    };
    pixmap.stroke_path(
        &pb.finish().unwrap(),
        &paint,
        &style,
        Transform::identity(),
        None,
    );
    pixmap
}

#[test]
fn drawing_the_right_shape_beats_drawing_the_wrong_one() {
    let reference = square_reference();

    let square = draw_on_canvas(
        &[
            (60.0, 60.0),
            (240.0, 60.0),
            (240.0, 240.0),
            (60.0, 240.0),
            (60.0, 60.0),
        ],
        6.0,
    );
    let diagonal = draw_on_canvas(&[(60.0, 60.0), (240.0, 240.0)], 6.0);

    let square_score = shape_similarity(&square, &reference).unwrap();
    let diagonal_score = shape_similarity(&diagonal, &reference).unwrap();

    assert!(square_score >= Score::new(40), "square = {square_score}");
    assert!(diagonal_score <= Score::new(25), "diagonal = {diagonal_score}");
    assert!(
        square_score.value() >= diagonal_score.value() + 20,
        "square = {square_score}, diagonal = {diagonal_score}"
    );
}

#[test]
fn shape_similarity_is_position_and_size_invariant() {
    let reference = square_reference();
    let centered = draw_on_canvas(
        &[
            (90.0, 90.0),
            (210.0, 90.0),
            (210.0, 210.0),
            (90.0, 210.0),
            (90.0, 90.0),
        ],
        6.0,
    );
    let cornered = draw_on_canvas(
        &[
            (10.0, 10.0),
            (70.0, 10.0),
            (70.0, 70.0),
            (10.0, 70.0),
            (10.0, 10.0),
        ],
        3.0,
    );
    let a = shape_similarity(&centered, &reference).unwrap();
    let b = shape_similarity(&cornered, &reference).unwrap();
    let diff = a.value().abs_diff(b.value());
    assert!(diff <= 15, "centered = {a}, cornered = {b}");
}

#[test]
fn scaled_translated_square_trace_scores_at_least_90() {
    // Unit square corners traced clockwise as 5 points; the user draws
    // the same square scaled 2x, translated by (10, 10), 200 raw points.
    let reference = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(0.0, 1.0),
        DVec2::new(0.0, 0.0),
    ];
    let perimeter_point = |t: f64| -> DVec2 {
        let s = t * 4.0;
        let p = match s {
            s if s < 1.0 => DVec2::new(s, 0.0),
            s if s < 2.0 => DVec2::new(1.0, s - 1.0),
            s if s < 3.0 => DVec2::new(3.0 - s, 1.0),
            _ => DVec2::new(0.0, 4.0 - s),
        };
        p * 2.0 + DVec2::new(10.0, 10.0)
    };
    let user = Stroke::new((0..200).map(|i| perimeter_point(i as f64 / 199.0)).collect());
    let score = stroke_match_score(&user, &reference, 300.0);
    assert!(score >= Score::new(90), "score = {score}");
    assert!(accepts(score));
}

#[test]
fn order_and_count_gating_for_a_two_stroke_letter() {
    let reference = vec![
        Stroke::from_xy(&[(0.2, 0.1), (0.2, 0.9)]),
        Stroke::from_xy(&[(0.8, 0.1), (0.8, 0.9)]),
    ];
    let left = Stroke::from_xy(&[(60.0, 30.0), (60.0, 270.0)]);
    let right = Stroke::from_xy(&[(240.0, 30.0), (240.0, 270.0)]);

    assert_eq!(
        order_accuracy(&[left.clone(), right.clone()], &reference),
        Some(Score::MAX)
    );
    assert_eq!(
        order_accuracy(&[right.clone(), left.clone()], &reference),
        Some(Score::ZERO)
    );
    // Wrong segmentation: three strokes against two
    assert_eq!(
        order_accuracy(&[left.clone(), right.clone(), left], &reference),
        Some(Score::ZERO)
    );
    // No reference paths authored yet: not computable
    assert_eq!(order_accuracy(&[right], &[]), None);
}

#[test]
fn practice_flow_from_metadata_json() {
    let json = r##"{
        "character": "ఆ",
        "canvas_width": 400,
        "canvas_height": 400,
        "stroke_count": 2,
        "strokes": [
            {
                "stroke_number": 2,
                "point_count": 3,
                "color": "#ffffff",
                "brush_size": 8,
                "duration_ms": 700,
                "path": [{"x": 60, "y": 280}, {"x": 200, "y": 330}, {"x": 340, "y": 280}]
            },
            {
                "stroke_number": 1,
                "point_count": 3,
                "color": "#ffffff",
                "brush_size": 8,
                "duration_ms": 500,
                "path": [{"x": 60, "y": 100}, {"x": 200, "y": 150}, {"x": 340, "y": 100}]
            }
        ]
    }"##;
    let glyph = ReferenceGlyph::from_json(json).unwrap();
    let mut session = PracticeSession::new(&glyph);

    // Strokes were listed out of order in the JSON; practice starts at 1
    assert_eq!(session.stroke_number(), 1);
    assert_eq!(session.current_stroke().unwrap().stroke_number, 1);

    // A careless flat swipe is rejected and the session stays put
    let swipe = Stroke::from_xy(&[(40.0, 350.0), (200.0, 350.0), (360.0, 350.0)]);
    assert!(matches!(
        session.submit(&swipe, 400.0),
        Some(Attempt::Rejected { .. })
    ));
    assert_eq!(session.stroke_number(), 1);

    // Tracing each reference stroke advances and finally completes
    let trace = |s: &aksharam::ReferenceStroke| {
        Stroke::new(s.path.iter().map(|p| DVec2::new(p.x, p.y)).collect())
    };
    assert!(matches!(
        session.submit(&trace(&glyph.strokes_in_order()[0]), 400.0),
        Some(Attempt::Advanced { .. })
    ));
    assert!(matches!(
        session.submit(&trace(&glyph.strokes_in_order()[1]), 400.0),
        Some(Attempt::Completed { .. })
    ));
    assert!(session.is_complete());
    assert_eq!(session.submit(&swipe, 400.0), None);
}
