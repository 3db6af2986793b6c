//! Per-primitive heuristics that turn raw geometry into wall, door and window
//! candidates. Anything that matches no rule is dropped.

use crate::config::{OpeningConfig, WallDetectionConfig};
use crate::geometry::{is_orthogonal, Point};
use crate::primitives::{Primitive, Stroke};
use crate::types::{Door, DoorKind, Wall, Window};

/// Which line test decides that a line is a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRule {
    /// Long enough and drawn with a wall-weight stroke
    StrokeOnly,
    /// Long enough and either wall-weight or axis aligned
    StrokeOrOrthogonal,
}

/// Wall candidates split by where they came from. Rectangle edges are kept
/// apart so they can bypass double-line merging and still close their loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallCandidates {
    pub from_lines: Vec<Wall>,
    pub from_rects: Vec<Wall>,
}

impl WallCandidates {
    pub fn len(&self) -> usize {
        self.from_lines.len() + self.from_rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn wall_candidates(
    primitives: &[Primitive],
    config: &WallDetectionConfig,
    rule: LineRule,
) -> WallCandidates {
    let mut candidates = WallCandidates::default();

    for primitive in primitives {
        match primitive {
            Primitive::Line { start, end, stroke } => {
                if let Some(wall) = line_wall(start, end, stroke, config, rule) {
                    candidates.from_lines.push(wall);
                }
            }
            Primitive::Rect {
                x0,
                y0,
                x1,
                y1,
                stroke,
            } => {
                if let Some(edges) = rect_walls(*x0, *y0, *x1, *y1, stroke, config) {
                    candidates.from_rects.extend(edges);
                }
            }
            Primitive::Curve { .. } => {}
        }
    }

    candidates
}

/// Classify a single line as a wall candidate.
pub fn line_wall(
    start: &Point,
    end: &Point,
    stroke: &Stroke,
    config: &WallDetectionConfig,
    rule: LineRule,
) -> Option<Wall> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }

    let length = start.distance_to(end);
    let orthogonal = is_orthogonal(start, end, config.orthogonal_tolerance_deg);
    let thick = stroke.width >= config.min_stroke_width;

    let is_wall = match rule {
        LineRule::StrokeOnly => length > config.lightweight_min_length && thick,
        LineRule::StrokeOrOrthogonal => length > config.min_length && (thick || orthogonal),
    };

    is_wall.then(|| Wall {
        start: *start,
        end: *end,
        length,
        thickness: stroke.width.max(0.0),
        is_orthogonal: orthogonal,
    })
}

/// Split a rectangle into its four edges, walked as a closed loop
/// `(x0,y0) -> (x1,y0) -> (x1,y1) -> (x0,y1) -> (x0,y0)`.
pub fn rect_walls(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    stroke: &Stroke,
    config: &WallDetectionConfig,
) -> Option<[Wall; 4]> {
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        return None;
    }

    let width = (x1 - x0).abs();
    let height = (y1 - y0).abs();

    // A rectangle with a zero side is a line, not a wall outline
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    if width <= config.min_rect_side && height <= config.min_rect_side {
        return None;
    }

    let corners = [
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ];
    let lengths = [width, height, width, height];
    let thickness = stroke.width.max(0.0);

    Some(std::array::from_fn(|i| Wall {
        start: corners[i],
        end: corners[(i + 1) % 4],
        length: lengths[i],
        thickness,
        is_orthogonal: true,
    }))
}

/// Every curve is a candidate door swing positioned at its control-point
/// centroid. The width stays unresolved.
pub fn detect_doors(primitives: &[Primitive], config: &OpeningConfig) -> Vec<Door> {
    primitives
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Curve { points, .. } => door_from_curve(points, config),
            _ => None,
        })
        .collect()
}

fn door_from_curve(points: &[Point], config: &OpeningConfig) -> Option<Door> {
    if points.len() < config.min_curve_points || !points.iter().all(Point::is_finite) {
        return None;
    }

    Point::centroid(points).map(|position| Door {
        position,
        width: None,
        kind: DoorKind::Swing,
    })
}

/// Small rectangles drawn with a thin stroke are window symbols.
pub fn detect_windows(primitives: &[Primitive], config: &OpeningConfig) -> Vec<Window> {
    primitives
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Rect {
                x0,
                y0,
                x1,
                y1,
                stroke,
            } => window_from_rect(*x0, *y0, *x1, *y1, stroke, config),
            _ => None,
        })
        .collect()
}

fn window_from_rect(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    stroke: &Stroke,
    config: &OpeningConfig,
) -> Option<Window> {
    if !(stroke.width > config.window_min_stroke && stroke.width < config.window_max_stroke) {
        return None;
    }

    let width = (x1 - x0).abs();
    let height = (y1 - y0).abs();
    if !(width < config.window_max_side && height < config.window_max_side) {
        return None;
    }

    Some(Window {
        position: Point::new((x0 + x1) / 2.0, (y0 + y1) / 2.0),
        width: width.max(height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stroke(width: f64) -> Stroke {
        Stroke { width, color: None }
    }

    fn line(x1: f64, y1: f64, x2: f64, y2: f64, width: f64) -> Primitive {
        Primitive::Line {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
            stroke: stroke(width),
        }
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64, width: f64) -> Primitive {
        Primitive::Rect {
            x0,
            y0,
            x1,
            y1,
            stroke: stroke(width),
        }
    }

    #[test]
    fn test_thin_orthogonal_line_is_wall() {
        let walls = wall_candidates(
            &[line(0.0, 0.0, 100.0, 0.0, 0.05)],
            &WallDetectionConfig::default(),
            LineRule::StrokeOrOrthogonal,
        );
        assert_eq!(walls.from_lines.len(), 1);
        assert!(walls.from_lines[0].is_orthogonal);
        assert_relative_eq!(walls.from_lines[0].length, 100.0);
        assert_relative_eq!(walls.from_lines[0].thickness, 0.05);
    }

    #[test]
    fn test_thick_diagonal_line_is_wall() {
        let walls = wall_candidates(
            &[line(0.0, 0.0, 100.0, 100.0, 0.5)],
            &WallDetectionConfig::default(),
            LineRule::StrokeOrOrthogonal,
        );
        assert_eq!(walls.from_lines.len(), 1);
        assert!(!walls.from_lines[0].is_orthogonal);
    }

    #[test]
    fn test_thin_diagonal_line_is_dropped() {
        let walls = wall_candidates(
            &[line(0.0, 0.0, 100.0, 100.0, 0.1)],
            &WallDetectionConfig::default(),
            LineRule::StrokeOrOrthogonal,
        );
        assert!(walls.is_empty());
    }

    #[test]
    fn test_short_line_is_dropped() {
        let walls = wall_candidates(
            &[line(0.0, 0.0, 20.0, 0.0, 1.0)],
            &WallDetectionConfig::default(),
            LineRule::StrokeOrOrthogonal,
        );
        assert!(walls.is_empty());
    }

    #[test]
    fn test_stroke_only_rule() {
        let config = WallDetectionConfig::default();
        let primitives = [
            line(0.0, 0.0, 15.0, 0.0, 0.3),  // long enough for the lightweight cut-off
            line(0.0, 0.0, 100.0, 0.0, 0.1), // thin, orthogonal: not a wall here
        ];
        let walls = wall_candidates(&primitives, &config, LineRule::StrokeOnly);
        assert_eq!(walls.from_lines.len(), 1);
        assert_relative_eq!(walls.from_lines[0].length, 15.0);
    }

    #[test]
    fn test_non_finite_line_is_dropped() {
        let walls = wall_candidates(
            &[
                line(0.0, 0.0, f64::INFINITY, 0.0, 1.0),
                line(f64::NAN, 0.0, 50.0, 0.0, 1.0),
            ],
            &WallDetectionConfig::default(),
            LineRule::StrokeOrOrthogonal,
        );
        assert!(walls.is_empty());
    }

    #[test]
    fn test_rect_yields_closed_loop() {
        let config = WallDetectionConfig::default();
        let walls = rect_walls(10.0, 20.0, 110.0, 80.0, &stroke(0.5), &config).unwrap();

        let lengths: Vec<f64> = walls.iter().map(|w| w.length).collect();
        assert_eq!(lengths, vec![100.0, 60.0, 100.0, 60.0]);

        for i in 0..4 {
            assert_eq!(walls[i].end, walls[(i + 1) % 4].start);
            assert_relative_eq!(walls[i].start.distance_to(&walls[i].end), walls[i].length);
        }
        let perimeter: f64 = walls.iter().map(|w| w.length).sum();
        assert_relative_eq!(perimeter, 320.0);
    }

    #[test]
    fn test_rect_with_reversed_corners() {
        let config = WallDetectionConfig::default();
        let walls = rect_walls(110.0, 80.0, 10.0, 20.0, &stroke(0.5), &config).unwrap();
        assert!(walls.iter().all(|w| w.length > 0.0));
        assert_eq!(walls[3].end, walls[0].start);
    }

    #[test]
    fn test_small_rect_is_not_walls() {
        let config = WallDetectionConfig::default();
        assert!(rect_walls(0.0, 0.0, 10.0, 10.0, &stroke(0.5), &config).is_none());
        // One side over the threshold is enough
        assert!(rect_walls(0.0, 0.0, 11.0, 2.0, &stroke(0.5), &config).is_some());
        // Degenerate rectangle
        assert!(rect_walls(0.0, 0.0, 100.0, 0.0, &stroke(0.5), &config).is_none());
    }

    #[test]
    fn test_curve_is_door_swing() {
        let primitives = [Primitive::Curve {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 20.0),
                Point::new(20.0, 40.0),
                Point::new(40.0, 40.0),
            ],
            stroke: stroke(0.2),
        }];

        let doors = detect_doors(&primitives, &OpeningConfig::default());
        assert_eq!(doors.len(), 1);
        assert_eq!(doors[0].position, Point::new(15.0, 25.0));
        assert_eq!(doors[0].kind, DoorKind::Swing);
        // Arc radius to door width is not inferred yet
        assert!(doors[0].width.is_none());
    }

    #[test]
    fn test_single_point_curve_is_not_door() {
        let primitives = [Primitive::Curve {
            points: vec![Point::new(0.0, 0.0)],
            stroke: stroke(0.2),
        }];
        assert!(detect_doors(&primitives, &OpeningConfig::default()).is_empty());
    }

    #[test]
    fn test_thin_small_rect_is_window() {
        let config = OpeningConfig::default();
        let primitives = [
            rect(100.0, 100.0, 140.0, 106.0, 0.2), // window
            rect(100.0, 100.0, 140.0, 106.0, 0.3), // stroke bound is exclusive
            rect(100.0, 100.0, 160.0, 106.0, 0.2), // too long
            rect(100.0, 100.0, 140.0, 106.0, 0.1), // stroke bound is exclusive
        ];

        let windows = detect_windows(&primitives, &config);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].position, Point::new(120.0, 103.0));
        assert_relative_eq!(windows[0].width, 40.0);
    }
}
