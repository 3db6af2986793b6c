use serde::{Deserialize, Serialize};

/// Position in page coordinate space (PDF points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Arithmetic mean of a set of points, `None` when empty.
    pub fn centroid(points: &[Point]) -> Option<Point> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }
}

/// Angle of the segment `start -> end` in radians, as returned by `atan2`.
pub fn segment_angle(start: &Point, end: &Point) -> f64 {
    (end.y - start.y).atan2(end.x - start.x)
}

/// True when the segment lies within `tolerance_deg` of 0°, 90° or 180°.
pub fn is_orthogonal(start: &Point, end: &Point, tolerance_deg: f64) -> bool {
    let angle_deg = segment_angle(start, end).to_degrees().abs() % 180.0;
    angle_deg < tolerance_deg
        || (angle_deg - 90.0).abs() < tolerance_deg
        || (angle_deg - 180.0).abs() < tolerance_deg
}
