//! Flattens a page's drawing paths into typed primitives.

use crate::document::{PageContent, PathItem};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Stroke styling inherited from the drawing path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f64,
    pub color: Option<[f64; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Line {
        start: Point,
        end: Point,
        stroke: Stroke,
    },
    Rect {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        stroke: Stroke,
    },
    Curve {
        points: Vec<Point>,
        stroke: Stroke,
    },
}

impl Primitive {
    pub fn stroke(&self) -> &Stroke {
        match self {
            Primitive::Line { stroke, .. }
            | Primitive::Rect { stroke, .. }
            | Primitive::Curve { stroke, .. } => stroke,
        }
    }
}

/// Collect every line, rectangle and curve of the page in path order.
///
/// Coordinates are passed through untouched. A page without vector drawings
/// (a scanned raster page) yields an empty list.
pub fn collect_primitives(page: &PageContent) -> Vec<Primitive> {
    let mut primitives = Vec::with_capacity(page.item_count());

    for path in &page.drawings {
        let stroke = Stroke {
            width: path.width,
            color: path.color,
        };

        for item in &path.items {
            let primitive = match item {
                PathItem::Line { start, end } => Primitive::Line {
                    start: *start,
                    end: *end,
                    stroke,
                },
                PathItem::Rect { x0, y0, x1, y1 } => Primitive::Rect {
                    x0: *x0,
                    y0: *y0,
                    x1: *x1,
                    y1: *y1,
                    stroke,
                },
                PathItem::Curve { points } => Primitive::Curve {
                    points: points.clone(),
                    stroke,
                },
                PathItem::Unsupported => continue,
            };
            primitives.push(primitive);
        }
    }

    primitives
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DrawingPath;

    #[test]
    fn test_collect_preserves_order_and_stroke() {
        let mut page = PageContent::empty(200.0, 200.0);
        page.drawings = vec![
            DrawingPath {
                width: 0.5,
                color: Some([1.0, 0.0, 0.0]),
                items: vec![
                    PathItem::Line {
                        start: Point::new(0.0, 0.0),
                        end: Point::new(50.0, 0.0),
                    },
                    PathItem::Unsupported,
                    PathItem::Rect {
                        x0: 0.0,
                        y0: 0.0,
                        x1: 20.0,
                        y1: 20.0,
                    },
                ],
            },
            DrawingPath {
                width: 0.1,
                color: None,
                items: vec![PathItem::Curve {
                    points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
                }],
            },
        ];

        let primitives = collect_primitives(&page);
        assert_eq!(primitives.len(), 3);
        assert!(matches!(primitives[0], Primitive::Line { .. }));
        assert!(matches!(primitives[1], Primitive::Rect { .. }));
        assert!(matches!(primitives[2], Primitive::Curve { .. }));
        assert_eq!(primitives[0].stroke().color, Some([1.0, 0.0, 0.0]));
        assert_eq!(primitives[1].stroke().width, 0.5);
        assert_eq!(primitives[2].stroke().width, 0.1);
    }

    #[test]
    fn test_raster_page_has_no_primitives() {
        let page = PageContent::empty(595.0, 842.0);
        assert!(collect_primitives(&page).is_empty());
    }
}
