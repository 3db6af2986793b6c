//! Typed architectural elements produced by the extraction pipeline.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Wall segment, either a single classified primitive or a merged double line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub start: Point,
    pub end: Point,
    pub length: f64,
    pub thickness: f64,
    pub is_orthogonal: bool,
}

impl Wall {
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(&self.end)
    }
}

/// Unit family a dimension string was recognised as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionUnit {
    Millimeters,
    Meters,
    Centimeters,
    FeetInches,
    /// Bare 3-5 digit number with no unit suffix
    Unitless,
}

impl DimensionUnit {
    /// Convert a value in this unit to millimetres. Feet-inches values are
    /// expected as total inches.
    ///
    /// Unitless numbers of 100 or more are taken as millimetres already and
    /// smaller ones as metres, so a unitless `50` becomes 50 000 mm.
    pub fn to_millimeters(&self, value: f64) -> f64 {
        match self {
            DimensionUnit::Millimeters => value,
            DimensionUnit::Centimeters => value * 10.0,
            DimensionUnit::Meters => value * 1000.0,
            DimensionUnit::FeetInches => value * 25.4,
            DimensionUnit::Unitless if value >= 100.0 => value,
            DimensionUnit::Unitless => value * 1000.0,
        }
    }
}

/// Dimension annotation found in a text span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub raw_text: String,
    pub unit: DimensionUnit,
    /// `None` when the matched text could not be converted
    pub numeric_value_mm: Option<f64>,
    pub position: Point,
}

/// Room stub created from a keyword label. Boundary polygons are not
/// reconstructed, so `vertices` stays empty and `area`/`perimeter` are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub vertices: Vec<Point>,
    pub area: f64,
    pub perimeter: f64,
    pub label_position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorKind {
    Swing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub position: Point,
    /// Never resolved from the swing arc yet
    pub width: Option<f64>,
    pub kind: DoorKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub position: Point,
    pub width: f64,
}

/// Everything extracted from one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanRecord {
    pub walls: Vec<Wall>,
    pub rooms: Vec<Room>,
    pub dimensions: Vec<Dimension>,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
    pub page_width: f64,
    pub page_height: f64,
    pub scale_factor: Option<f64>,
    pub raw_text: Vec<String>,
    pub confidence: f64,
}

impl FloorPlanRecord {
    pub fn counts(&self) -> ElementCounts {
        ElementCounts {
            walls: self.walls.len(),
            dimensions: self.dimensions.len(),
            rooms: self.rooms.len(),
            doors: self.doors.len(),
            windows: self.windows.len(),
            text_lines: self.raw_text.len(),
        }
    }
}

/// Element counts fed to the confidence scorer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCounts {
    pub walls: usize,
    pub dimensions: usize,
    pub rooms: usize,
    pub doors: usize,
    pub windows: usize,
    pub text_lines: usize,
}

/// One page of a multi-page extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// 1-based
    pub page_number: usize,
    pub fallback_used: bool,
    #[serde(flatten)]
    pub record: FloorPlanRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPageResult {
    pub total_pages: usize,
    pub per_page_records: Vec<PageRecord>,
    pub total_walls: usize,
    pub total_dimensions: usize,
    pub total_rooms: usize,
    pub pages_with_fallback_used: Vec<usize>,
}

impl MultiPageResult {
    pub fn from_pages(per_page_records: Vec<PageRecord>) -> Self {
        let total_walls = per_page_records.iter().map(|p| p.record.walls.len()).sum();
        let total_dimensions = per_page_records
            .iter()
            .map(|p| p.record.dimensions.len())
            .sum();
        let total_rooms = per_page_records.iter().map(|p| p.record.rooms.len()).sum();
        let pages_with_fallback_used = per_page_records
            .iter()
            .filter(|p| p.fallback_used)
            .map(|p| p.page_number)
            .collect();

        Self {
            total_pages: per_page_records.len(),
            per_page_records,
            total_walls,
            total_dimensions,
            total_rooms,
            pages_with_fallback_used,
        }
    }
}
