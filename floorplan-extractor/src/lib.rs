//! Floor-plan extraction from vector drawings.
//!
//! Takes the vector primitives and positioned text of a CAD-generated
//! drawing page and classifies them into walls, rooms, dimension
//! annotations, doors and windows, with a heuristic confidence score:
//!
//! 1. Collect typed primitives from the page's drawing paths
//! 2. Classify lines, rectangles and curves into wall, door and window candidates
//! 3. Merge double-line walls into single walls
//! 4. Parse dimension strings and room labels from text spans
//! 5. Detect the `1:N` drawing scale
//! 6. Score the result
//!
//! ```rust,ignore
//! use floorplan_extractor::{ExtractorConfig, FloorPlanExtractor, JsonDocument};
//!
//! let document = JsonDocument::from_slice(&bytes)?;
//! let extractor = FloorPlanExtractor::new(ExtractorConfig::default());
//! let record = extractor.extract_first_page(document)?;
//! ```

pub mod annotations;
pub mod classifier;
pub mod confidence;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod orchestrator;
pub mod primitives;
pub mod scale;
pub mod types;
pub mod wall_merger;

pub use config::ExtractorConfig;
pub use document::{Document, DocumentSession, JsonDocument, PageContent, TextSpan};
pub use error::ExtractionError;
pub use geometry::Point;
pub use orchestrator::{ExtractionProfile, FloorPlanExtractor};
pub use types::{
    Dimension, DimensionUnit, Door, DoorKind, FloorPlanRecord, MultiPageResult, PageRecord, Room,
    Wall, Window,
};

/// Extract the first page of a document with the given configuration.
pub fn extract_floor_plan<D: Document>(
    document: D,
    config: &ExtractorConfig,
) -> Result<FloorPlanRecord, ExtractionError> {
    FloorPlanExtractor::new(config.clone()).extract_first_page(document)
}

/// Extract every page of a document with the lightweight profile.
pub fn extract_all_pages<D: Document>(
    document: D,
    config: &ExtractorConfig,
) -> Result<MultiPageResult, ExtractionError> {
    FloorPlanExtractor::new(config.clone()).extract_all_pages(document)
}
