use crate::annotations::{extract_dimensions, extract_rooms};
use crate::classifier::{detect_doors, detect_windows, wall_candidates, LineRule};
use crate::confidence;
use crate::config::{ExtractorConfig, ScoreTable, ScoringConfig};
use crate::document::{Document, DocumentSession, PageContent, TextSpan};
use crate::error::{ExtractionError, Result};
use crate::primitives::{collect_primitives, Primitive};
use crate::scale::detect_scale;
use crate::types::{
    Door, ElementCounts, FloorPlanRecord, MultiPageResult, PageRecord, Room, Wall, Window,
};
use crate::wall_merger::merge_parallel_walls;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Depth of processing applied to a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionProfile {
    /// Stroke-filtered walls, dimensions and text only. Used per page of a
    /// multi-page document.
    Lightweight,
    /// Full classification with double-line merging, room labels, doors and
    /// windows. Used for single-page extraction.
    Enhanced,
}

impl ExtractionProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionProfile::Lightweight => "lightweight",
            ExtractionProfile::Enhanced => "enhanced",
        }
    }

    pub fn detect_walls(&self, primitives: &[Primitive], config: &ExtractorConfig) -> Vec<Wall> {
        match self {
            ExtractionProfile::Lightweight => {
                let candidates = wall_candidates(primitives, &config.walls, LineRule::StrokeOnly);
                let mut walls = candidates.from_lines;
                walls.extend(candidates.from_rects);
                walls
            }
            ExtractionProfile::Enhanced => {
                let candidates =
                    wall_candidates(primitives, &config.walls, LineRule::StrokeOrOrthogonal);
                // Rectangle edges skip merging so each rectangle keeps its four sides
                let mut walls = merge_parallel_walls(&candidates.from_lines, &config.merge).walls;
                walls.extend(candidates.from_rects);
                walls
            }
        }
    }

    pub fn detect_rooms(&self, spans: &[TextSpan], config: &ExtractorConfig) -> Vec<Room> {
        match self {
            ExtractionProfile::Lightweight => Vec::new(),
            ExtractionProfile::Enhanced => extract_rooms(spans, &config.room_keywords),
        }
    }

    pub fn detect_doors(&self, primitives: &[Primitive], config: &ExtractorConfig) -> Vec<Door> {
        match self {
            ExtractionProfile::Lightweight => Vec::new(),
            ExtractionProfile::Enhanced => detect_doors(primitives, &config.openings),
        }
    }

    pub fn detect_windows(
        &self,
        primitives: &[Primitive],
        config: &ExtractorConfig,
    ) -> Vec<Window> {
        match self {
            ExtractionProfile::Lightweight => Vec::new(),
            ExtractionProfile::Enhanced => detect_windows(primitives, &config.openings),
        }
    }

    pub fn score_table<'a>(&self, scoring: &'a ScoringConfig) -> &'a ScoreTable {
        match self {
            ExtractionProfile::Lightweight => &scoring.lightweight,
            ExtractionProfile::Enhanced => &scoring.enhanced,
        }
    }

    pub fn score(&self, counts: &ElementCounts, scoring: &ScoringConfig) -> f64 {
        confidence::score(self.score_table(scoring), counts)
    }
}

/// Runs the extraction pipeline over documents
pub struct FloorPlanExtractor {
    config: ExtractorConfig,
}

impl FloorPlanExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ExtractorConfig::default())
    }

    /// Extract a single page. Never fails: unclassifiable input only lowers
    /// the confidence.
    pub fn extract_page(&self, page: &PageContent, profile: ExtractionProfile) -> FloorPlanRecord {
        let start = Instant::now();

        let primitives = collect_primitives(page);
        let walls = profile.detect_walls(&primitives, &self.config);
        let dimensions = extract_dimensions(&page.text_spans);
        let raw_text = page.text_lines();
        let rooms = profile.detect_rooms(&page.text_spans, &self.config);
        let doors = profile.detect_doors(&primitives, &self.config);
        let windows = profile.detect_windows(&primitives, &self.config);
        let scale_factor = detect_scale(&raw_text);

        let mut record = FloorPlanRecord {
            walls,
            rooms,
            dimensions,
            doors,
            windows,
            page_width: page.width,
            page_height: page.height,
            scale_factor,
            raw_text,
            confidence: 0.0,
        };
        record.confidence = profile.score(&record.counts(), &self.config.scoring);

        debug!(
            "{} extraction: {} primitives -> {} walls, {} dimensions, {} rooms, \
             {} doors, {} windows (confidence {:.2}) in {}us",
            profile.as_str(),
            primitives.len(),
            record.walls.len(),
            record.dimensions.len(),
            record.rooms.len(),
            record.doors.len(),
            record.windows.len(),
            record.confidence,
            start.elapsed().as_micros()
        );

        record
    }

    /// Extract the first page of a document with the enhanced profile.
    ///
    /// The document is closed before returning, on success and on error.
    pub fn extract_first_page<D: Document>(&self, document: D) -> Result<FloorPlanRecord> {
        let mut session = DocumentSession::open(document);
        if session.page_count() == 0 {
            return Err(ExtractionError::EmptyDocument);
        }

        let page = session.read_page(0)?;
        session.close();

        let record = self.extract_page(&page, ExtractionProfile::Enhanced);
        info!(
            "Extracted {} walls, {} rooms, {} dimensions from first page (confidence {:.2})",
            record.walls.len(),
            record.rooms.len(),
            record.dimensions.len(),
            record.confidence
        );
        Ok(record)
    }

    /// Extract every page independently with the lightweight profile and
    /// aggregate the results in page order.
    pub fn extract_all_pages<D: Document>(&self, document: D) -> Result<MultiPageResult> {
        let start = Instant::now();

        let mut session = DocumentSession::open(document);
        let page_count = session.page_count();
        if page_count == 0 {
            return Err(ExtractionError::EmptyDocument);
        }

        let pages = (0..page_count)
            .map(|index| session.read_page(index))
            .collect::<Result<Vec<_>>>()?;
        session.close();

        let extract = |(index, page): (usize, &PageContent)| PageRecord {
            page_number: index + 1,
            fallback_used: page.ocr_used,
            record: self.extract_page(page, ExtractionProfile::Lightweight),
        };

        let records: Vec<PageRecord> = if self.config.parallel_pages {
            pages.par_iter().enumerate().map(extract).collect()
        } else {
            pages.iter().enumerate().map(extract).collect()
        };

        let result = MultiPageResult::from_pages(records);
        info!(
            "Extracted {} pages: {} walls, {} dimensions, {} rooms in {}ms",
            result.total_pages,
            result.total_walls,
            result.total_dimensions,
            result.total_rooms,
            start.elapsed().as_millis()
        );
        Ok(result)
    }
}
