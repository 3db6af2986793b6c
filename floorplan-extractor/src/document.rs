//! Page content handed over by the document reader, and the scoped owner of
//! an open document.

use crate::error::{ExtractionError, Result};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One vector drawing path with its stroke styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingPath {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub color: Option<[f64; 3]>,
    #[serde(default)]
    pub items: Vec<PathItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PathItem {
    Line { start: Point, end: Point },
    Rect { x0: f64, y0: f64, x1: f64, y1: f64 },
    Curve { points: Vec<Point> },
    /// Quads and any other item kind the reader passes through
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub bbox: [f64; 4], // [x0, y0, x1, y1]
}

impl TextSpan {
    pub fn center(&self) -> Point {
        Point::new(
            (self.bbox[0] + self.bbox[2]) / 2.0,
            (self.bbox[1] + self.bbox[3]) / 2.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub drawings: Vec<DrawingPath>,
    #[serde(default)]
    pub text_spans: Vec<TextSpan>,
    /// Set by the reader when the page text came from an OCR fallback
    #[serde(default)]
    pub ocr_used: bool,
}

impl PageContent {
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            drawings: Vec::new(),
            text_spans: Vec::new(),
            ocr_used: false,
        }
    }

    /// Trimmed, non-empty span texts in reading order
    pub fn text_lines(&self) -> Vec<String> {
        self.text_spans
            .iter()
            .map(|span| span.text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.drawings.iter().map(|d| d.items.len()).sum()
    }
}

/// An open document that exposes its pages.
///
/// `close` releases whatever the reader holds; it must be safe to call more
/// than once.
pub trait Document {
    fn page_count(&self) -> usize;
    fn page(&self, index: usize) -> Result<PageContent>;
    fn close(&mut self);
}

impl<D: Document + ?Sized> Document for &mut D {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page(&self, index: usize) -> Result<PageContent> {
        (**self).page(index)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Document already decoded into memory from its JSON form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonDocument {
    pub pages: Vec<PageContent>,
    #[serde(skip)]
    closed: bool,
}

impl JsonDocument {
    pub fn new(pages: Vec<PageContent>) -> Self {
        Self {
            pages,
            closed: false,
        }
    }

    /// Decode a document. Bytes that are not a page document fail to open.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| ExtractionError::Open(e.to_string()))
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Document for JsonDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<PageContent> {
        if self.closed {
            return Err(ExtractionError::Page {
                index,
                reason: "document is closed".to_string(),
            });
        }
        self.pages.get(index).cloned().ok_or_else(|| ExtractionError::Page {
            index,
            reason: format!("page out of range (document has {})", self.pages.len()),
        })
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Opened,
    Extracting { page: usize },
    Closed,
}

/// Exclusive owner of an open document for one extraction run.
///
/// Closes the document when dropped, so early returns through `?` still
/// release it.
pub struct DocumentSession<D: Document> {
    document: D,
    state: SessionState,
}

impl<D: Document> DocumentSession<D> {
    pub fn open(document: D) -> Self {
        debug!("Document opened with {} pages", document.page_count());
        Self {
            document,
            state: SessionState::Opened,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    pub fn read_page(&mut self, index: usize) -> Result<PageContent> {
        self.state = SessionState::Extracting { page: index };
        self.document.page(index)
    }

    pub fn close(&mut self) {
        if self.state != SessionState::Closed {
            self.document.close();
            self.state = SessionState::Closed;
            debug!("Document closed");
        }
    }
}

impl<D: Document> Drop for DocumentSession<D> {
    fn drop(&mut self) {
        self.close();
    }
}
