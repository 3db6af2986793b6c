// Generates page-content fixtures for the extraction service
use floorplan_extractor::document::{DrawingPath, PathItem};
use floorplan_extractor::{JsonDocument, PageContent, Point, TextSpan};
use std::fs;

const PAGE_WIDTH: f64 = 842.0;
const PAGE_HEIGHT: f64 = 595.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏗️  Floorplan Extraction Fixture Generator");
    println!("==========================================\n");

    fs::create_dir_all("data")?;

    // Test Case 1: Double-line walls that should merge
    println!("📋 Test Case 1: Apartment with double-line walls");
    save_test("double_line_apartment", create_double_line_apartment())?;

    // Test Case 2: Walls drawn as filled rectangles, plus a door arc and a window
    println!("\n📋 Test Case 2: Rectangle-walled plan");
    save_test("rectangle_walls", create_rectangle_walls())?;

    // Test Case 3: Scanned page with no vector content
    println!("\n📋 Test Case 3: Empty raster page");
    save_test("empty_raster", create_empty_raster())?;

    println!("\n✅ All test cases generated!");
    println!("\n🚀 To test:");
    println!("   1. Start server: cargo run --release --bin floorplan-backend");
    println!("   2. Test each case:");
    println!("      curl -X POST http://localhost:3000/extract \\");
    println!("           -H 'Content-Type: application/json' \\");
    println!("           -d @data/double_line_apartment_document.json | jq");
    println!("      curl -X POST http://localhost:3000/extract/multi \\");
    println!("           -H 'Content-Type: application/json' \\");
    println!("           -d @data/rectangle_walls_document.json | jq");

    Ok(())
}

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> PathItem {
    PathItem::Line {
        start: Point::new(x0, y0),
        end: Point::new(x1, y1),
    }
}

fn span(text: &str, x: f64, y: f64) -> TextSpan {
    TextSpan {
        text: text.to_string(),
        bbox: [x, y, x + 8.0 * text.len() as f64, y + 12.0],
    }
}

fn stroked(width: f64, items: Vec<PathItem>) -> DrawingPath {
    DrawingPath {
        width,
        color: Some([0.0, 0.0, 0.0]),
        items,
    }
}

/// Outer walls drawn as pairs of parallel lines 8 units apart
fn create_double_line_apartment() -> JsonDocument {
    let walls = stroked(
        0.7,
        vec![
            // Top wall
            line(100.0, 100.0, 500.0, 100.0),
            line(100.0, 108.0, 500.0, 108.0),
            // Bottom wall
            line(100.0, 400.0, 500.0, 400.0),
            line(100.0, 408.0, 500.0, 408.0),
            // Left wall
            line(100.0, 100.0, 100.0, 400.0),
            line(108.0, 100.0, 108.0, 400.0),
            // Right wall
            line(500.0, 100.0, 500.0, 400.0),
            line(508.0, 100.0, 508.0, 400.0),
            // Single-line partition
            line(300.0, 108.0, 300.0, 400.0),
        ],
    );

    // Hairline hatching below the stroke threshold
    let hatching = stroked(0.1, vec![line(120.0, 120.0, 140.0, 140.0)]);

    JsonDocument::new(vec![PageContent {
        drawings: vec![walls, hatching],
        text_spans: vec![
            span("LIVING ROOM", 150.0, 250.0),
            span("BEDROOM 1", 350.0, 250.0),
            span("8000mm", 280.0, 80.0),
            span("6.0m", 520.0, 250.0),
            span("SCALE 1:50", 600.0, 550.0),
        ],
        ..PageContent::empty(PAGE_WIDTH, PAGE_HEIGHT)
    }])
}

fn create_rectangle_walls() -> JsonDocument {
    let walls = stroked(
        0.5,
        vec![
            PathItem::Rect { x0: 100.0, y0: 100.0, x1: 500.0, y1: 112.0 },
            PathItem::Rect { x0: 100.0, y0: 388.0, x1: 500.0, y1: 400.0 },
            PathItem::Rect { x0: 100.0, y0: 100.0, x1: 112.0, y1: 400.0 },
            PathItem::Rect { x0: 488.0, y0: 100.0, x1: 500.0, y1: 400.0 },
        ],
    );

    let door_arc = stroked(
        0.25,
        vec![PathItem::Curve {
            points: vec![
                Point::new(200.0, 388.0),
                Point::new(215.0, 370.0),
                Point::new(235.0, 360.0),
                Point::new(240.0, 360.0),
            ],
        }],
    );

    let window = stroked(
        0.2,
        vec![PathItem::Rect { x0: 300.0, y0: 98.0, x1: 340.0, y1: 114.0 }],
    );

    JsonDocument::new(vec![PageContent {
        drawings: vec![walls, door_arc, window],
        text_spans: vec![
            span("KITCHEN", 200.0, 200.0),
            span("DINING", 350.0, 200.0),
            span("4500", 300.0, 80.0),
            span("3'-6\"", 520.0, 250.0),
        ],
        ..PageContent::empty(PAGE_WIDTH, PAGE_HEIGHT)
    }])
}

fn create_empty_raster() -> JsonDocument {
    JsonDocument::new(vec![PageContent {
        ocr_used: true,
        ..PageContent::empty(PAGE_WIDTH, PAGE_HEIGHT)
    }])
}

fn save_test(name: &str, document: JsonDocument) -> Result<(), Box<dyn std::error::Error>> {
    let filename = format!("data/{}_document.json", name);
    fs::write(&filename, serde_json::to_string_pretty(&document)?)?;

    let items: usize = document.pages.iter().map(PageContent::item_count).sum();
    let spans: usize = document.pages.iter().map(|p| p.text_spans.len()).sum();

    println!("   ✅ Saved: {}", filename);
    println!("   📊 Pages: {}", document.pages.len());
    println!("   ✏️  Drawing items: {}", items);
    println!("   🔤 Text spans: {}", spans);

    Ok(())
}
