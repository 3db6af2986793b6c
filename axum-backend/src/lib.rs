use axum::{
    extract::{DefaultBodyLimit, Json, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use floorplan_extractor::document::PathItem;
use floorplan_extractor::{
    FloorPlanExtractor, FloorPlanRecord, JsonDocument, MultiPageResult, Point,
};
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

// Input limits checked before any extraction work
pub const MAX_PRIMITIVES: usize = 100_000;
const MAX_COORDINATE_VALUE: f64 = 1_000_000.0;
const MIN_COORDINATE_VALUE: f64 = -1_000_000.0;

#[derive(Clone)]
pub struct AppState {
    extractor: Arc<FloorPlanExtractor>,
}

impl AppState {
    pub fn new(extractor: FloorPlanExtractor) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct ServiceInfo {
    service: String,
    version: String,
    supported_formats: Vec<String>,
    profiles: Vec<String>,
}

fn bad_request(error: &str, message: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
}

fn extraction_failed(err: impl Display) -> ApiError {
    warn!("Extraction failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "EXTRACTION_FAILED".to_string(),
            message: format!("Extraction failed: {}", err),
        }),
    )
}

/// Validate that coordinates are finite and within reasonable bounds
fn is_valid_coordinate(value: f64) -> bool {
    value.is_finite() && (MIN_COORDINATE_VALUE..=MAX_COORDINATE_VALUE).contains(&value)
}

fn is_valid_point(point: &Point) -> bool {
    is_valid_coordinate(point.x) && is_valid_coordinate(point.y)
}

fn validate_document(document: &JsonDocument) -> Result<(), ApiError> {
    let total_items: usize = document.pages.iter().map(|p| p.item_count()).sum();
    if total_items > MAX_PRIMITIVES {
        warn!(
            "Request rejected: too many drawing items ({} > {})",
            total_items, MAX_PRIMITIVES
        );
        return Err(bad_request(
            "INPUT_TOO_LARGE",
            format!(
                "Too many drawing items. Maximum allowed: {}. Received: {}",
                MAX_PRIMITIVES, total_items
            ),
        ));
    }

    for (page_idx, page) in document.pages.iter().enumerate() {
        if !is_valid_coordinate(page.width) || !is_valid_coordinate(page.height) {
            return Err(bad_request(
                "INVALID_PAGE",
                format!("Invalid page dimensions on page {}", page_idx + 1),
            ));
        }

        for (path_idx, path) in page.drawings.iter().enumerate() {
            let valid = path.items.iter().all(|item| match item {
                PathItem::Line { start, end } => is_valid_point(start) && is_valid_point(end),
                PathItem::Rect { x0, y0, x1, y1 } => {
                    [x0, y0, x1, y1].into_iter().all(|v| is_valid_coordinate(*v))
                }
                PathItem::Curve { points } => points.iter().all(is_valid_point),
                PathItem::Unsupported => true,
            });
            if !valid || !path.width.is_finite() {
                return Err(bad_request(
                    "INVALID_POINT",
                    format!(
                        "Invalid coordinate in drawing {} on page {}",
                        path_idx,
                        page_idx + 1
                    ),
                ));
            }
        }

        for (span_idx, span) in page.text_spans.iter().enumerate() {
            if !span.bbox.iter().all(|v| is_valid_coordinate(*v)) {
                return Err(bad_request(
                    "INVALID_POINT",
                    format!(
                        "Invalid text bounding box {} on page {}",
                        span_idx,
                        page_idx + 1
                    ),
                ));
            }
        }
    }

    Ok(())
}

async fn root_info() -> impl IntoResponse {
    Json(ServiceInfo {
        service: "Floorplan Extractor".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        supported_formats: vec!["json".to_string()],
        profiles: vec!["enhanced".to_string(), "lightweight".to_string()],
    })
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn extract_handler(
    State(state): State<AppState>,
    Json(document): Json<JsonDocument>,
) -> Result<Json<FloorPlanRecord>, ApiError> {
    info!("Received extraction request with {} pages", document.pages.len());
    validate_document(&document)?;

    let extractor = Arc::clone(&state.extractor);
    let record = tokio::task::spawn_blocking(move || extractor.extract_first_page(document))
        .await
        .map_err(extraction_failed)?
        .map_err(extraction_failed)?;

    info!(
        "Extracted {} walls, {} rooms (confidence {:.2})",
        record.walls.len(),
        record.rooms.len(),
        record.confidence
    );
    Ok(Json(record))
}

async fn extract_multi_handler(
    State(state): State<AppState>,
    Json(document): Json<JsonDocument>,
) -> Result<Json<MultiPageResult>, ApiError> {
    info!(
        "Received multi-page extraction request with {} pages",
        document.pages.len()
    );
    validate_document(&document)?;

    let extractor = Arc::clone(&state.extractor);
    let result = tokio::task::spawn_blocking(move || extractor.extract_all_pages(document))
        .await
        .map_err(extraction_failed)?
        .map_err(extraction_failed)?;

    Ok(Json(result))
}

pub fn create_app(state: AppState) -> Router {
    // Configure CORS from environment or use localhost for development
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:8080,http://127.0.0.1:8080".to_string());

    let origins: Vec<_> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .route("/", get(root_info))
        .route("/health", get(health_check))
        .route("/extract", post(extract_handler))
        .route("/extract/multi", post(extract_multi_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB of page JSON
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
