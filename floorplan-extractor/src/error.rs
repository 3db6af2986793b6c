use std::path::PathBuf;

/// Hard failures of an extraction run.
///
/// Unclassifiable geometry or text never shows up here; it is dropped and only
/// lowers the confidence score. Callers are expected to treat every variant
/// as a single "extraction failed" outcome.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("document has no pages")]
    EmptyDocument,

    #[error("failed to open document: {0}")]
    Open(String),

    #[error("failed to read page {index}: {reason}")]
    Page { index: usize, reason: String },

    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid extractor configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
