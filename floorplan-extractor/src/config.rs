//! Tunable thresholds for every stage of the pipeline.

use crate::error::{ExtractionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub walls: WallDetectionConfig,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub openings: OpeningConfig,
    /// Room-name vocabulary; the first keyword contained in a span wins
    #[serde(default = "default_room_keywords")]
    pub room_keywords: Vec<String>,
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Extract pages of a multi-page document on the rayon pool
    #[serde(default = "default_true")]
    pub parallel_pages: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            walls: WallDetectionConfig::default(),
            merge: MergeConfig::default(),
            openings: OpeningConfig::default(),
            room_keywords: default_room_keywords(),
            scoring: ScoringConfig::default(),
            parallel_pages: true,
        }
    }
}

impl ExtractorConfig {
    /// Load a JSON configuration file. Missing sections keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ExtractionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ExtractorConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("walls.min_length", self.walls.min_length),
            ("walls.lightweight_min_length", self.walls.lightweight_min_length),
            ("walls.min_stroke_width", self.walls.min_stroke_width),
            ("walls.orthogonal_tolerance_deg", self.walls.orthogonal_tolerance_deg),
            ("walls.min_rect_side", self.walls.min_rect_side),
            ("merge.tolerance", self.merge.tolerance),
            ("merge.length_ratio", self.merge.length_ratio),
            ("openings.window_min_stroke", self.openings.window_min_stroke),
            ("openings.window_max_stroke", self.openings.window_max_stroke),
            ("openings.window_max_side", self.openings.window_max_side),
        ];

        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(ExtractionError::InvalidConfig(format!(
                    "{name} must be a non-negative finite number, got {value}"
                )));
            }
        }

        if self.openings.window_min_stroke >= self.openings.window_max_stroke {
            return Err(ExtractionError::InvalidConfig(
                "openings.window_min_stroke must be below openings.window_max_stroke".to_string(),
            ));
        }

        self.scoring.lightweight.validate("scoring.lightweight")?;
        self.scoring.enhanced.validate("scoring.enhanced")?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallDetectionConfig {
    /// Lines must be strictly longer than this to become wall candidates
    pub min_length: f64,
    /// Length cut-off used by the lightweight profile
    pub lightweight_min_length: f64,
    /// Stroke width that marks a line as a wall on its own
    pub min_stroke_width: f64,
    pub orthogonal_tolerance_deg: f64,
    /// A rectangle needs one side longer than this to be split into walls
    pub min_rect_side: f64,
}

impl Default for WallDetectionConfig {
    fn default() -> Self {
        Self {
            min_length: 20.0,
            lightweight_min_length: 10.0,
            min_stroke_width: 0.3,
            orthogonal_tolerance_deg: 5.0,
            min_rect_side: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Maximum midpoint distance between the two faces of a double-line wall
    pub tolerance: f64,
    /// Allowed length difference as a fraction of the first wall's length
    pub length_ratio: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            tolerance: 15.0,
            length_ratio: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningConfig {
    /// Window rectangles are drawn with a stroke strictly between these
    pub window_min_stroke: f64,
    pub window_max_stroke: f64,
    /// Both window rectangle sides must be below this
    pub window_max_side: f64,
    /// Curves with fewer control points are not door swings
    pub min_curve_points: usize,
}

impl Default for OpeningConfig {
    fn default() -> Self {
        Self {
            window_min_stroke: 0.1,
            window_max_stroke: 0.3,
            window_max_side: 50.0,
            min_curve_points: 2,
        }
    }
}

/// Count bucket: contributes `score` when the count is strictly above `above`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub above: usize,
    pub score: f64,
}

const fn tier(above: usize, score: f64) -> Tier {
    Tier { above, score }
}

/// Weighted buckets for one scoring profile. An empty bucket list means the
/// element kind does not contribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    #[serde(default)]
    pub walls: Vec<Tier>,
    #[serde(default)]
    pub dimensions: Vec<Tier>,
    #[serde(default)]
    pub rooms: Vec<Tier>,
    /// Evaluated on the larger of the door and window counts
    #[serde(default)]
    pub openings: Vec<Tier>,
    #[serde(default)]
    pub text: Vec<Tier>,
}

impl ScoreTable {
    pub fn lightweight() -> Self {
        Self {
            walls: vec![tier(0, 0.1), tier(5, 0.2), tier(20, 0.3), tier(50, 0.4)],
            dimensions: vec![tier(0, 0.1), tier(5, 0.2), tier(10, 0.3)],
            rooms: Vec::new(),
            openings: Vec::new(),
            text: vec![tier(5, 0.1), tier(20, 0.2)],
        }
    }

    pub fn enhanced() -> Self {
        Self {
            walls: vec![tier(5, 0.1), tier(15, 0.2), tier(30, 0.3)],
            dimensions: vec![tier(0, 0.05), tier(5, 0.15), tier(10, 0.25)],
            rooms: vec![tier(0, 0.05), tier(2, 0.1), tier(5, 0.2)],
            openings: vec![tier(0, 0.05), tier(3, 0.15)],
            text: vec![tier(0, 0.05), tier(10, 0.1)],
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        let buckets = [
            &self.walls,
            &self.dimensions,
            &self.rooms,
            &self.openings,
            &self.text,
        ];
        let bad = buckets
            .iter()
            .flat_map(|tiers| tiers.iter())
            .find(|t| !t.score.is_finite() || t.score < 0.0);

        match bad {
            Some(t) => Err(ExtractionError::InvalidConfig(format!(
                "{name}: tier above {} has invalid score {}",
                t.above, t.score
            ))),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "ScoreTable::lightweight")]
    pub lightweight: ScoreTable,
    #[serde(default = "ScoreTable::enhanced")]
    pub enhanced: ScoreTable,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            lightweight: ScoreTable::lightweight(),
            enhanced: ScoreTable::enhanced(),
        }
    }
}

fn default_room_keywords() -> Vec<String> {
    [
        "kitchen", "bedroom", "bathroom", "living", "dining",
        "hall", "hallway", "corridor", "utility", "storage",
        "garage", "office", "study", "en-suite", "ensuite",
        "wc", "toilet", "shower", "bath", "lounge", "sitting",
        "family", "breakfast", "pantry", "laundry", "closet",
        "wardrobe", "landing", "stairs", "porch", "entrance",
        "reception", "drawing", "master", "guest", "kids",
        // Abbreviations
        "kit", "bed", "bth", "liv", "din",
    ]
    .iter()
    .map(|k| k.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        ExtractorConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ExtractorConfig =
            serde_json::from_str(r#"{"merge": {"tolerance": 8.0, "length_ratio": 0.1}}"#).unwrap();

        assert_eq!(config.merge.tolerance, 8.0);
        assert_eq!(config.walls, WallDetectionConfig::default());
        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.room_keywords.first().map(String::as_str), Some("kitchen"));
        assert!(config.parallel_pages);
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let mut config = ExtractorConfig::default();
        config.merge.tolerance = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ExtractionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_window_strokes() {
        let mut config = ExtractorConfig::default();
        config.openings.window_min_stroke = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_score() {
        let mut config = ExtractorConfig::default();
        config.scoring.enhanced.walls.push(Tier {
            above: 100,
            score: f64::NAN,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ExtractorConfig::from_path(Path::new("/nonexistent/floorplan.json")).unwrap_err();
        assert!(matches!(err, ExtractionError::Io { .. }));
    }
}
