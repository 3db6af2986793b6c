//! Dimension strings and room-name labels found in positioned text spans.

use crate::document::TextSpan;
use crate::types::{Dimension, DimensionUnit, Room};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Tried in order; the first pattern that matches a span wins.
static DIMENSION_PATTERNS: LazyLock<Vec<(DimensionUnit, Regex)>> = LazyLock::new(|| {
    [
        (DimensionUnit::Millimeters, r"(?i)(\d+(?:\.\d+)?)\s*mm"), // 4500mm, 4500 mm
        (DimensionUnit::Meters, r"(?i)(\d+(?:\.\d+)?)\s*m(?:\W|$)"), // 4.5m but not 4500mm
        (DimensionUnit::Centimeters, r"(?i)(\d+(?:\.\d+)?)\s*cm"), // 450cm
        (DimensionUnit::FeetInches, r#"(\d+)'[\s-]?(\d+)"?"#),     // 4'-6"
        (DimensionUnit::Unitless, r"(\d{3,5})(?:\s|$)"),           // 4500
    ]
    .into_iter()
    .map(|(unit, pattern)| {
        let regex = Regex::new(pattern).expect("dimension patterns are valid regexes");
        (unit, regex)
    })
    .collect()
});

/// First code point of each run of ten Unicode decimal digits outside ASCII.
/// `\d` in the patterns matches all of them.
const DIGIT_ZEROS: &[u32] = &[
    0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66, 0x0CE6,
    0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946, 0x19D0,
    0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0, 0xA9F0,
    0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
];

fn to_ascii_digit(c: char) -> char {
    if c.is_ascii() {
        return c;
    }
    let code = u32::from(c);
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .and_then(|&zero| char::from_digit(code - zero, 10))
        .unwrap_or(c)
}

/// Parse a captured number, accepting decimal digits from any script
/// (full-width `４５００` reads as 4500).
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let ascii: String = text.chars().map(to_ascii_digit).collect();
    ascii.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Recognise a dimension string.
///
/// Returns the unit of the first matching pattern and the value converted to
/// millimetres, or `None` for the value when the matched number cannot be
/// represented. Text matching no pattern is not a dimension.
pub fn parse_dimension(text: &str) -> Option<(DimensionUnit, Option<f64>)> {
    DIMENSION_PATTERNS.iter().find_map(|(unit, regex)| {
        regex
            .captures(text)
            .map(|caps| (*unit, captured_millimeters(*unit, &caps)))
    })
}

fn captured_millimeters(unit: DimensionUnit, caps: &Captures<'_>) -> Option<f64> {
    let number = |group: usize| caps.get(group).and_then(|m| parse_number(m.as_str()));

    let value = match unit {
        DimensionUnit::FeetInches => {
            let feet = number(1)?;
            let inches = number(2).unwrap_or(0.0);
            feet * 12.0 + inches
        }
        _ => number(1)?,
    };

    Some(unit.to_millimeters(value)).filter(|mm| mm.is_finite())
}

/// Scan spans for dimension annotations, one per matching span.
pub fn extract_dimensions(spans: &[TextSpan]) -> Vec<Dimension> {
    spans
        .iter()
        .filter_map(|span| {
            let text = span.text.trim();
            let (unit, numeric_value_mm) = parse_dimension(text)?;
            Some(Dimension {
                raw_text: text.to_string(),
                unit,
                numeric_value_mm,
                position: span.center(),
            })
        })
        .collect()
}

/// Keyword matched by a label, if any. Matching is case-insensitive substring
/// containment, so "Kitchenette" matches "kitchen".
pub fn match_room_keyword<'a>(text: &str, keywords: &'a [String]) -> Option<&'a str> {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .find(|keyword| lower.contains(&keyword.to_lowercase()))
        .map(String::as_str)
}

/// Create a room stub for every span that contains a room keyword.
pub fn extract_rooms(spans: &[TextSpan], keywords: &[String]) -> Vec<Room> {
    spans
        .iter()
        .filter_map(|span| {
            let text = span.text.trim();
            if text.is_empty() {
                return None;
            }
            match_room_keyword(text, keywords)?;
            Some(Room {
                name: text.to_string(),
                vertices: Vec::new(),
                area: 0.0,
                perimeter: 0.0,
                label_position: span.center(),
            })
        })
        .collect()
}
