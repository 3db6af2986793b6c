use crate::annotations::parse_number;
use regex::Regex;
use std::sync::LazyLock;

static SCALE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:scale\s*)?1\s*:\s*(\d+)").expect("scale pattern is a valid regex")
});

/// Find the first `1:N` drawing-scale annotation and return `N`.
///
/// Any positive integer is accepted; no check is made that `N` is a usual
/// architectural scale. `1:0` is not a scale.
pub fn detect_scale<S: AsRef<str>>(lines: &[S]) -> Option<f64> {
    lines.iter().find_map(|line| {
        SCALE_PATTERN
            .captures(line.as_ref())
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_number(m.as_str()))
            .filter(|n| *n > 0.0)
    })
}
