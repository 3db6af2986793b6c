//! Bounded quality signal computed from element counts.

use crate::config::{ScoreTable, Tier};
use crate::types::ElementCounts;

/// Score of the highest tier whose threshold the count exceeds, 0 otherwise
fn bucket_score(tiers: &[Tier], count: usize) -> f64 {
    tiers
        .iter()
        .filter(|t| count > t.above)
        .max_by_key(|t| t.above)
        .map_or(0.0, |t| t.score)
}

/// Sum of the bucket scores for each element kind, clamped to [0, 1].
pub fn score(table: &ScoreTable, counts: &ElementCounts) -> f64 {
    let total = bucket_score(&table.walls, counts.walls)
        + bucket_score(&table.dimensions, counts.dimensions)
        + bucket_score(&table.rooms, counts.rooms)
        + bucket_score(&table.openings, counts.doors.max(counts.windows))
        + bucket_score(&table.text, counts.text_lines);

    if total.is_nan() {
        return 0.0;
    }
    total.clamp(0.0, 1.0)
}
