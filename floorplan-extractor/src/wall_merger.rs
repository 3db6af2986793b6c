use crate::config::MergeConfig;
use crate::types::Wall;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of collapsing double-line walls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeResult {
    pub walls: Vec<Wall>,
    pub metadata: MergeMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeMetadata {
    pub input_count: usize,
    pub merged_pairs: usize,
    pub output_count: usize,
}

/// Merge the two faces of double-line walls into single walls
///
/// Greedy single pass in input order: each unconsumed wall takes the *first*
/// later unconsumed wall that is close and of similar length, not the closest
/// one. Unmatched walls pass through unchanged.
///
/// # Arguments
/// * `walls` - Wall candidates in classification order
/// * `config` - Midpoint tolerance and allowed length ratio
pub fn merge_parallel_walls(walls: &[Wall], config: &MergeConfig) -> MergeResult {
    let mut merged = Vec::with_capacity(walls.len());
    let mut used = vec![false; walls.len()];
    let mut merged_pairs = 0;

    for (i, wall1) in walls.iter().enumerate() {
        if used[i] {
            continue;
        }

        let partner = walls
            .iter()
            .enumerate()
            .skip(i + 1)
            .find(|(j, wall2)| !used[*j] && are_walls_parallel_and_close(wall1, wall2, config));

        match partner {
            Some((j, wall2)) => {
                used[i] = true;
                used[j] = true;
                merged_pairs += 1;
                merged.push(merge_two_walls(wall1, wall2));
            }
            None => merged.push(wall1.clone()),
        }
    }

    let metadata = MergeMetadata {
        input_count: walls.len(),
        merged_pairs,
        output_count: merged.len(),
    };

    debug!(
        "Merged {} wall candidates into {} walls ({} double-line pairs)",
        metadata.input_count, metadata.output_count, metadata.merged_pairs
    );

    MergeResult {
        walls: merged,
        metadata,
    }
}

/// Two walls pair up when their midpoints are within tolerance and their
/// lengths differ by less than `length_ratio` of the first wall's length
fn are_walls_parallel_and_close(wall1: &Wall, wall2: &Wall, config: &MergeConfig) -> bool {
    let distance = wall1.midpoint().distance_to(&wall2.midpoint());
    let length_diff = (wall1.length - wall2.length).abs();

    distance < config.tolerance && length_diff < wall1.length * config.length_ratio
}

/// Centre line of a double-line wall. Thickness is approximated by the
/// distance between the two start points.
fn merge_two_walls(wall1: &Wall, wall2: &Wall) -> Wall {
    Wall {
        start: wall1.start.midpoint(&wall2.start),
        end: wall1.end.midpoint(&wall2.end),
        length: (wall1.length + wall2.length) / 2.0,
        thickness: wall1.start.distance_to(&wall2.start),
        is_orthogonal: wall1.is_orthogonal && wall2.is_orthogonal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use approx::assert_relative_eq;

    fn create_wall(x1: f64, y1: f64, x2: f64, y2: f64) -> Wall {
        let start = Point::new(x1, y1);
        let end = Point::new(x2, y2);
        Wall {
            start,
            end,
            length: start.distance_to(&end),
            thickness: 0.5,
            is_orthogonal: true,
        }
    }

    #[test]
    fn test_double_line_merges() {
        let walls = vec![
            create_wall(0.0, 0.0, 100.0, 0.0),
            create_wall(0.0, 5.0, 100.0, 5.0),
        ];

        let result = merge_parallel_walls(&walls, &MergeConfig::default());

        assert_eq!(result.walls.len(), 1);
        assert_eq!(result.metadata.merged_pairs, 1);

        let wall = &result.walls[0];
        assert_eq!(wall.start, Point::new(0.0, 2.5));
        assert_eq!(wall.end, Point::new(100.0, 2.5));
        assert_relative_eq!(wall.length, 100.0);
        assert_relative_eq!(wall.thickness, 5.0);
    }

    #[test]
    fn test_distant_walls_do_not_merge() {
        let walls = vec![
            create_wall(0.0, 0.0, 100.0, 0.0),
            create_wall(0.0, 50.0, 100.0, 50.0),
        ];

        let result = merge_parallel_walls(&walls, &MergeConfig::default());
        assert_eq!(result.walls, walls);
        assert_eq!(result.metadata.merged_pairs, 0);
    }

    #[test]
    fn test_length_mismatch_does_not_merge() {
        // Midpoints 5 apart, but 100 vs 70 is outside 20%
        let walls = vec![
            create_wall(0.0, 0.0, 100.0, 0.0),
            create_wall(15.0, 5.0, 85.0, 5.0),
        ];

        let result = merge_parallel_walls(&walls, &MergeConfig::default());
        assert_eq!(result.walls.len(), 2);
    }

    #[test]
    fn test_length_ratio_uses_first_wall() {
        // |100 - 81| = 19 < 0.2 * 100, but |81 - 100| = 19 > 0.2 * 81
        let long = create_wall(0.0, 0.0, 100.0, 0.0);
        let short = create_wall(9.5, 4.0, 90.5, 4.0);

        let forward = merge_parallel_walls(&[long.clone(), short.clone()], &MergeConfig::default());
        assert_eq!(forward.walls.len(), 1);

        let backward = merge_parallel_walls(&[short, long], &MergeConfig::default());
        assert_eq!(backward.walls.len(), 2);
    }

    #[test]
    fn test_first_match_wins_not_closest() {
        let walls = vec![
            create_wall(0.0, 0.0, 100.0, 0.0),
            create_wall(0.0, 10.0, 100.0, 10.0), // first valid partner
            create_wall(0.0, 2.0, 100.0, 2.0),   // closer, but later
        ];

        let result = merge_parallel_walls(&walls, &MergeConfig::default());

        assert_eq!(result.walls.len(), 2);
        assert_relative_eq!(result.walls[0].thickness, 10.0);
        assert_eq!(result.walls[0].start, Point::new(0.0, 5.0));
        // The closer wall is left over and passes through untouched
        assert_eq!(result.walls[1], walls[2]);
    }

    #[test]
    fn test_consumed_walls_are_not_reused() {
        let walls = vec![
            create_wall(0.0, 0.0, 100.0, 0.0),
            create_wall(0.0, 4.0, 100.0, 4.0),
            create_wall(0.0, 8.0, 100.0, 8.0),
        ];

        let result = merge_parallel_walls(&walls, &MergeConfig::default());
        assert_eq!(result.walls.len(), 2);
        assert_eq!(result.walls[1], walls[2]);
    }

    #[test]
    fn test_idempotent_without_near_duplicates() {
        let walls = vec![
            create_wall(0.0, 0.0, 100.0, 0.0),
            create_wall(100.0, 0.0, 100.0, 100.0),
            create_wall(100.0, 100.0, 0.0, 100.0),
            create_wall(0.0, 100.0, 0.0, 0.0),
        ];

        let config = MergeConfig::default();
        let once = merge_parallel_walls(&walls, &config).walls;
        let twice = merge_parallel_walls(&once, &config).walls;
        assert_eq!(once, walls);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_empty_and_single() {
        let config = MergeConfig::default();
        assert!(merge_parallel_walls(&[], &config).walls.is_empty());

        let single = vec![create_wall(0.0, 0.0, 50.0, 0.0)];
        assert_eq!(merge_parallel_walls(&single, &config).walls, single);
    }
}
