use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use floorplan_extractor::config::MergeConfig;
use floorplan_extractor::wall_merger::merge_parallel_walls;
use floorplan_extractor::{Point, Wall};

/// Grid of horizontal double-line walls, one pair per row
fn double_line_grid(rows: usize) -> Vec<Wall> {
    (0..rows)
        .flat_map(|row| {
            let y = row as f64 * 60.0;
            [y, y + 6.0].map(|face| Wall {
                start: Point::new(0.0, face),
                end: Point::new(500.0, face),
                length: 500.0,
                thickness: 0.5,
                is_orthogonal: true,
            })
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let config = MergeConfig::default();
    let mut group = c.benchmark_group("merge_parallel_walls");

    for rows in [10, 100, 500] {
        let walls = double_line_grid(rows);
        group.bench_with_input(BenchmarkId::from_parameter(walls.len()), &walls, |b, walls| {
            b.iter(|| merge_parallel_walls(black_box(walls), &config))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
