use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pass_score_viewer::{pivot, DuplicatePolicy, ScoreTable};

/// Field-sized sampling: 0.1 m steps over a 9 x 6 m half
fn lattice(nx: usize, ny: usize) -> ScoreTable {
    let mut rows = Vec::with_capacity(nx * ny);
    for i in 0..nx {
        for j in 0..ny {
            let x = -4.5 + 0.1 * i as f64;
            let y = -3.0 + 0.1 * j as f64;
            rows.push((x, y, (x * y).sin()));
        }
    }
    ScoreTable::from_rows(&rows)
}

fn bench_pivot(c: &mut Criterion) {
    let mut group = c.benchmark_group("pivot");
    for &(nx, ny) in &[(30_usize, 20_usize), (90, 60)] {
        let table = lattice(nx, ny);
        group.bench_with_input(BenchmarkId::new("reject", nx * ny), &table, |b, t| {
            b.iter(|| pivot(black_box(t), DuplicatePolicy::Reject))
        });
        group.bench_with_input(BenchmarkId::new("mean", nx * ny), &table, |b, t| {
            b.iter(|| pivot(black_box(t), DuplicatePolicy::Mean))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pivot);
criterion_main!(benches);
