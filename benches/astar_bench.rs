use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{AstarSolver, PathingGrid, SearchConfig};
use grid_util::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn random_grid(n: usize, rng: &mut StdRng) -> PathingGrid {
    let mut pathing_grid = PathingGrid::new(n, n);
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            pathing_grid.set_walkable(x, y, !rng.gen_bool(0.3)).unwrap();
            if rng.gen_bool(0.1) {
                pathing_grid.set_weight(x, y, 16.0).unwrap();
            }
        }
    }
    pathing_grid.update();
    pathing_grid
}

fn random_scenarios(grid: &PathingGrid, count: usize, rng: &mut StdRng) -> Vec<(Point, Point)> {
    let mut scenarios = Vec::with_capacity(count);
    while scenarios.len() < count {
        let p1 = Point::new(
            rng.gen_range(0..grid.width()) as i32,
            rng.gen_range(0..grid.height()) as i32,
        );
        let p2 = Point::new(
            rng.gen_range(0..grid.width()) as i32,
            rng.gen_range(0..grid.height()) as i32,
        );
        if grid.reachable(&p1, &p2) {
            scenarios.push((p1, p2));
        }
    }
    scenarios
}

fn random_bench(c: &mut Criterion) {
    const N: usize = 64;
    let mut rng = StdRng::seed_from_u64(0);
    let grid = random_grid(N, &mut rng);
    let scenarios = random_scenarios(&grid, 100, &mut rng);
    for (allow_diag, forbid) in [(false, false), (true, false), (true, true)] {
        let config = SearchConfig::default()
            .with_diagonal(allow_diag)
            .with_corner_cutting_forbidden(forbid);
        let mut solver = AstarSolver::new(config);
        let diag_str = if allow_diag { "8-grid" } else { "4-grid" };
        let corner_str = if forbid { " (no corner cutting)" } else { "" };

        c.bench_function(
            format!("random {N}x{N}, {diag_str}{corner_str}").as_str(),
            |b| {
                b.iter(|| {
                    for (start, end) in &scenarios {
                        black_box(solver.find_path(&grid, *start, *end).unwrap());
                    }
                })
            },
        );
    }
}

criterion_group!(benches, random_bench);
criterion_main!(benches);
