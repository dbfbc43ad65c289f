//! 算法基准
//!
//! 网格图上比较两种最大流实现，以及最短路径和最小生成树。

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graphkit::algorithm::{dijkstra, dinic, edmonds_karp, floyd_warshall, kruskal, prim};
use graphkit::generators::{grid2d, grid2d_with};
use graphkit::graph::{Graph, HashGraph, ReadableGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type Cell = (usize, usize);

/// 随机权重的有向网格，种子固定以便复现
fn random_grid(width: usize, height: usize, max: u32) -> HashGraph<Cell, u32> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut graph = grid2d_with(width, height, |x, y| (x, y), 0u32, true).unwrap();
    let pairs: Vec<(Cell, Cell)> = graph.edges().iter().map(|e| (*e.a, *e.b)).collect();
    for (a, b) in pairs {
        graph.connect(a, b, rng.gen_range(1..=max));
    }
    graph
}

fn capacity(w: &u32) -> f64 {
    f64::from(*w)
}

fn bench_max_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_flow");
    group.sample_size(10);
    for &(width, height) in &[(20, 10), (60, 20), (120, 40)] {
        let graph = random_grid(width, height, 1000);
        let source = (width / 20, height / 2);
        let drain = (width - 1 - width / 20, height / 2);
        let label = format!("{width}x{height}");

        group.bench_with_input(BenchmarkId::new("edmonds_karp", &label), &graph, |b, g| {
            b.iter(|| edmonds_karp(black_box(g), &source, &drain, capacity).unwrap().value())
        });
        group.bench_with_input(BenchmarkId::new("dinic", &label), &graph, |b, g| {
            b.iter(|| dinic(black_box(g), &source, &drain, capacity).unwrap().value())
        });
    }
    group.finish();
}

fn bench_shortest_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_paths");
    for &side in &[10usize, 30, 60] {
        let graph = random_grid(side, side, 100);
        group.bench_with_input(BenchmarkId::new("dijkstra", side), &graph, |b, g| {
            b.iter(|| dijkstra(black_box(g), &(0, 0), capacity).map(|t| t.size()))
        });
    }
    for &side in &[5usize, 10, 15] {
        let graph = random_grid(side, side, 100);
        group.bench_with_input(BenchmarkId::new("floyd_warshall", side), &graph, |b, g| {
            b.iter(|| floyd_warshall(black_box(g), capacity).distance(&(0, 0), &(side - 1, side - 1)))
        });
    }
    group.finish();
}

fn bench_spanning_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("spanning_tree");
    for &side in &[10usize, 30, 60] {
        let graph = grid2d(side, side);
        group.bench_with_input(BenchmarkId::new("prim", side), &graph, |b, g| {
            b.iter(|| prim(black_box(g), u32::cmp).size())
        });
        group.bench_with_input(BenchmarkId::new("kruskal", side), &graph, |b, g| {
            b.iter(|| kruskal(black_box(g), u32::cmp).size())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_max_flow, bench_shortest_paths, bench_spanning_tree);
criterion_main!(benches);
