//! Benchmarks for trace generation
//!
//! Measures performance of:
//! - Bubble sort traces at growing input sizes
//! - Dijkstra on ring graphs
//! - Backtracking (N-Queens) and Warnsdorff tours

use algotrace_core::{Coord, Graph, NodeId};
use algotrace_generators::{bubble_sort, dijkstra, knights_tour, n_queens, KnightHeuristic};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Ring with chords so Dijkstra has something to relax.
fn ring(n: usize) -> Graph {
    let mut g = Graph::with_nodes(false, n);
    for i in 0..n {
        g.add_edge(NodeId(i), NodeId((i + 1) % n), (i % 7 + 1) as i64)
            .expect("ring nodes exist");
        if i % 3 == 0 {
            g.add_edge(NodeId(i), NodeId((i + n / 2) % n), 11)
                .expect("chord nodes exist");
        }
    }
    g
}

fn bench_bubble_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("bubble_sort");

    for &n in &[8usize, 32, 128] {
        let values: Vec<i64> = (0..n as i64).rev().collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, v| {
            b.iter(|| bubble_sort(black_box(v)))
        });
    }
    group.finish();
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");

    for &n in &[16usize, 64, 256] {
        let graph = ring(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, g| {
            b.iter(|| dijkstra(black_box(g), NodeId(0), Some(NodeId(n / 2))))
        });
    }
    group.finish();
}

fn bench_boards(c: &mut Criterion) {
    let mut group = c.benchmark_group("boards");

    for size in [6usize, 8, 10] {
        group.bench_with_input(BenchmarkId::new("n_queens", size), &size, |b, &s| {
            b.iter(|| n_queens(black_box(s)))
        });
    }
    for size in [5usize, 8] {
        group.bench_with_input(BenchmarkId::new("knights_tour", size), &size, |b, &s| {
            b.iter(|| knights_tour(black_box(s), Coord::new(0, 0), KnightHeuristic::Warnsdorff))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bubble_sort, bench_dijkstra, bench_boards);
criterion_main!(benches);
