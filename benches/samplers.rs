use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spantree::graph::{Graph, Mode, Sampler};

fn grid(side: usize) -> Graph {
    let mut g = Graph::new(side * side);
    for r in 0..side {
        for c in 0..side {
            let v = r * side + c;
            if c + 1 < side {
                g.add_edge(v, v + 1).unwrap();
            }
            if r + 1 < side {
                g.add_edge(v, v + side).unwrap();
            }
        }
    }
    g
}

fn bench_samplers(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_sampling");
    for side in [8usize, 16, 32] {
        let graph = grid(side);
        for mode in Mode::ALL {
            group.bench_with_input(BenchmarkId::new(mode.name(), side), &graph, |b, graph| {
                let mut sampler = Sampler::with_seed(mode, 42).flips(1_000);
                let mut g = graph.copy();
                b.iter(|| black_box(sampler.sample(&mut g).unwrap()));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_samplers);
criterion_main!(benches);
