use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use community_graph::{edges_within, edges_within_by_id, Graph};

fn random_graph(vertex_count: usize, edge_count: usize, rng: &mut StdRng) -> Graph<usize> {
    let mut graph = Graph::new();
    graph.extend_vertices(0..vertex_count);
    for _ in 0..edge_count {
        let u = rng.gen_range(0..vertex_count);
        let v = rng.gen_range(0..vertex_count);
        graph.insert_edge(u, v);
    }
    graph
}

fn bench_subgraph(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let graph = random_graph(20_000, 100_000, &mut rng);
    let edges = graph.edge_list();
    let subset: BTreeSet<usize> = (0..20_000).filter(|_| rng.gen_bool(0.3)).collect();

    c.bench_function("edges_within", |b| {
        b.iter(|| edges_within(black_box(&graph), black_box(&subset)))
    });
    c.bench_function("edges_within_by_id", |b| {
        b.iter(|| edges_within_by_id(black_box(&edges), |v| *v, black_box(&subset)))
    });
}

criterion_group!(benches, bench_subgraph);
criterion_main!(benches);
