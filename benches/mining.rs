//! Mining benchmarks over seeded synthetic databases.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seqmine::generate::{generate, SyntheticConfig};
use seqmine::graph::SequenceGraph;
use seqmine::mine::{ContiguousMiner, GraspMiner, SpmParameters};

fn synthetic_db() -> Vec<Vec<u32>> {
    let config = SyntheticConfig::new(200, 25, 40)
        .with_motif(vec![1, 2, 3, 4, 5])
        .with_seed(99);
    generate(&config)
}

fn bench_closed_mining(c: &mut Criterion) {
    let params = SpmParameters::new(synthetic_db(), 10).unwrap();
    c.bench_function("mine_closed_200x25", |b| {
        b.iter(|| black_box(ContiguousMiner::closed().run(black_box(&params))))
    });
}

fn bench_graph_construction(c: &mut Criterion) {
    let db = synthetic_db();
    c.bench_function("graph_from_sequences_200x25", |b| {
        b.iter(|| black_box(SequenceGraph::from_sequences(black_box(&db))))
    });
}

fn bench_grasp_extraction(c: &mut Criterion) {
    let params = SpmParameters::new(synthetic_db(), 10)
        .unwrap()
        .with_max_gap(2)
        .unwrap();
    c.bench_function("grasp_200x25", |b| {
        b.iter(|| {
            let miner = GraspMiner::new(params.min_sup(), params.max_gap());
            black_box(miner.run_database(black_box(&params)))
        })
    });
}

criterion_group!(
    benches,
    bench_closed_mining,
    bench_graph_construction,
    bench_grasp_extraction
);
criterion_main!(benches);
