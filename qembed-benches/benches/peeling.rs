//! Greedy independent-set peeling benchmarks.
//!
//! Measures a single peeling pass over random graphs of increasing size and
//! density, isolating it from sizing and coordinate assignment.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use qembed_benches::{error::BenchSetupError, params::GraphBenchParams, source::random_graph};
use qembed_core::independent_set;

/// Seed used for graph generation and tie-breaking.
const SEED: u64 = 42;

/// Node counts to benchmark.
const NODE_COUNTS: &[u32] = &[64, 256, 1_024];

/// Average degrees to benchmark.
const DEGREES: &[u32] = &[3, 8];

fn peeling_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("independent_set");
    group.sample_size(20);

    for &nodes in NODE_COUNTS {
        for &degree in DEGREES {
            let params = GraphBenchParams { nodes, degree };
            let graph = random_graph(params, SEED)?;

            group.bench_with_input(BenchmarkId::from_parameter(params), &graph, |b, graph| {
                let mut rng = SmallRng::seed_from_u64(SEED);
                b.iter_batched(
                    || graph.clone(),
                    |working| independent_set(working, &mut rng),
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
    Ok(())
}

fn peeling(c: &mut Criterion) {
    if let Err(err) = peeling_impl(c) {
        panic!("independent_set benchmark setup failed: {err}");
    }
}

criterion_group!(benches, peeling);
criterion_main!(benches);
