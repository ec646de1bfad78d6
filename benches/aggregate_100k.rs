use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;

use revproof::aggregate::{aggregate, derive_public_signals};
use revproof::config::QualificationPolicy;
use revproof::crypto::SessionKey;
use revproof::prover::derive_mock_proof;
use revproof::types::{EvidenceBundle, TransactionRecord, VerifyingKey};
use revproof::vault;

const N: usize = 100_000;

// deterministic data: two years of charges, refunds mixed in
fn gen_records(n: usize) -> Vec<TransactionRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    let start = 1_704_067_200i64; // 2024-01-01T00:00:00Z
    let span = 2 * 365 * 86_400i64;
    (0..n)
        .map(|_| TransactionRecord {
            created: start + rng.gen_range(0..span),
            net_minor: rng.gen_range(-5_000..50_000),
        })
        .collect()
}

fn bench_aggregate_100k(c: &mut Criterion) {
    let records = gen_records(N);
    let policy = QualificationPolicy::default();

    let mut group = c.benchmark_group("aggregate_100k");
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(8));

    group.bench_function(BenchmarkId::new("aggregate", N), |b| {
        b.iter(|| {
            let samples = aggregate(black_box(&records));
            black_box(samples);
        })
    });

    group.bench_function(BenchmarkId::new("aggregate_and_derive", N), |b| {
        b.iter(|| {
            let samples = aggregate(black_box(&records));
            let signals = derive_public_signals(&samples, 1_000_000, &policy).unwrap();
            black_box(signals);
        })
    });

    // Sealing cost for a full evidence bundle, fresh key per iteration.
    group.bench_function("seal_evidence_bundle", |b| {
        let samples = aggregate(&records);
        let signals = derive_public_signals(&samples, 1_000_000, &policy).unwrap();
        let bundle = EvidenceBundle {
            proof: derive_mock_proof(&VerifyingKey([42u8; 32]), &signals),
            revenue_data: samples,
            timestamp: 1_750_000_000,
        };
        b.iter_batched(
            SessionKey::generate,
            |key| {
                let payload = vault::seal(&bundle, &key).unwrap();
                black_box(payload);
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_aggregate_100k);
criterion_main!(benches);
