// Criterion benchmarks for VirtualSphere Affinity

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use virtualsphere_affinity::core::{Recommender, calculate_similarity, overlap_ratio};
use virtualsphere_affinity::models::{SimilarityWeights, SubjectProfile};

const TAG_POOL: &[&str] = &[
    "rust", "music", "hiking", "cooking", "photography", "gaming", "reading",
    "travel", "fitness", "painting", "chess", "gardening",
];

fn create_subject(id: usize, tag_count: usize) -> SubjectProfile {
    let interests: Vec<String> = (0..tag_count)
        .map(|i| TAG_POOL[(id + i) % TAG_POOL.len()].to_string())
        .collect();
    let goals: Vec<String> = (0..tag_count.min(3))
        .map(|i| format!("goal_{}", (id + i) % 6))
        .collect();

    SubjectProfile {
        subject_id: id.to_string(),
        username: format!("user_{}", id),
        full_name: None,
        profile_image: None,
        bio: None,
        interests,
        goals,
        created_at: None,
    }
}

fn bench_overlap_ratio(c: &mut Criterion) {
    let a: Vec<String> = TAG_POOL.iter().take(6).map(|s| s.to_string()).collect();
    let b: Vec<String> = TAG_POOL.iter().skip(3).take(6).map(|s| s.to_string()).collect();

    c.bench_function("overlap_ratio", |bench| {
        bench.iter(|| overlap_ratio(black_box(&a), black_box(&b)));
    });
}

fn bench_similarity(c: &mut Criterion) {
    let subject = create_subject(0, 6);
    let candidate = create_subject(3, 6);
    let weights = SimilarityWeights::default();

    c.bench_function("calculate_similarity", |bench| {
        bench.iter(|| {
            calculate_similarity(
                black_box(&subject),
                black_box(&candidate),
                black_box(&weights),
            )
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let recommender = Recommender::with_default_weights();
    let subject = create_subject(0, 6);

    let mut group = c.benchmark_group("ranking");

    // 20 is the production pool cap; larger sizes show the headroom
    for pool_size in [5, 10, 20, 100].iter() {
        let candidates: Vec<SubjectProfile> = (1..=*pool_size)
            .map(|i| create_subject(i, 4 + i % 5))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("rank", pool_size),
            pool_size,
            |bench, _| {
                bench.iter(|| {
                    recommender.rank(
                        black_box(&subject),
                        black_box(candidates.clone()),
                        black_box(5),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_overlap_ratio, bench_similarity, bench_ranking);

criterion_main!(benches);
