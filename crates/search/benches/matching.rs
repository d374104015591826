//! Benchmarks for ingredient normalization and fuzzy matching.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use foodshare_search::{best_match, weighted_ratio, IngredientNormalizer, ScoringWeights};

fn create_catalog_names(count: usize) -> Vec<String> {
    let bases = [
        "aceite oliva virgen extra",
        "huevos frescos camperos",
        "tomate triturado",
        "leche entera",
        "queso rallado mozzarella",
        "harina de trigo",
    ];
    (0..count)
        .map(|i| format!("{} {}", bases[i % bases.len()], i))
        .collect()
}

fn bench_weighted_ratio(c: &mut Criterion) {
    let weights = ScoringWeights::default();

    c.bench_function("weighted_ratio_single", |b| {
        b.iter(|| {
            weighted_ratio(
                black_box("aceite oliva"),
                black_box("aceite oliva virgen extra"),
                &weights,
            )
        })
    });
}

fn bench_clean(c: &mut Criterion) {
    let normalizer = IngredientNormalizer::default();

    c.bench_function("clean_ingredient", |b| {
        b.iter(|| normalizer.clean(black_box("2 cucharadas de aceite de oliva virgen")))
    });
}

fn bench_best_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("best_match");
    let weights = ScoringWeights::default();

    for size in [100, 1000, 5000].iter() {
        let names = create_catalog_names(*size);

        group.bench_with_input(BenchmarkId::new("catalog", size), size, |b, _| {
            b.iter(|| {
                best_match(
                    black_box("tomate triturado"),
                    black_box(names.as_slice()),
                    60.0,
                    &weights,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_weighted_ratio, bench_clean, bench_best_match);
criterion_main!(benches);
