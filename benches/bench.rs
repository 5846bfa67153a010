//! Criterion benchmarks for ulasan.
//!
//! Covers the per-request hot path (normalize, vectorize, predict) and
//! training of the fallback model.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use ulasan::analysis::TextNormalizer;
use ulasan::config::TrainingConfig;
use ulasan::dataset::LabeledExample;
use ulasan::label::LabelSpace;
use ulasan::ml::ModelParams;
use ulasan::pipeline::{PredictionService, TrainingPipeline};

/// Generate labeled reviews for benchmarking.
fn generate_reviews(count: usize) -> Vec<LabeledExample> {
    let templates = [
        ("bahan bakar {} boros banget", "fuel_negative"),
        ("bbm {} irit sekali", "fuel_positive"),
        ("mesin {} halus dan bertenaga", "machine_positive"),
        ("mesin {} berisik", "machine_negative"),
        ("harga {} mahal", "price_negative"),
        ("harga {} murah meriah", "price_positive"),
        ("servis {} lambat", "service_negative"),
        ("servis {} ramah", "service_positive"),
        ("sparepart {} langka", "part_negative"),
        ("desain {} biasa", "other_neutral"),
    ];
    let models = ["avanza", "xenia", "innova", "brio", "ertiga"];

    let space = LabelSpace::standard();
    let normalizer = TextNormalizer::indonesian().unwrap();
    (0..count)
        .map(|i| {
            let (template, label) = templates[i % templates.len()];
            let raw = template.replace("{}", models[i % models.len()]);
            let vector = space.encode([label]).unwrap();
            LabeledExample::normalized(raw, vector, &normalizer, &space).unwrap()
        })
        .collect()
}

fn small_forest() -> TrainingConfig {
    TrainingConfig::default().with_model_params(ModelParams::new().with("n_estimators", 20))
}

/// Benchmark text normalization.
fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let normalizer = TextNormalizer::indonesian().unwrap();
    let review = "Avanza bahan bakar nya borosss bgt!!! cek https://example.com @dealer";

    group.bench_function("normalize_single_review", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(review))))
    });

    let texts: Vec<String> = generate_reviews(100)
        .into_iter()
        .map(|e| e.raw_text)
        .collect();
    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("normalize_batch", |b| {
        b.iter(|| black_box(normalizer.normalize_all(black_box(&texts))))
    });

    group.finish();
}

/// Benchmark single-review prediction with a trained bundle.
fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    let bundle = TrainingPipeline::new(small_forest())
        .unwrap()
        .train(&generate_reviews(200))
        .unwrap();
    let service = PredictionService::indonesian().unwrap();

    group.bench_function("predict_one", |b| {
        b.iter(|| black_box(service.predict_one(black_box("bbm boros banget"), &bundle)))
    });
    group.bench_function("analyze", |b| {
        b.iter(|| black_box(service.analyze(black_box("harga murah tp servis lambat"), &bundle)))
    });

    group.finish();
}

/// Benchmark training per learner.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10);

    let dataset = generate_reviews(200);
    for name in ["Random Forest", "Logistic Regression", "Naive Bayes"] {
        let config = if name == "Random Forest" {
            small_forest()
        } else {
            TrainingConfig::default().with_model(name)
        };
        let pipeline = TrainingPipeline::new(config).unwrap();
        group.bench_function(name, |b| b.iter(|| black_box(pipeline.train(&dataset))));
    }

    group.finish();
}

criterion_group!(benches, bench_normalization, bench_prediction);

// Separate group for slower benchmarks
criterion_group!(slow_benches, bench_training);

criterion_main!(benches, slow_benches);
