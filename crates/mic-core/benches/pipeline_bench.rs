use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};
use mic_core::{build_chart, melt, Antibiotic, Dataset, GramStain, MeasurementRecord, PipelineConfig};

fn gen_table(n: usize) -> Dataset {
    let records = (0..n)
        .map(|i| {
            let x = i as f64;
            let mics = vec![
                10f64.powf((x * 0.37).sin() * 3.0),
                10f64.powf((x * 0.11).cos() * 2.0),
                10f64.powf((x * 0.05).sin() * 2.5),
            ];
            let gram = if i % 2 == 0 { GramStain::Positive } else { GramStain::Negative };
            MeasurementRecord::new(format!("species {i:05}"), mics, Some(gram))
        })
        .collect();
    Dataset::new(Antibiotic::ALL.to_vec(), records).expect("bench table")
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for &n in &[16usize, 1_000usize] {
        let table = gen_table(n);
        group.bench_with_input(BenchmarkId::new("melt", n), &table, |b, t| {
            b.iter(|| black_box(melt(t)));
        });
        for preset in ["annotated", "zones"] {
            let mut cfg = PipelineConfig::preset(preset).expect("preset");
            cfg.annotations.clear();
            group.bench_with_input(BenchmarkId::new(preset, n), &table, |b, t| {
                b.iter_batched(
                    || cfg.clone(),
                    |cfg| { let _ = black_box(build_chart(t, &cfg)); },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
