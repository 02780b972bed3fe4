use anyhow::Result;
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use mic_core::{build_chart, render_to_png_bytes, Dataset, PipelineConfig, RenderOptions};

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for preset in ["annotated", "zones"] {
        group.bench_function(preset, |b| {
            let chart = build_chart(&Dataset::burtin(), &PipelineConfig::preset(preset).expect("preset")).expect("chart");
            let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
            b.iter(|| -> Result<()> {
                let bytes = render_to_png_bytes(&chart, &opts)?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
