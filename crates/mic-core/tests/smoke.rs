// File: crates/mic-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use mic_core::{build_chart, render_to_png, render_to_png_bytes, Dataset, PipelineConfig, RenderOptions};

#[test]
fn render_smoke_png() {
    let chart = build_chart(&Dataset::burtin(), &PipelineConfig::preset("zones").unwrap()).unwrap();

    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    render_to_png(&chart, &opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = render_to_png_bytes(&chart, &opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!((img.width() as i32, img.height() as i32), (chart.width, chart.height));
    // Light theme background in the top-left corner.
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn render_empty_chart() {
    let chart = build_chart(&Dataset::empty(mic_core::Antibiotic::ALL.to_vec()), &PipelineConfig::default()).unwrap();
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    let bytes = render_to_png_bytes(&chart, &opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}
