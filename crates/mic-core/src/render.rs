// File: crates/mic-core/src/render.rs
// Summary: Headless PNG rendering of a ChartDescription using Skia CPU raster surfaces.

use anyhow::anyhow;
use log::info;
use skia_safe as skia;

use crate::dataset::Antibiotic;
use crate::description::ChartDescription;
use crate::error::{ChartError, Result};
use crate::geometry::RectI32;
use crate::grid::format_tick;
use crate::layer::Mark;
use crate::scale::{BandScale, ValueScale};
use crate::text::{Align, TextShaper};
use crate::theme::Theme;
use crate::types::Insets;

pub struct RenderOptions {
    pub insets: Insets,
    pub theme: Theme,
    /// Text drawing depends on installed fonts; disable for pixel-stable output.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { insets: Insets::default(), theme: Theme::default(), draw_labels: true }
    }
}

/// Startup check for the text backend. Fails fast instead of producing a
/// chart with missing labels.
pub fn preflight() -> Result<()> {
    if TextShaper::fonts_available() { Ok(()) } else { Err(ChartError::MissingFonts) }
}

/// Render to an in-memory PNG.
pub fn render_to_png_bytes(desc: &ChartDescription, opts: &RenderOptions) -> Result<Vec<u8>> {
    let (w, h) = (desc.width, desc.height);
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| ChartError::Render(anyhow!("failed to create {w}x{h} raster surface")))?;
    let canvas = surface.canvas();
    canvas.clear(opts.theme.background);

    let plot = RectI32::plot_area(w, h, &opts.insets);
    let xs = ValueScale::for_axis(&desc.x_axis, plot.left as f32, plot.right as f32);
    let ys = BandScale::new(plot.top as f32, plot.bottom as f32, desc.species_order.len(), desc.antibiotics.len());
    let text = opts.draw_labels.then(TextShaper::new);

    draw_grid(canvas, &opts.theme, &plot, &xs, &desc.x_axis.ticks());
    for layer in &desc.layers {
        for mark in &layer.marks {
            draw_mark(canvas, opts, &plot, &xs, &ys, desc, mark, text.as_ref());
        }
    }
    draw_axes(canvas, &opts.theme, &plot);

    if let Some(t) = &text {
        draw_labels(canvas, t, &opts.theme, desc, &plot, &xs, &ys);
        draw_legend(canvas, t, &opts.theme, desc, &plot);
    }

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| ChartError::Render(anyhow!("encode PNG failed")))?;
    Ok(data.as_bytes().to_vec())
}

/// Render the chart to a PNG at `output_png_path`.
pub fn render_to_png(desc: &ChartDescription, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
    let bytes = render_to_png_bytes(desc, opts)?;
    let path = output_png_path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    info!("wrote {}", path.display());
    Ok(())
}

// ---- helpers ----------------------------------------------------------------

fn fill(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

fn draw_grid(canvas: &skia::Canvas, theme: &Theme, plot: &RectI32, xs: &ValueScale, ticks: &[f64]) {
    let paint = stroke(theme.grid, 1.0);
    for &v in ticks {
        let x = xs.to_px(v);
        canvas.draw_line((x, plot.top as f32), (x, plot.bottom as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, theme: &Theme, plot: &RectI32) {
    let paint = stroke(theme.axis_line, 1.5);
    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);
    canvas.draw_line((l, b), (r, b), &paint);
    canvas.draw_line((l, t), (l, b), &paint);
}

#[allow(clippy::too_many_arguments)]
fn draw_mark(
    canvas: &skia::Canvas,
    opts: &RenderOptions,
    plot: &RectI32,
    xs: &ValueScale,
    ys: &BandScale,
    desc: &ChartDescription,
    mark: &Mark,
    text: Option<&TextShaper>,
) {
    let row_of = |species: &str| desc.species_order.iter().position(|s| s == species);
    let group_of = |a: Antibiotic| desc.antibiotics.iter().position(|x| *x == a).unwrap_or(0);
    match mark {
        Mark::Band { from, to, color, .. } => {
            let rect = skia::Rect::from_ltrb(xs.to_px(*from), plot.top as f32, xs.to_px(*to), plot.bottom as f32);
            canvas.draw_rect(rect, &fill(Theme::paint_color(*color, opts.theme.zone_alpha)));
        }
        Mark::Bar { species, antibiotic, value, color, .. } => {
            let Some(row) = row_of(species.as_str()) else { return };
            let (top, bottom) = ys.bar_span(row, group_of(*antibiotic));
            let (x0, x1) = (xs.baseline_px(), xs.to_px(*value));
            let left = x0.min(x1);
            let right = x0.max(x1).max(left + 1.0);
            let rect = skia::Rect::from_ltrb(left, top, right, bottom.max(top + 1.0));
            canvas.draw_rect(rect, &fill(Theme::paint_color(*color, 255)));
        }
        Mark::Text { species, antibiotic, value, label } => {
            let (Some(t), Some(row)) = (text, row_of(species.as_str())) else { return };
            let (top, bottom) = ys.bar_span(row, group_of(*antibiotic));
            let y = (top + bottom) * 0.5 - 10.0;
            t.draw(canvas, label, xs.to_px(*value) + 10.0, y, 12.0, opts.theme.annotation, Align::Left, false);
        }
    }
}

fn draw_labels(
    canvas: &skia::Canvas,
    t: &TextShaper,
    theme: &Theme,
    desc: &ChartDescription,
    plot: &RectI32,
    xs: &ValueScale,
    ys: &BandScale,
) {
    let (l, b) = (plot.left as f32, plot.bottom as f32);
    t.draw(canvas, &desc.title, (plot.left + plot.right) as f32 * 0.5, plot.top as f32 - 18.0, 16.0, theme.title, Align::Center, false);

    for (row, species) in desc.species_order.iter().enumerate() {
        t.draw(canvas, species, l - 8.0, ys.row_center(row) + 4.0, 12.0, theme.axis_label, Align::Right, true);
    }
    for v in desc.x_axis.ticks() {
        t.draw(canvas, &format_tick(v), xs.to_px(v), b + 16.0, 11.0, theme.tick, Align::Center, false);
    }
    t.draw(canvas, &desc.x_axis.label, (plot.left + plot.right) as f32 * 0.5, b + 40.0, 13.0, theme.axis_label, Align::Center, false);
}

fn draw_legend(canvas: &skia::Canvas, t: &TextShaper, theme: &Theme, desc: &ChartDescription, plot: &RectI32) {
    let x = plot.right as f32 + 16.0;
    let mut y = plot.top as f32 + 8.0;
    t.draw(canvas, desc.color.field.field(), x, y + 10.0, 12.0, theme.axis_label, Align::Left, false);
    for (name, rgb) in desc.color.domain.iter().zip(&desc.color.range) {
        y += 20.0;
        canvas.draw_rect(skia::Rect::from_xywh(x, y, 12.0, 12.0), &fill(Theme::paint_color(*rgb, 255)));
        t.draw(canvas, name, x + 18.0, y + 10.0, 11.0, theme.axis_label, Align::Left, false);
    }
}
