// File: crates/demo/src/main.rs
// Summary: Demo CLI: loads a MIC table and a chart configuration, writes a PNG and a Vega-Lite JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use argh::FromArgs;
use log::{info, warn};
use mic_core::{render_to_png, Dataset, Pipeline, PipelineConfig, RenderOptions, PRESETS};

/// Render antibiotic MIC charts to PNG and Vega-Lite JSON.
#[derive(FromArgs)]
struct Args {
    /// dataset file (.csv or .json); defaults to the built-in Burtin table
    #[argh(option)]
    data: Option<PathBuf>,

    /// pipeline configuration file (.json); overrides --preset
    #[argh(option)]
    config: Option<PathBuf>,

    /// named configuration preset (default: annotated)
    #[argh(option, default = "String::from(\"annotated\")")]
    preset: String,

    /// render every preset
    #[argh(switch)]
    all: bool,

    /// output directory (default: target/out)
    #[argh(option, default = "PathBuf::from(\"target/out\")")]
    out_dir: PathBuf,

    /// color theme: light or dark (default: light)
    #[argh(option, default = "String::from(\"light\")")]
    theme: String,

    /// only write the Vega-Lite JSON, skip PNG rendering
    #[argh(switch)]
    json_only: bool,

    /// print the available presets and exit
    #[argh(switch)]
    list_presets: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Args = argh::from_env();

    if args.list_presets {
        for name in PRESETS {
            println!("{name}");
        }
        return Ok(());
    }

    if !args.json_only {
        mic_core::preflight().context("PNG rendering is unavailable; rerun with --json-only to skip it")?;
    }

    let table = match &args.data {
        Some(path) => Dataset::load(path).with_context(|| format!("failed to load dataset '{}'", path.display()))?,
        None => Dataset::burtin(),
    };
    info!("Loaded {} species x {} antibiotics", table.len(), table.antibiotics().len());
    if table.is_empty() {
        warn!("dataset is empty; charts will have no bars");
    }

    let jobs: Vec<(String, PipelineConfig)> = if let Some(path) = &args.config {
        let cfg = PipelineConfig::load(path).with_context(|| format!("failed to load config '{}'", path.display()))?;
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("custom").to_string();
        vec![(stem, cfg)]
    } else if args.all {
        PRESETS
            .iter()
            .map(|name| -> Result<(String, PipelineConfig)> { Ok((name.to_string(), PipelineConfig::preset(name)?)) })
            .collect::<Result<_>>()?
    } else {
        vec![(args.preset.clone(), PipelineConfig::preset(&args.preset)?)]
    };

    let opts = RenderOptions { theme: mic_core::theme::find(&args.theme), ..RenderOptions::default() };
    for (name, cfg) in jobs {
        run_one(&name, cfg, &table, &opts, &args.out_dir, args.json_only)
            .with_context(|| format!("chart '{name}' failed"))?;
    }
    Ok(())
}

fn run_one(name: &str, cfg: PipelineConfig, table: &Dataset, opts: &RenderOptions, out_dir: &Path, json_only: bool) -> Result<()> {
    let chart = Pipeline::new(cfg)?.run(table)?;

    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let json_path = out_dir.join(format!("chart_{name}.vl.json"));
    std::fs::write(&json_path, chart.to_vega_lite_string()?)
        .with_context(|| format!("writing {}", json_path.display()))?;
    info!("Wrote {}", json_path.display());

    if !json_only {
        render_to_png(&chart, opts, out_dir.join(format!("chart_{name}.png")))?;
    }
    Ok(())
}
