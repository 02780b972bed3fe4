// File: crates/mic-core/src/pipeline.rs
// Summary: Subset -> melt -> screen/derive -> resolve annotations -> order/scale -> layers.

use log::{debug, warn};

use crate::annotation::resolve;
use crate::axis::{Axis, ScaleKind};
use crate::config::PipelineConfig;
use crate::dataset::Dataset;
use crate::description::ChartDescription;
use crate::encoding::{species_order, ColorScale, SortKey};
use crate::error::{ChartError, Result};
use crate::layer::{AnnotationLayer, BarLayer, Layer, LayerContext, ZoneBandLayer};
use crate::reshape::melt;
use crate::transform::{derive, screen};

/// A validated configuration that can be run against any table.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig { &self.config }

    /// Build the chart description for `table`. Does not touch `table`.
    pub fn run(&self, table: &Dataset) -> Result<ChartDescription> {
        let cfg = &self.config;

        let mut subset = match cfg.gram_filter {
            Some(g) => table.filter_gram(g),
            None => table.clone(),
        };
        if let Some(wanted) = &cfg.antibiotics {
            subset = subset.select_antibiotics(wanted)?;
        }
        debug!("subset: {} of {} species, columns {:?}", subset.len(), table.len(), subset.antibiotics());
        if let SortKey::Mic(a) = cfg.sort_by {
            if !subset.antibiotics().contains(&a) {
                return Err(ChartError::MissingColumn(format!("{a} (sort key)")));
            }
        }

        let mut long = melt(&subset);
        debug!("melted {} rows", long.len());

        let needs_category = cfg.needs_category();
        if cfg.log_scale || needs_category {
            long = screen(long, cfg.non_positive)?;
        }
        let rows = derive(long, needs_category.then_some(&cfg.thresholds), cfg.log_scale)?;

        if rows.is_empty() {
            warn!("no rows left to chart after subsetting");
        }
        let annotations = resolve(&cfg.annotations, &rows)?;
        debug!("resolved {} annotations", annotations.len());

        let zones = cfg.show_zones.then(|| ZoneBandLayer { thresholds: cfg.thresholds });
        let kind = if cfg.log_scale { ScaleKind::Log10 } else { ScaleKind::Linear };
        let extent = zones.as_ref().map(|z| z.extent()).unwrap_or_default();
        let x_axis = Axis::fit(cfg.x_title(), kind, rows.iter().map(|r| r.row.mic).chain(extent));
        let color = ColorScale::new(cfg.color_by, subset.antibiotics());
        let order = species_order(&rows, cfg.sort_by, cfg.sort_direction);
        debug!("x domain [{}, {}] ({:?}), {} species", x_axis.min, x_axis.max, kind, order.len());

        let mut stack: Vec<Box<dyn Layer>> = Vec::new();
        if let Some(z) = zones {
            stack.push(Box::new(z));
        }
        stack.push(Box::new(BarLayer));
        if !annotations.is_empty() {
            stack.push(Box::new(AnnotationLayer { annotations }));
        }
        let ctx = LayerContext { rows: &rows, x_axis: &x_axis, color: &color };
        let layers: Vec<_> = stack.iter().map(|l| l.build(&ctx)).collect();

        let mut tooltip = vec!["Bacteria", "Antibiotic", "MIC", "Gram"];
        if needs_category {
            tooltip.push("Category");
        }

        Ok(ChartDescription {
            title: cfg.title.clone(),
            width: cfg.width,
            height: cfg.height,
            species_order: order,
            antibiotics: subset.antibiotics().to_vec(),
            x_axis,
            color,
            tooltip,
            data: rows,
            layers,
        })
    }
}

/// One-shot helper: validate `config` and run it against `table`.
pub fn build_chart(table: &Dataset, config: &PipelineConfig) -> Result<ChartDescription> {
    Pipeline::new(config.clone())?.run(table)
}
