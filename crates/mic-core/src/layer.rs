// File: crates/mic-core/src/layer.rs
// Summary: Layer trait and the built-in layers (bars, effectiveness zone bands, annotation text).

use serde::Serialize;

use crate::annotation::ResolvedAnnotation;
use crate::axis::Axis;
use crate::classify::{EffectivenessCategory, Thresholds};
use crate::dataset::Antibiotic;
use crate::encoding::{category_color, ColorScale};
use crate::transform::DerivedRow;
use crate::types::Rgb;

/// Inputs shared by every layer of one chart.
pub struct LayerContext<'a> {
    pub rows: &'a [DerivedRow],
    pub x_axis: &'a Axis,
    pub color: &'a ColorScale,
}

/// A layer turns the prepared rows into marks. Implementations must be pure.
pub trait Layer {
    fn id(&self) -> &'static str;
    fn build(&self, ctx: &LayerContext<'_>) -> LayerDescription;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "mark", rename_all = "snake_case")]
pub enum Mark {
    /// One bar from the axis origin to `value`.
    Bar { species: String, antibiotic: Antibiotic, value: f64, group: String, color: Rgb },
    /// Background band across all species between `from` and `to` on the value axis.
    Band { category: EffectivenessCategory, from: f64, to: f64, color: Rgb },
    /// Label pinned to a bar end.
    Text { species: String, antibiotic: Antibiotic, value: f64, label: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerDescription {
    pub id: &'static str,
    pub marks: Vec<Mark>,
}

pub struct BarLayer;

impl Layer for BarLayer {
    fn id(&self) -> &'static str { "bars" }

    fn build(&self, ctx: &LayerContext<'_>) -> LayerDescription {
        let marks = ctx
            .rows
            .iter()
            .map(|r| Mark::Bar {
                species: r.row.species.clone(),
                antibiotic: r.row.antibiotic,
                value: r.row.mic,
                group: ctx.color.key_of(r),
                color: ctx.color.color_of(r),
            })
            .collect();
        LayerDescription { id: self.id(), marks }
    }
}

/// Strong / merely / ineffective bands, bounded by the thresholds' floor and
/// ceiling when set and by the axis domain otherwise. Empty bands are skipped.
pub struct ZoneBandLayer {
    pub thresholds: Thresholds,
}

impl ZoneBandLayer {
    /// Value-axis extent the bands need, so the axis can include it.
    pub fn extent(&self) -> Vec<f64> {
        let t = &self.thresholds;
        [t.floor, t.ceiling].into_iter().flatten().map(|b| t.to_mic(b)).collect()
    }
}

impl Layer for ZoneBandLayer {
    fn id(&self) -> &'static str { "zones" }

    fn build(&self, ctx: &LayerContext<'_>) -> LayerDescription {
        let t = &self.thresholds;
        let (amin, amax) = (ctx.x_axis.min, ctx.x_axis.max);
        let lo = t.floor.map(|f| t.to_mic(f)).unwrap_or(amin);
        let hi = t.ceiling.map(|c| t.to_mic(c)).unwrap_or(amax);
        let edges = [lo, t.to_mic(t.strong), t.to_mic(t.merely), hi];

        let marks = EffectivenessCategory::ALL
            .iter()
            .zip(edges.windows(2))
            .filter_map(|(&category, w)| {
                let from = w[0].max(amin);
                let to = w[1].min(amax);
                (from < to).then(|| Mark::Band { category, from, to, color: category_color(category) })
            })
            .collect();
        LayerDescription { id: self.id(), marks }
    }
}

pub struct AnnotationLayer {
    pub annotations: Vec<ResolvedAnnotation>,
}

impl Layer for AnnotationLayer {
    fn id(&self) -> &'static str { "annotations" }

    fn build(&self, _ctx: &LayerContext<'_>) -> LayerDescription {
        let marks = self
            .annotations
            .iter()
            .map(|a| Mark::Text {
                species: a.species.clone(),
                antibiotic: a.antibiotic,
                value: a.mic,
                label: a.label.clone(),
            })
            .collect();
        LayerDescription { id: self.id(), marks }
    }
}
