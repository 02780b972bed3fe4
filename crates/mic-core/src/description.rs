// File: crates/mic-core/src/description.rs
// Summary: Declarative chart description (axes, order, colors, layers) and its Vega-Lite export.
// Notes:
// - Everything here is plain data; serializing the same description twice gives identical bytes.
// - serde_json's default map keeps keys sorted, which keeps the Vega-Lite output stable.

use serde::Serialize;
use serde_json::{json, Value};

use crate::axis::{Axis, ScaleKind};
use crate::dataset::Antibiotic;
use crate::encoding::ColorScale;
use crate::error::Result;
use crate::layer::{LayerDescription, Mark};
use crate::transform::DerivedRow;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartDescription {
    pub title: String,
    pub width: i32,
    pub height: i32,
    /// Species, top to bottom.
    pub species_order: Vec<String>,
    /// Bar order within a species row.
    pub antibiotics: Vec<Antibiotic>,
    pub x_axis: Axis,
    pub color: ColorScale,
    pub tooltip: Vec<&'static str>,
    pub data: Vec<DerivedRow>,
    /// Bottom to top drawing order.
    pub layers: Vec<LayerDescription>,
}

impl ChartDescription {
    pub fn layer(&self, id: &str) -> Option<&LayerDescription> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Layered Vega-Lite v5 document equivalent to this description.
    pub fn to_vega_lite(&self) -> Value {
        let x_scale = match self.x_axis.kind {
            ScaleKind::Log10 => json!({ "type": "log", "domain": [self.x_axis.min, self.x_axis.max] }),
            ScaleKind::Linear => json!({ "type": "linear", "domain": [self.x_axis.min, self.x_axis.max] }),
        };
        let y = json!({ "field": "Bacteria", "type": "nominal", "sort": self.species_order, "title": null });

        let mut layers = Vec::new();
        for layer in &self.layers {
            let spec = match layer.id {
                "zones" => band_layer(layer, &x_scale),
                "bars" => self.bar_layer(&x_scale, &y),
                "annotations" => text_layer(layer, &x_scale, &y),
                _ => continue,
            };
            layers.push(spec);
        }

        json!({
            "$schema": VEGA_LITE_SCHEMA,
            "title": self.title,
            "width": self.width,
            "height": self.height,
            "layer": layers,
        })
    }

    pub fn to_vega_lite_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_vega_lite())?)
    }

    fn bar_layer(&self, x_scale: &Value, y: &Value) -> Value {
        let names = self.antibiotics.iter().map(|a| a.name()).collect::<Vec<_>>();
        let range = self.color.range.iter().map(|c| c.hex()).collect::<Vec<_>>();
        let tooltip = self.tooltip.iter().map(|f| json!({ "field": f })).collect::<Vec<_>>();
        json!({
            "data": { "values": self.data },
            "mark": "bar",
            "encoding": {
                "y": y,
                "yOffset": { "field": "Antibiotic", "type": "nominal", "sort": names },
                "x": { "field": "MIC", "type": "quantitative", "scale": x_scale, "title": self.x_axis.label },
                "color": {
                    "field": self.color.field.field(),
                    "type": "nominal",
                    "title": self.color.field.field(),
                    "scale": { "domain": self.color.domain, "range": range },
                },
                "tooltip": tooltip,
            },
        })
    }
}

fn band_layer(layer: &LayerDescription, x_scale: &Value) -> Value {
    let values = layer
        .marks
        .iter()
        .filter_map(|m| match m {
            Mark::Band { category, from, to, color } => {
                Some(json!({ "zone": category.label(), "from": from, "to": to, "color": color.hex() }))
            }
            _ => None,
        })
        .collect::<Vec<_>>();
    json!({
        "data": { "values": values },
        "mark": { "type": "rect", "opacity": 0.15 },
        "encoding": {
            "x": { "field": "from", "type": "quantitative", "scale": x_scale },
            "x2": { "field": "to" },
            "color": { "field": "color", "type": "nominal", "scale": null, "legend": null },
            "tooltip": [{ "field": "zone" }],
        },
    })
}

fn text_layer(layer: &LayerDescription, x_scale: &Value, y: &Value) -> Value {
    let values = layer
        .marks
        .iter()
        .filter_map(|m| match m {
            Mark::Text { species, antibiotic, value, label } => {
                Some(json!({ "Bacteria": species, "Antibiotic": antibiotic, "MIC": value, "label": label }))
            }
            _ => None,
        })
        .collect::<Vec<_>>();
    json!({
        "data": { "values": values },
        "mark": { "type": "text", "align": "left", "dx": 10, "dy": -10, "fontSize": 12 },
        "encoding": {
            "y": y,
            "x": { "field": "MIC", "type": "quantitative", "scale": x_scale },
            "text": { "field": "label", "type": "nominal" },
        },
    })
}
