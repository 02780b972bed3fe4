// File: crates/mic-core/src/lib.rs
// Summary: Core library entry point; exports the MIC dataset model, chart pipeline and rendering API.

pub mod annotation;
pub mod axis;
pub mod classify;
pub mod config;
pub mod dataset;
pub mod transform;
pub mod description;
pub mod encoding;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod layer;
pub mod pipeline;
pub mod render;
pub mod reshape;
pub mod scale;
pub mod text;
pub mod theme;
pub mod types;

pub use annotation::{extremes, Annotation, ResolvedAnnotation};
pub use axis::{Axis, ScaleKind};
pub use classify::{classify, EffectivenessCategory, Mic, ThresholdDomain, Thresholds};
pub use config::{PipelineConfig, PRESETS};
pub use dataset::{Antibiotic, Dataset, GramStain, MeasurementRecord};
pub use transform::{log_transform, DerivedRow, NonPositivePolicy};
pub use description::ChartDescription;
pub use encoding::{species_order, ColorBy, SortDirection, SortKey};
pub use error::{ChartError, Result};
pub use layer::{Layer, LayerDescription, Mark};
pub use pipeline::{build_chart, Pipeline};
pub use render::{preflight, render_to_png, render_to_png_bytes, RenderOptions};
pub use reshape::{melt, pivot, LongRow};
pub use theme::Theme;
