// File: crates/mic-core/src/config.rs
// Summary: Pipeline configuration (sort, color, scale, thresholds, annotations, subsets) and named presets.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::annotation::Annotation;
use crate::classify::Thresholds;
use crate::dataset::{Antibiotic, GramStain};
use crate::encoding::{ColorBy, SortDirection, SortKey};
use crate::error::{ChartError, Result};
use crate::transform::NonPositivePolicy;
use crate::types::{HEIGHT, WIDTH};

/// Built-in configurations, one per chart variant.
pub const PRESETS: [&str; 5] = ["annotated", "zones", "gram", "log-bands", "penicillin"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub title: String,
    /// Overrides the value-axis title derived from `log_scale`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    pub width: i32,
    pub height: i32,
    pub sort_by: SortKey,
    pub sort_direction: SortDirection,
    pub color_by: ColorBy,
    pub log_scale: bool,
    pub thresholds: Thresholds,
    pub show_zones: bool,
    pub annotations: Vec<Annotation>,
    /// Keep only species with this stain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gram_filter: Option<GramStain>,
    /// Keep only these antibiotic columns, in this order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antibiotics: Option<Vec<Antibiotic>>,
    pub non_positive: NonPositivePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            title: "Antibiotic Effectiveness (MIC Values)".to_string(),
            x_label: None,
            width: WIDTH,
            height: HEIGHT,
            sort_by: SortKey::Species,
            sort_direction: SortDirection::Ascending,
            color_by: ColorBy::Antibiotic,
            log_scale: true,
            thresholds: Thresholds::default(),
            show_zones: false,
            annotations: Vec::new(),
            gram_filter: None,
            antibiotics: None,
            non_positive: NonPositivePolicy::Reject,
        }
    }
}

impl PipelineConfig {
    pub fn preset(name: &str) -> Result<Self> {
        let base = Self::default();
        let cfg = match name {
            "annotated" => Self {
                title: "Annotated Comparison of Antibiotic Effectiveness (MIC Values)".into(),
                sort_by: SortKey::TotalMic,
                sort_direction: SortDirection::Descending,
                annotations: vec![
                    Annotation::new("Bacillus anthracis", Antibiotic::Penicillin, "Highly sensitive"),
                    Annotation::new("Aerobacter aerogenes", Antibiotic::Penicillin, "Highly resistant"),
                ],
                ..base
            },
            "zones" => Self {
                title: "Antibiotic Effectiveness Zones".into(),
                sort_by: SortKey::Species,
                color_by: ColorBy::Category,
                show_zones: true,
                ..base
            },
            "gram" => Self {
                title: "MIC by Gram Stain".into(),
                color_by: ColorBy::Gram,
                ..base
            },
            "log-bands" => Self {
                title: "Effectiveness Bands (log10 MIC)".into(),
                thresholds: Thresholds::log10(0.0, 2.0).with_ceiling(3.0),
                color_by: ColorBy::Category,
                show_zones: true,
                sort_by: SortKey::TotalMic,
                ..base
            },
            "penicillin" => Self {
                title: "Penicillin MIC, Most to Least Effective".into(),
                antibiotics: Some(vec![Antibiotic::Penicillin]),
                sort_by: SortKey::Mic(Antibiotic::Penicillin),
                sort_direction: SortDirection::Ascending,
                thresholds: Thresholds::raw(1.0, 10.0).with_ceiling(900.0),
                show_zones: true,
                ..base
            },
            other => return Err(ChartError::UnknownPreset(other.to_string())),
        };
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Static checks that do not need the dataset. Annotation targets are
    /// checked against the data by the pipeline.
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if self.width <= 0 || self.height <= 0 {
            return Err(ChartError::InvalidConfig(format!("chart size {}x{} must be positive", self.width, self.height)));
        }
        if let Some(list) = &self.antibiotics {
            if list.is_empty() {
                return Err(ChartError::InvalidConfig("antibiotic subset is empty".into()));
            }
        }
        if let Some(a) = self.annotations.iter().find(|a| a.label.trim().is_empty()) {
            return Err(ChartError::InvalidConfig(format!("annotation on {} / {} has an empty label", a.species, a.antibiotic)));
        }
        Ok(())
    }

    /// Value-axis title.
    pub fn x_title(&self) -> String {
        match (&self.x_label, self.log_scale) {
            (Some(l), _) => l.clone(),
            (None, true) => "MIC (log scale, lower = more effective)".to_string(),
            (None, false) => "MIC (mg/ml, lower = more effective)".to_string(),
        }
    }

    /// Whether rows need an effectiveness category.
    pub fn needs_category(&self) -> bool {
        self.color_by == ColorBy::Category || self.show_zones
    }
}
