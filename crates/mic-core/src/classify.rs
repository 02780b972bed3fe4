// File: crates/mic-core/src/classify.rs
// Summary: Validated MIC values and the configurable effectiveness classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// A MIC value known to be finite and strictly positive (safe to log10).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Mic(f64);

impl Mic {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 { Ok(Self(value)) } else { Err(ChartError::InvalidMic(value)) }
    }
    #[inline]
    pub fn get(self) -> f64 { self.0 }
    #[inline]
    pub fn log10(self) -> f64 { self.0.log10() }
}

/// Ordered from most to least effective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectivenessCategory {
    #[serde(rename = "Strongly Effective")]
    StronglyEffective,
    #[serde(rename = "Merely Effective")]
    MerelyEffective,
    #[serde(rename = "Ineffective")]
    Ineffective,
}

impl EffectivenessCategory {
    pub const ALL: [EffectivenessCategory; 3] = [
        EffectivenessCategory::StronglyEffective,
        EffectivenessCategory::MerelyEffective,
        EffectivenessCategory::Ineffective,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EffectivenessCategory::StronglyEffective => "Strongly Effective",
            EffectivenessCategory::MerelyEffective => "Merely Effective",
            EffectivenessCategory::Ineffective => "Ineffective",
        }
    }
}

impl fmt::Display for EffectivenessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// Units the threshold bounds are written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdDomain {
    /// Bounds in mg/ml.
    #[default]
    Raw,
    /// Bounds in log10(mg/ml).
    Log10,
}

/// Effectiveness bands: `mic <= strong` is strongly effective,
/// `strong < mic <= merely` merely effective, anything above ineffective.
/// `floor`/`ceiling` only bound the drawn zone bands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Thresholds {
    pub strong: f64,
    pub merely: f64,
    #[serde(default)]
    pub domain: ThresholdDomain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<f64>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { strong: 1.0, merely: 10.0, domain: ThresholdDomain::Raw, floor: None, ceiling: None }
    }
}

impl Thresholds {
    pub fn raw(strong: f64, merely: f64) -> Self {
        Self { strong, merely, ..Self::default() }
    }

    pub fn log10(strong: f64, merely: f64) -> Self {
        Self { strong, merely, domain: ThresholdDomain::Log10, ..Self::default() }
    }

    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let all = [Some(self.strong), Some(self.merely), self.floor, self.ceiling];
        if all.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ChartError::InvalidThresholds("bounds must be finite".into()));
        }
        if self.strong >= self.merely {
            return Err(ChartError::InvalidThresholds(format!(
                "strong bound {} must be below merely bound {}",
                self.strong, self.merely
            )));
        }
        if self.domain == ThresholdDomain::Raw {
            if let Some(bad) = all.iter().flatten().find(|v| **v <= 0.0) {
                return Err(ChartError::InvalidThresholds(format!("raw bound {bad} must be positive")));
            }
        }
        if matches!(self.floor, Some(f) if f >= self.strong) {
            return Err(ChartError::InvalidThresholds("floor must be below the strong bound".into()));
        }
        if matches!(self.ceiling, Some(c) if c <= self.merely) {
            return Err(ChartError::InvalidThresholds("ceiling must be above the merely bound".into()));
        }
        Ok(())
    }

    /// Convert a bound from the configured domain to mg/ml.
    #[inline]
    pub fn to_mic(&self, bound: f64) -> f64 {
        match self.domain {
            ThresholdDomain::Raw => bound,
            ThresholdDomain::Log10 => 10f64.powf(bound),
        }
    }

    #[inline]
    fn measure(&self, mic: Mic) -> f64 {
        match self.domain {
            ThresholdDomain::Raw => mic.get(),
            ThresholdDomain::Log10 => mic.log10(),
        }
    }
}

/// Pure and monotonic: a smaller MIC never lands in a less effective band.
pub fn classify(mic: Mic, thresholds: &Thresholds) -> EffectivenessCategory {
    let m = thresholds.measure(mic);
    if m <= thresholds.strong {
        EffectivenessCategory::StronglyEffective
    } else if m <= thresholds.merely {
        EffectivenessCategory::MerelyEffective
    } else {
        EffectivenessCategory::Ineffective
    }
}
