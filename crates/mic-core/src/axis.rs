// File: crates/mic-core/src/axis.rs
// Summary: Value axis model (label, domain, linear/log10 kind) with data-driven domains.

use serde::{Deserialize, Serialize};

use crate::grid::{decades, linspace};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    Linear,
    Log10,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
}

impl Axis {
    /// Domain covering every value in `values`.
    ///
    /// Log10 snaps outward to whole decades and ignores non-positive values;
    /// linear starts at zero with 5% headroom. No usable values gives a unit
    /// domain (`[1, 10]` for log10, `[0, 1]` for linear).
    pub fn fit(label: impl Into<String>, kind: ScaleKind, values: impl IntoIterator<Item = f64>) -> Self {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in values {
            if !v.is_finite() || (kind == ScaleKind::Log10 && v <= 0.0) { continue; }
            lo = lo.min(v);
            hi = hi.max(v);
        }
        let (min, max) = match kind {
            ScaleKind::Log10 => {
                if !lo.is_finite() {
                    (1.0, 10.0)
                } else {
                    let a = lo.log10().floor() as i32;
                    let mut b = hi.log10().ceil() as i32;
                    if b <= a { b = a + 1; }
                    (10f64.powi(a), 10f64.powi(b))
                }
            }
            ScaleKind::Linear => {
                if !lo.is_finite() {
                    (0.0, 1.0)
                } else {
                    (lo.min(0.0), if hi > 0.0 { hi * 1.05 } else { 1.0 })
                }
            }
        };
        Self { label: label.into(), min, max, kind }
    }

    pub fn ticks(&self) -> Vec<f64> {
        match self.kind {
            ScaleKind::Log10 => decades(self.min.log10().round() as i32, self.max.log10().round() as i32),
            ScaleKind::Linear => linspace(self.min, self.max, 6),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_domain_snaps_to_decades() {
        let a = Axis::fit("MIC", ScaleKind::Log10, [0.001, 1.0, 870.0]);
        assert!((a.min - 0.001).abs() < 1e-12 && (a.max - 1000.0).abs() < 1e-9);
        assert_eq!(a.ticks().len(), 7);
    }

    #[test]
    fn single_decade_value_gets_nonzero_span() {
        let a = Axis::fit("MIC", ScaleKind::Log10, [1.0]);
        assert_eq!((a.min, a.max), (1.0, 10.0));
    }

    #[test]
    fn empty_domains() {
        let a = Axis::fit("MIC", ScaleKind::Log10, std::iter::empty());
        assert_eq!((a.min, a.max), (1.0, 10.0));
        let b = Axis::fit("MIC", ScaleKind::Linear, std::iter::empty());
        assert_eq!((b.min, b.max), (0.0, 1.0));
    }

    #[test]
    fn linear_domain_has_headroom() {
        let a = Axis::fit("MIC", ScaleKind::Linear, [2.0, 100.0]);
        assert_eq!(a.min, 0.0);
        assert!((a.max - 105.0).abs() < 1e-9);
    }
}
