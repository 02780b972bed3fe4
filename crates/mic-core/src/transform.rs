// File: crates/mic-core/src/transform.rs
// Summary: Positivity screening, log10 column and effectiveness category for long-form rows.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::classify::{classify, EffectivenessCategory, Mic, Thresholds};
use crate::error::{ChartError, Result};
use crate::reshape::LongRow;

/// What to do with MIC <= 0 when a log encoding or a category is requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonPositivePolicy {
    /// Fail with `ChartError::NonPositiveMic` on the first offending row.
    #[default]
    Reject,
    /// Drop offending rows and log a warning for each.
    Filter,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DerivedRow {
    #[serde(flatten)]
    pub row: LongRow,
    #[serde(rename = "Category", skip_serializing_if = "Option::is_none")]
    pub category: Option<EffectivenessCategory>,
    #[serde(rename = "log_MIC", skip_serializing_if = "Option::is_none")]
    pub log_mic: Option<f64>,
}

impl DerivedRow {
    pub fn plain(row: LongRow) -> Self {
        Self { row, category: None, log_mic: None }
    }
}

fn checked(row: &LongRow) -> Result<Mic> {
    Mic::new(row.mic).map_err(|_| ChartError::NonPositiveMic {
        species: row.species.clone(),
        antibiotic: row.antibiotic,
        value: row.mic,
    })
}

/// Apply `policy` to rows whose MIC cannot be log-transformed.
pub fn screen(rows: Vec<LongRow>, policy: NonPositivePolicy) -> Result<Vec<LongRow>> {
    match policy {
        NonPositivePolicy::Reject => {
            for r in &rows {
                checked(r)?;
            }
            Ok(rows)
        }
        NonPositivePolicy::Filter => Ok(rows
            .into_iter()
            .filter(|r| {
                let ok = checked(r).is_ok();
                if !ok {
                    warn!("dropping {} / {}: MIC {} is not positive", r.species, r.antibiotic, r.mic);
                }
                ok
            })
            .collect()),
    }
}

/// log10 of every MIC; any non-positive value is an error.
pub fn log_transform(rows: &[LongRow]) -> Result<Vec<f64>> {
    rows.iter().map(|r| checked(r).map(Mic::log10)).collect()
}

/// Attach optional category and log10 columns. Rows must already be screened
/// when either column is requested; an unscreened non-positive MIC is an error.
pub fn derive(rows: Vec<LongRow>, thresholds: Option<&Thresholds>, log: bool) -> Result<Vec<DerivedRow>> {
    if thresholds.is_none() && !log {
        return Ok(rows.into_iter().map(DerivedRow::plain).collect());
    }
    rows.into_iter()
        .map(|row| {
            let mic = checked(&row)?;
            Ok(DerivedRow {
                category: thresholds.map(|t| classify(mic, t)),
                log_mic: log.then(|| mic.log10()),
                row,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Antibiotic;

    fn row(species: &str, mic: f64) -> LongRow {
        LongRow { species: species.into(), antibiotic: Antibiotic::Penicillin, mic, gram: None }
    }

    #[test]
    fn filter_policy_drops_non_positive() {
        let rows = vec![row("a", 1.0), row("b", 0.0), row("c", -2.0), row("d", 5.0)];
        let kept = screen(rows, NonPositivePolicy::Filter).unwrap();
        assert_eq!(kept.iter().map(|r| r.species.as_str()).collect::<Vec<_>>(), ["a", "d"]);
    }

    #[test]
    fn reject_policy_names_the_row() {
        let err = screen(vec![row("a", 1.0), row("b", 0.0)], NonPositivePolicy::Reject).unwrap_err();
        match err {
            ChartError::NonPositiveMic { species, value, .. } => {
                assert_eq!(species, "b");
                assert_eq!(value, 0.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn derive_adds_requested_columns_only() {
        let t = Thresholds::default();
        let out = derive(vec![row("a", 100.0)], Some(&t), false).unwrap();
        assert_eq!(out[0].category, Some(EffectivenessCategory::Ineffective));
        assert_eq!(out[0].log_mic, None);

        let out = derive(vec![row("a", 100.0)], None, true).unwrap();
        assert_eq!(out[0].category, None);
        assert!((out[0].log_mic.unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn plain_derive_passes_zero_through() {
        let out = derive(vec![row("a", 0.0)], None, false).unwrap();
        assert_eq!(out[0].row.mic, 0.0);
    }
}
