// File: crates/mic-core/src/reshape.rs
// Summary: Wide <-> long reshaping (melt / pivot) of MIC tables.

use serde::Serialize;

use crate::dataset::{Antibiotic, Dataset, GramStain, MeasurementRecord};
use crate::error::{ChartError, Result};

/// One (species, antibiotic) observation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LongRow {
    #[serde(rename = "Bacteria")]
    pub species: String,
    #[serde(rename = "Antibiotic")]
    pub antibiotic: Antibiotic,
    #[serde(rename = "MIC")]
    pub mic: f64,
    #[serde(rename = "Gram", skip_serializing_if = "Option::is_none")]
    pub gram: Option<GramStain>,
}

/// Melt a wide table: N rows x K antibiotic columns become N*K long rows,
/// grouped by species in table order, antibiotics in column order.
pub fn melt(table: &Dataset) -> Vec<LongRow> {
    let mut out = Vec::with_capacity(table.len() * table.antibiotics().len());
    for r in table.records() {
        for (a, &mic) in table.antibiotics().iter().zip(&r.mics) {
            out.push(LongRow { species: r.species.clone(), antibiotic: *a, mic, gram: r.gram });
        }
    }
    out
}

/// Fold long rows back into a wide table.
///
/// Species keep first-appearance order; antibiotic columns keep
/// first-appearance order. Every species must carry every antibiotic exactly
/// once, and its gram stain must agree across rows.
pub fn pivot(rows: &[LongRow]) -> Result<Dataset> {
    let mut antibiotics: Vec<Antibiotic> = Vec::new();
    for r in rows {
        if !antibiotics.contains(&r.antibiotic) {
            antibiotics.push(r.antibiotic);
        }
    }

    let mut species: Vec<(String, Option<GramStain>, Vec<Option<f64>>)> = Vec::new();
    for r in rows {
        let col = antibiotics.iter().position(|a| *a == r.antibiotic).unwrap_or_default();
        let idx = match species.iter().position(|(s, _, _)| *s == r.species) {
            Some(i) => i,
            None => {
                species.push((r.species.clone(), r.gram, vec![None; antibiotics.len()]));
                species.len() - 1
            }
        };
        let entry = &mut species[idx];
        if entry.1 != r.gram {
            return Err(ChartError::Pivot(format!("conflicting gram stain for '{}'", r.species)));
        }
        if entry.2[col].replace(r.mic).is_some() {
            return Err(ChartError::Pivot(format!("'{}' has {} twice", r.species, r.antibiotic)));
        }
    }

    let records = species
        .into_iter()
        .map(|(name, gram, cells)| {
            let mics = cells
                .iter()
                .zip(&antibiotics)
                .map(|(c, a)| c.ok_or_else(|| ChartError::Pivot(format!("'{name}' has no {a} value"))))
                .collect::<Result<Vec<_>>>()?;
            Ok(MeasurementRecord { species: name, mics, gram })
        })
        .collect::<Result<Vec<_>>>()?;

    Dataset::new(antibiotics, records)
}
