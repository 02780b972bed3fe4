// File: crates/mic-core/src/annotation.rs
// Summary: Text annotations pinned to (species, antibiotic) pairs; resolution and extremes helper.

use serde::{Deserialize, Serialize};

use crate::classify::Mic;
use crate::dataset::{Antibiotic, Dataset};
use crate::error::{ChartError, Result};
use crate::transform::DerivedRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Annotation {
    #[serde(alias = "Bacteria")]
    pub species: String,
    #[serde(alias = "Antibiotic")]
    pub antibiotic: Antibiotic,
    pub label: String,
}

impl Annotation {
    pub fn new(species: impl Into<String>, antibiotic: Antibiotic, label: impl Into<String>) -> Self {
        Self { species: species.into(), antibiotic, label: label.into() }
    }
}

/// An annotation with the MIC it is drawn at.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedAnnotation {
    #[serde(rename = "Bacteria")]
    pub species: String,
    #[serde(rename = "Antibiotic")]
    pub antibiotic: Antibiotic,
    #[serde(rename = "MIC")]
    pub mic: f64,
    pub label: String,
}

/// Pin every annotation to its row. A pair missing from `rows` is an error;
/// blank labels are never produced.
pub fn resolve(annotations: &[Annotation], rows: &[DerivedRow]) -> Result<Vec<ResolvedAnnotation>> {
    annotations
        .iter()
        .map(|a| {
            rows.iter()
                .find(|r| r.row.species == a.species && r.row.antibiotic == a.antibiotic)
                .map(|r| ResolvedAnnotation {
                    species: a.species.clone(),
                    antibiotic: a.antibiotic,
                    mic: r.row.mic,
                    label: a.label.clone(),
                })
                .ok_or_else(|| ChartError::DanglingAnnotation {
                    species: a.species.clone(),
                    antibiotic: a.antibiotic,
                    label: a.label.clone(),
                })
        })
        .collect()
}

/// "Highly sensitive" at the lowest MIC and "Highly resistant" at the highest
/// MIC for `antibiotic`. Ties go to the earlier row. Values that cannot be
/// charted on a log axis (zero, negative) are never picked.
pub fn extremes(table: &Dataset, antibiotic: Antibiotic) -> Vec<Annotation> {
    let Some(col) = table.antibiotics().iter().position(|a| *a == antibiotic) else {
        return Vec::new();
    };
    let mut lo: Option<(&str, f64)> = None;
    let mut hi: Option<(&str, f64)> = None;
    for r in table.records() {
        let v = r.mics[col];
        if Mic::new(v).is_err() {
            continue;
        }
        if lo.map_or(true, |(_, m)| v < m) { lo = Some((&r.species, v)); }
        if hi.map_or(true, |(_, m)| v > m) { hi = Some((&r.species, v)); }
    }
    let mut out = Vec::new();
    if let Some((s, _)) = lo {
        out.push(Annotation::new(s, antibiotic, "Highly sensitive"));
    }
    if let (Some((s, _)), Some((l, _))) = (hi, lo) {
        if s != l {
            out.push(Annotation::new(s, antibiotic, "Highly resistant"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MeasurementRecord;
    use crate::reshape::melt;

    fn rows() -> Vec<DerivedRow> {
        melt(&Dataset::burtin()).into_iter().map(DerivedRow::plain).collect()
    }

    #[test]
    fn resolves_mic() {
        let a = [Annotation::new("Aerobacter aerogenes", Antibiotic::Penicillin, "Highly resistant")];
        let r = resolve(&a, &rows()).unwrap();
        assert_eq!(r[0].mic, 870.0);
        assert_eq!(r[0].label, "Highly resistant");
    }

    #[test]
    fn extremes_pick_first_on_ties() {
        let ex = extremes(&Dataset::burtin(), Antibiotic::Penicillin);
        assert_eq!(ex.len(), 2);
        // Bacillus anthracis and Streptococcus hemolyticus both sit at 0.001.
        assert_eq!(ex[0].species, "Bacillus anthracis");
        assert_eq!(ex[1].species, "Aerobacter aerogenes");
    }

    #[test]
    fn extremes_skip_non_positive_mics() {
        let table = Dataset::new(
            vec![Antibiotic::Penicillin],
            vec![
                MeasurementRecord::new("A", vec![0.0], None),
                MeasurementRecord::new("B", vec![0.5], None),
                MeasurementRecord::new("C", vec![9.0], None),
            ],
        )
        .unwrap();
        let ex = extremes(&table, Antibiotic::Penicillin);
        assert_eq!(ex[0].species, "B");
        assert_eq!(ex[1].species, "C");
    }

    #[test]
    fn extremes_of_empty_table() {
        assert!(extremes(&Dataset::empty(Antibiotic::ALL.to_vec()), Antibiotic::Neomycin).is_empty());
    }
}
