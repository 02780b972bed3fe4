// File: crates/mic-core/src/dataset.rs
// Summary: Wide-form MIC table (one column per antibiotic), built-in Burtin data, CSV/JSON loading.
// Notes:
// - The table is immutable once constructed; filters return new tables.
// - MIC values only need to be finite here. Positivity is enforced where a log
//   encoding or a classification asks for it (see `transform::derive`).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Antibiotic {
    Penicillin,
    Streptomycin,
    Neomycin,
}

impl Antibiotic {
    pub const ALL: [Antibiotic; 3] = [Antibiotic::Penicillin, Antibiotic::Streptomycin, Antibiotic::Neomycin];

    pub fn name(&self) -> &'static str {
        match self {
            Antibiotic::Penicillin => "Penicillin",
            Antibiotic::Streptomycin => "Streptomycin",
            Antibiotic::Neomycin => "Neomycin",
        }
    }
}

impl fmt::Display for Antibiotic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Antibiotic {
    type Err = ChartError;
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Antibiotic::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ChartError::UnknownAntibiotic(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GramStain {
    Positive,
    Negative,
}

impl GramStain {
    pub fn name(&self) -> &'static str {
        match self {
            GramStain::Positive => "positive",
            GramStain::Negative => "negative",
        }
    }
}

impl fmt::Display for GramStain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for GramStain {
    type Err = ChartError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "+" => Ok(GramStain::Positive),
            "negative" | "-" => Ok(GramStain::Negative),
            other => Err(ChartError::UnknownGramStain(other.to_string())),
        }
    }
}

/// One wide-form row. `mics[i]` belongs to the table's `antibiotics()[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementRecord {
    pub species: String,
    pub mics: Vec<f64>,
    pub gram: Option<GramStain>,
}

impl MeasurementRecord {
    pub fn new(species: impl Into<String>, mics: Vec<f64>, gram: Option<GramStain>) -> Self {
        Self { species: species.into(), mics, gram }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    antibiotics: Vec<Antibiotic>,
    records: Vec<MeasurementRecord>,
}

impl Dataset {
    /// Build a table, enforcing unique columns, unique species, row width and finite values.
    pub fn new(antibiotics: Vec<Antibiotic>, records: Vec<MeasurementRecord>) -> Result<Self> {
        for (i, a) in antibiotics.iter().enumerate() {
            if antibiotics[..i].contains(a) {
                return Err(ChartError::InvalidConfig(format!("antibiotic column '{a}' listed twice")));
            }
        }
        for (i, r) in records.iter().enumerate() {
            if r.mics.len() != antibiotics.len() {
                return Err(ChartError::RowWidth {
                    species: r.species.clone(),
                    expected: antibiotics.len(),
                    got: r.mics.len(),
                });
            }
            if records[..i].iter().any(|o| o.species == r.species) {
                return Err(ChartError::DuplicateSpecies(r.species.clone()));
            }
            if let Some(&bad) = r.mics.iter().find(|v| !v.is_finite()) {
                return Err(ChartError::InvalidMic(bad));
            }
        }
        Ok(Self { antibiotics, records })
    }

    pub fn empty(antibiotics: Vec<Antibiotic>) -> Self {
        Self { antibiotics, records: Vec::new() }
    }

    pub fn antibiotics(&self) -> &[Antibiotic] { &self.antibiotics }
    pub fn records(&self) -> &[MeasurementRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn mic(&self, species: &str, antibiotic: Antibiotic) -> Option<f64> {
        let col = self.antibiotics.iter().position(|a| *a == antibiotic)?;
        self.records.iter().find(|r| r.species == species).map(|r| r.mics[col])
    }

    /// Keep only rows with the given stain. Rows without a stain are dropped.
    pub fn filter_gram(&self, gram: GramStain) -> Self {
        let records = self.records.iter().filter(|r| r.gram == Some(gram)).cloned().collect();
        Self { antibiotics: self.antibiotics.clone(), records }
    }

    /// Project onto a subset of antibiotic columns, in the order given.
    pub fn select_antibiotics(&self, wanted: &[Antibiotic]) -> Result<Self> {
        let cols = wanted
            .iter()
            .map(|a| {
                self.antibiotics
                    .iter()
                    .position(|have| have == a)
                    .ok_or_else(|| ChartError::MissingColumn(a.name().to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        let records = self
            .records
            .iter()
            .map(|r| MeasurementRecord {
                species: r.species.clone(),
                mics: cols.iter().map(|&c| r.mics[c]).collect(),
                gram: r.gram,
            })
            .collect();
        Dataset::new(wanted.to_vec(), records)
    }

    /// The 16-species table from Burtin's antibiotic study.
    pub fn burtin() -> Self {
        use GramStain::{Negative as N, Positive as P};
        let rows: [(&str, f64, f64, f64, GramStain); 16] = [
            ("Aerobacter aerogenes", 870.0, 1.0, 1.6, N),
            ("Bacillus anthracis", 0.001, 0.01, 0.007, P),
            ("Brucella abortus", 1.0, 2.0, 0.02, N),
            ("Diplococcus pneumoniae", 0.005, 11.0, 10.0, P),
            ("Escherichia coli", 100.0, 0.4, 0.1, N),
            ("Klebsiella pneumoniae", 850.0, 1.2, 1.0, N),
            ("Mycobacterium tuberculosis", 800.0, 5.0, 2.0, N),
            ("Proteus vulgaris", 3.0, 0.1, 0.1, N),
            ("Pseudomonas aeruginosa", 850.0, 2.0, 0.4, N),
            ("Salmonella typhosa", 1.0, 0.4, 0.008, N),
            ("Salmonella schottmuelleri", 10.0, 0.8, 0.09, N),
            ("Staphylococcus albus", 0.007, 0.1, 0.001, P),
            ("Staphylococcus aureus", 0.03, 0.03, 0.001, P),
            ("Streptococcus fecalis", 1.0, 1.0, 0.1, P),
            ("Streptococcus hemolyticus", 0.001, 14.0, 10.0, P),
            ("Streptococcus viridans", 0.005, 10.0, 40.0, P),
        ];
        let records = rows
            .iter()
            .map(|&(s, p, st, n, g)| MeasurementRecord::new(s, vec![p, st, n], Some(g)))
            .collect();
        Self { antibiotics: Antibiotic::ALL.to_vec(), records }
    }

    /// Load from `.csv` or `.json`, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
        match ext.as_str() {
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Self::from_csv_reader(std::fs::File::open(path)?),
        }
    }

    /// CSV with a `Bacteria` (or `Species`) column, one column per antibiotic,
    /// and an optional `Gram` column. Antibiotic column order is kept.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
        let headers = rdr.headers()?.iter().map(|h| h.to_string()).collect::<Vec<_>>();

        let idx = |names: &[&str]| -> Option<usize> {
            headers.iter().position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };
        let i_species = idx(&["bacteria", "species"]).ok_or_else(|| ChartError::MissingColumn("Bacteria".into()))?;
        let i_gram = idx(&["gram", "gram_stain"]);

        let mut columns = Vec::new();
        for (i, h) in headers.iter().enumerate() {
            if i == i_species || Some(i) == i_gram {
                continue;
            }
            columns.push((i, h.parse::<Antibiotic>()?));
        }

        let mut records = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            let species = rec.get(i_species).unwrap_or_default().to_string();
            let mut mics = Vec::with_capacity(columns.len());
            for &(i, a) in &columns {
                let raw = rec.get(i).unwrap_or_default();
                let v = raw
                    .parse::<f64>()
                    .map_err(|_| ChartError::InvalidConfig(format!("{species} / {a}: '{raw}' is not a number")))?;
                mics.push(v);
            }
            let gram = match i_gram.and_then(|i| rec.get(i)) {
                Some(g) if !g.is_empty() => Some(g.parse()?),
                _ => None,
            };
            records.push(MeasurementRecord { species, mics, gram });
        }
        Dataset::new(columns.into_iter().map(|(_, a)| a).collect(), records)
    }

    /// JSON array of `{"Bacteria": .., "Penicillin": .., .., "Gram": ..}` records.
    /// Every record must carry the same antibiotic keys; unknown keys are
    /// rejected. Columns follow `Antibiotic::ALL` order.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: Vec<RawRecord> = serde_json::from_str(s)?;
        let Some(first) = raw.first() else {
            return Ok(Dataset::empty(Antibiotic::ALL.to_vec()));
        };
        let antibiotics = first.present();
        let mut records = Vec::with_capacity(raw.len());
        for r in raw {
            let present = r.present();
            if let Some(a) = antibiotics.iter().find(|a| !present.contains(a)) {
                return Err(ChartError::MissingColumn(format!("{a} (row '{}')", r.species)));
            }
            if let Some(a) = present.iter().find(|a| !antibiotics.contains(a)) {
                return Err(ChartError::MissingColumn(format!("{a} (only from row '{}' on)", r.species)));
            }
            let mics = antibiotics.iter().filter_map(|&a| r.get(a)).collect();
            records.push(MeasurementRecord { species: r.species, mics, gram: r.gram });
        }
        Dataset::new(antibiotics, records)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let raw = self
            .records
            .iter()
            .map(|r| {
                let mut out = RawRecord { species: r.species.clone(), penicillin: None, streptomycin: None, neomycin: None, gram: r.gram };
                for (a, v) in self.antibiotics.iter().zip(&r.mics) {
                    *out.slot(*a) = Some(*v);
                }
                out
            })
            .collect::<Vec<_>>();
        Ok(serde_json::to_string_pretty(&raw)?)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecord {
    #[serde(rename = "Bacteria", alias = "Species")]
    species: String,
    #[serde(rename = "Penicillin", default, skip_serializing_if = "Option::is_none")]
    penicillin: Option<f64>,
    #[serde(rename = "Streptomycin", default, skip_serializing_if = "Option::is_none")]
    streptomycin: Option<f64>,
    #[serde(rename = "Neomycin", default, skip_serializing_if = "Option::is_none")]
    neomycin: Option<f64>,
    #[serde(rename = "Gram", default, skip_serializing_if = "Option::is_none")]
    gram: Option<GramStain>,
}

impl RawRecord {
    fn present(&self) -> Vec<Antibiotic> {
        Antibiotic::ALL.into_iter().filter(|a| self.get(*a).is_some()).collect()
    }

    fn get(&self, a: Antibiotic) -> Option<f64> {
        match a {
            Antibiotic::Penicillin => self.penicillin,
            Antibiotic::Streptomycin => self.streptomycin,
            Antibiotic::Neomycin => self.neomycin,
        }
    }

    fn slot(&mut self, a: Antibiotic) -> &mut Option<f64> {
        match a {
            Antibiotic::Penicillin => &mut self.penicillin,
            Antibiotic::Streptomycin => &mut self.streptomycin,
            Antibiotic::Neomycin => &mut self.neomycin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burtin_table_shape() {
        let d = Dataset::burtin();
        assert_eq!(d.len(), 16);
        assert_eq!(d.antibiotics(), &Antibiotic::ALL);
        assert_eq!(d.mic("Escherichia coli", Antibiotic::Penicillin), Some(100.0));
        assert_eq!(d.mic("Streptococcus viridans", Antibiotic::Neomycin), Some(40.0));
    }

    #[test]
    fn duplicate_species_rejected() {
        let rows = vec![
            MeasurementRecord::new("A", vec![1.0], None),
            MeasurementRecord::new("A", vec![2.0], None),
        ];
        let err = Dataset::new(vec![Antibiotic::Penicillin], rows).unwrap_err();
        assert!(matches!(err, ChartError::DuplicateSpecies(s) if s == "A"));
    }

    #[test]
    fn gram_filter_and_projection() {
        let d = Dataset::burtin().filter_gram(GramStain::Positive);
        assert_eq!(d.len(), 7);
        let p = d.select_antibiotics(&[Antibiotic::Neomycin, Antibiotic::Penicillin]).unwrap();
        assert_eq!(p.antibiotics(), &[Antibiotic::Neomycin, Antibiotic::Penicillin]);
        assert_eq!(p.records()[0].mics, vec![0.007, 0.001]);
    }

    #[test]
    fn csv_keeps_column_order() {
        let csv = "Bacteria,Neomycin,Penicillin,Gram\nX,0.5,2,negative\nY,1,0.1,\n";
        let d = Dataset::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(d.antibiotics(), &[Antibiotic::Neomycin, Antibiotic::Penicillin]);
        assert_eq!(d.records()[0].gram, Some(GramStain::Negative));
        assert_eq!(d.records()[1].gram, None);
    }

    #[test]
    fn csv_without_species_column_fails() {
        let err = Dataset::from_csv_reader("Penicillin\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn(_)));
    }

    #[test]
    fn json_round_trip() {
        let d = Dataset::burtin();
        let back = Dataset::from_json_str(&d.to_json_string().unwrap()).unwrap();
        assert_eq!(back, d);
    }
}
