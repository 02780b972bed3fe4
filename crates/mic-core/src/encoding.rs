// File: crates/mic-core/src/encoding.rs
// Summary: Species sort order, color encodings and their categorical palettes.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::classify::EffectivenessCategory;
use crate::dataset::{Antibiotic, GramStain};
use crate::transform::DerivedRow;
use crate::types::Rgb;

/// What orders the species axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Species name.
    #[default]
    Species,
    /// MIC of one antibiotic. Species without that antibiotic sort last.
    Mic(Antibiotic),
    /// Sum of MIC over all antibiotics of the species.
    TotalMic,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Field mapped to bar color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBy {
    #[default]
    Antibiotic,
    Category,
    Gram,
}

impl ColorBy {
    /// Column name in the long-form rows.
    pub fn field(&self) -> &'static str {
        match self {
            ColorBy::Antibiotic => "Antibiotic",
            ColorBy::Category => "Category",
            ColorBy::Gram => "Gram",
        }
    }
}

/// Species in display order. Ties (and equal keys) fall back to the species
/// name, so the order never depends on input order.
pub fn species_order(rows: &[DerivedRow], key: SortKey, direction: SortDirection) -> Vec<String> {
    let mut species: Vec<(&str, Option<f64>)> = Vec::new();
    for r in rows {
        if species.iter().any(|(s, _)| *s == r.row.species) {
            continue;
        }
        let of_species = || rows.iter().filter(|o| o.row.species == r.row.species);
        let value = match key {
            SortKey::Species => None,
            SortKey::Mic(a) => of_species().find(|o| o.row.antibiotic == a).map(|o| o.row.mic),
            SortKey::TotalMic => Some(of_species().map(|o| o.row.mic).sum()),
        };
        species.push((r.row.species.as_str(), value));
    }

    species.sort_by(|(sa, va), (sb, vb)| {
        let by_value = match (va, vb) {
            (Some(a), Some(b)) => match direction {
                SortDirection::Ascending => a.total_cmp(b),
                SortDirection::Descending => b.total_cmp(a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        let by_name = match (key, direction) {
            (SortKey::Species, SortDirection::Descending) => sb.cmp(sa),
            _ => sa.cmp(sb),
        };
        by_value.then(by_name)
    });
    species.into_iter().map(|(s, _)| s.to_string()).collect()
}

/// Ordered domain and matching colors for a color encoding.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorScale {
    pub field: ColorBy,
    pub domain: Vec<String>,
    pub range: Vec<Rgb>,
}

impl ColorScale {
    pub fn new(field: ColorBy, antibiotics: &[Antibiotic]) -> Self {
        let (domain, range) = match field {
            ColorBy::Antibiotic => (
                antibiotics.iter().map(|a| a.name().to_string()).collect(),
                antibiotics.iter().map(|a| antibiotic_color(*a)).collect(),
            ),
            ColorBy::Category => (
                EffectivenessCategory::ALL.iter().map(|c| c.label().to_string()).collect(),
                EffectivenessCategory::ALL.iter().map(|c| category_color(*c)).collect(),
            ),
            ColorBy::Gram => (
                [GramStain::Positive, GramStain::Negative].iter().map(|g| g.name().to_string()).collect(),
                vec![gram_color(Some(GramStain::Positive)), gram_color(Some(GramStain::Negative))],
            ),
        };
        Self { field, domain, range }
    }

    /// Domain value of a row under this encoding.
    pub fn key_of(&self, row: &DerivedRow) -> String {
        match self.field {
            ColorBy::Antibiotic => row.row.antibiotic.name().to_string(),
            ColorBy::Category => row.category.map(|c| c.label()).unwrap_or("Unclassified").to_string(),
            ColorBy::Gram => row.row.gram.map(|g| g.name()).unwrap_or("unknown").to_string(),
        }
    }

    pub fn color_of(&self, row: &DerivedRow) -> Rgb {
        let key = self.key_of(row);
        self.domain
            .iter()
            .position(|d| *d == key)
            .map(|i| self.range[i])
            .unwrap_or(UNKNOWN)
    }
}

const UNKNOWN: Rgb = Rgb(150, 150, 150);

pub fn antibiotic_color(a: Antibiotic) -> Rgb {
    match a {
        Antibiotic::Penicillin => Rgb(31, 119, 180),
        Antibiotic::Streptomycin => Rgb(255, 127, 14),
        Antibiotic::Neomycin => Rgb(44, 160, 44),
    }
}

pub fn category_color(c: EffectivenessCategory) -> Rgb {
    match c {
        EffectivenessCategory::StronglyEffective => Rgb(26, 152, 80),
        EffectivenessCategory::MerelyEffective => Rgb(254, 196, 79),
        EffectivenessCategory::Ineffective => Rgb(215, 48, 39),
    }
}

pub fn gram_color(g: Option<GramStain>) -> Rgb {
    match g {
        Some(GramStain::Positive) => Rgb(117, 107, 177),
        Some(GramStain::Negative) => Rgb(231, 41, 138),
        None => UNKNOWN,
    }
}
