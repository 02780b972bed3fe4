// File: crates/mic-core/tests/reshape_roundtrip.rs
// Purpose: Melt/pivot laws on the built-in table and on subsets of it.

use mic_core::{melt, pivot, Antibiotic, Dataset, GramStain, MeasurementRecord};
use rstest::rstest;

fn single_row() -> Dataset {
    Dataset::new(
        vec![Antibiotic::Streptomycin],
        vec![MeasurementRecord::new("Escherichia coli", vec![0.4], Some(GramStain::Negative))],
    )
    .unwrap()
}

#[rstest]
#[case::burtin(Dataset::burtin())]
#[case::gram_negative(Dataset::burtin().filter_gram(GramStain::Negative))]
#[case::two_columns(Dataset::burtin().select_antibiotics(&[Antibiotic::Neomycin, Antibiotic::Penicillin]).unwrap())]
#[case::single_row(single_row())]
fn melt_then_pivot_recovers_table(#[case] table: Dataset) {
    let long = melt(&table);
    assert_eq!(long.len(), table.len() * table.antibiotics().len());
    assert_eq!(pivot(&long).unwrap(), table);
}

#[test]
fn melt_keeps_values_and_stain() {
    let table = Dataset::burtin();
    for row in melt(&table) {
        assert_eq!(table.mic(&row.species, row.antibiotic), Some(row.mic));
        let rec = table.records().iter().find(|r| r.species == row.species).unwrap();
        assert_eq!(rec.gram, row.gram);
    }
}

#[test]
fn empty_table_melts_to_nothing() {
    let empty = Dataset::empty(Antibiotic::ALL.to_vec());
    assert!(melt(&empty).is_empty());
    assert!(pivot(&[]).unwrap().is_empty());
}
