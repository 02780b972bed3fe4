// File: crates/mic-core/tests/classify.rs
// Purpose: Effectiveness classifier examples, monotonicity and threshold policies.

use mic_core::{classify, Antibiotic, Dataset, EffectivenessCategory, Mic, Thresholds};
use rstest::rstest;

use EffectivenessCategory::{Ineffective, MerelyEffective, StronglyEffective};

#[rstest]
#[case("Escherichia coli", 100.0, Ineffective)]
#[case("Staphylococcus aureus", 0.03, StronglyEffective)]
#[case("Brucella abortus", 1.0, StronglyEffective)]
#[case("Proteus vulgaris", 3.0, MerelyEffective)]
#[case("Salmonella schottmuelleri", 10.0, MerelyEffective)]
fn penicillin_examples(#[case] species: &str, #[case] mic: f64, #[case] want: EffectivenessCategory) {
    let table = Dataset::burtin();
    assert_eq!(table.mic(species, Antibiotic::Penicillin), Some(mic));
    assert_eq!(classify(Mic::new(mic).unwrap(), &Thresholds::default()), want);
}

#[rstest]
#[case::raw(Thresholds::raw(1.0, 10.0))]
#[case::raw_with_ceiling(Thresholds::raw(1.0, 10.0).with_ceiling(900.0))]
#[case::log(Thresholds::log10(-1.0, 2.0))]
#[case::log_decade(Thresholds::log10(0.0, 1.0))]
fn classify_is_monotonic(#[case] t: Thresholds) {
    let mut values = Vec::new();
    let mut v = 1e-4;
    while v < 1e4 {
        values.push(v);
        v *= 1.37;
    }
    let cats = values.iter().map(|&v| classify(Mic::new(v).unwrap(), &t)).collect::<Vec<_>>();
    assert!(cats.windows(2).all(|w| w[0] <= w[1]), "categories must not get more effective as MIC grows");
    assert_eq!(cats.first(), Some(&StronglyEffective));
    assert_eq!(cats.last(), Some(&Ineffective));
}

#[test]
fn classify_is_pure() {
    let t = Thresholds::default();
    let m = Mic::new(5.0).unwrap();
    let first = classify(m, &t);
    for _ in 0..10 {
        assert_eq!(classify(m, &t), first);
    }
}

#[test]
fn category_labels_serialize_as_words() {
    let json = serde_json::to_string(&EffectivenessCategory::ALL).unwrap();
    assert_eq!(json, r#"["Strongly Effective","Merely Effective","Ineffective"]"#);
}
