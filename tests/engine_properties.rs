//! Property-based tests for the classifier and corrector
//!
//! These tests verify invariants that should hold for all inputs:
//! - Scores stay within [0, 1] and follow the saturation formula
//! - Both operations are total and deterministic
//! - A guard phrase anywhere disables correction
//! - Correcting already corrected text changes nothing

use biasguard::{classify, correct, RuleSet, NO_BIAS_LABEL};
use proptest::prelude::*;

/// Words that exercise rules, triggers and neutral filler
const VOCABULARY: &[&str] = &[
    "he", "She", "HIM", "her", "hers", "his", "man", "Woman", "girl", "BOY", "chairman",
    "businessman", "housewife", "white", "Black", "asian", "south-asian", "African",
    "african-american", "indian", "caucasian", "latino", "arab", "christian", "Muslim", "hindu",
    "jew", "buddhist", "sikh", "the", "a", "person", "rich", "engineer", "cuisine", "festival",
    "holiday", "walked", "home", ",", ".", "human", "chairperson",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..24).prop_map(|words| words.join(" "))
}

fn guard_phrase() -> impl Strategy<Value = String> {
    let phrases: Vec<String> = RuleSet::builtin().guards().phrases().to_vec();
    (prop::sample::select(phrases), any::<bool>())
        .prop_map(|(phrase, upper)| if upper { phrase.to_uppercase() } else { phrase })
}

proptest! {
    #[test]
    fn prop_score_is_bounded(text in ".*") {
        let result = classify(&text);
        prop_assert!((0.0..=1.0).contains(&result.score));
    }

    #[test]
    fn prop_score_follows_saturation(text in sentence()) {
        let result = classify(&text);
        let expected = (result.hits as f64 / 10.0).min(1.0);
        prop_assert!((result.score - expected).abs() < 1e-12);
    }

    #[test]
    fn prop_none_iff_no_hits(text in sentence()) {
        let result = classify(&text);
        prop_assert!(!result.categories.is_empty());
        prop_assert_eq!(result.hits == 0, result.categories == vec![NO_BIAS_LABEL.to_string()]);
    }

    #[test]
    fn prop_operations_are_deterministic(text in ".*") {
        prop_assert_eq!(classify(&text), classify(&text));
        prop_assert_eq!(correct(&text), correct(&text));
    }

    #[test]
    fn prop_guard_suppresses_correction(
        before in sentence(),
        guard in guard_phrase(),
        after in sentence(),
    ) {
        let text = format!("{before} {guard} {after}");
        let result = correct(&text);
        prop_assert_eq!(&result.text, &text);
        prop_assert!(result.substitutions.is_empty());
    }

    #[test]
    fn prop_correction_is_idempotent(text in sentence()) {
        let first = correct(&text);
        let second = correct(&first.text);
        prop_assert_eq!(&second.text, &first.text);
        prop_assert!(second.substitutions.is_empty());
    }

    #[test]
    fn prop_substitutions_never_echo_the_original(text in sentence()) {
        for s in correct(&text).substitutions {
            prop_assert_ne!(s.original.to_lowercase(), s.replacement.to_lowercase());
        }
    }
}
