use biasguard::*;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_end_to_end_correction_scenario() {
    let result = correct("The Chairman, a White businessman, hired a Muslim woman for the project.");

    assert_eq!(
        result.text,
        "The Chairperson, a Individual entrepreneur, hired a Religious person person for the project."
    );
    assert_eq!(
        result.substitutions,
        vec![
            Substitution::new("Chairman", "Chairperson"),
            Substitution::new("White", "Individual"),
            Substitution::new("businessman", "entrepreneur"),
            Substitution::new("Muslim", "Religious person"),
            Substitution::new("woman", "person"),
        ]
    );
    assert_eq!(result.guard, None);
}

#[test]
fn test_classification_scenario() {
    let result = classify("He is a rich engineer who visited a muslim temple.");

    assert_eq!(
        result.categories,
        vec![
            "gender_male",
            "occupation_tech",
            "ethnicity_middle_eastern",
            "socioeconomic_rich",
            "religion_muslim",
        ]
    );
    // "temple." is followed by punctuation and is not counted.
    assert_eq!(result.hits, 5);
    assert!((result.score - 0.5).abs() < 1e-9);

    let counts = BiasEngine::default().count("He is a rich engineer who visited a muslim temple.");
    let nonzero: Vec<&str> = counts.nonzero().map(|(label, _)| label).collect();
    assert_eq!(nonzero, result.categories);
    assert_eq!(counts.get("religion_hindu"), Some(0));
}

#[test]
fn test_empty_input() {
    let classification = classify("");
    assert_eq!(classification.score, 0.0);
    assert_eq!(classification.categories, vec![NO_BIAS_LABEL]);

    let correction = correct("");
    assert_eq!(correction.text, "");
    assert!(correction.substitutions.is_empty());
}

#[test]
fn test_guard_phrase_suppresses_correction() {
    let text = "The Muslim holiday was celebrated by every man and woman in town.";
    let result = correct(text);
    assert_eq!(result.text, text);
    assert!(result.substitutions.is_empty());
    assert_eq!(result.guard.as_deref(), Some("muslim holiday"));
}

#[test]
fn test_no_guard_mode() {
    let engine = BiasEngine::new(
        RuleSet::builtin(),
        ClassifierOptions::default(),
        CorrectorOptions {
            guard_enabled: false,
        },
    );
    let result = engine.correct("A Hindu festival");
    assert_eq!(result.text, "A Religious person festival");
}

#[test]
fn test_dominant_category_mode() {
    let engine = BiasEngine::new(
        RuleSet::builtin(),
        ClassifierOptions {
            category_mode: CategoryMode::Dominant,
            ..Default::default()
        },
        CorrectorOptions::default(),
    );
    let result = engine.classify("she told her sister that he was rich");
    assert_eq!(result.categories, vec!["gender_female"]);
    assert_eq!(result.hits, 4);
}

#[test]
fn test_all_caps_replacement() {
    let result = correct("WHITE MAN");
    assert_eq!(result.text, "INDIVIDUAL PERSON");
}

#[test]
fn test_custom_ruleset_is_data_only() {
    let ruleset = RuleSet::from_toml_str(indoc! {r#"
        version = 1

        [[lexicon]]
        category = "tone"
        subcategory = "aggressive"
        triggers = ["crush", "destroy"]

        [[rules]]
        term = "manpower"
        replacement = "workforce"

        [guards]
        phrases = ["Manpower Group"]
    "#})
    .unwrap();
    let engine = BiasEngine::with_ruleset(Arc::new(ruleset));

    let result = engine.classify("We will crush and destroy them");
    assert_eq!(result.categories, vec!["tone_aggressive"]);
    assert_eq!(result.hits, 2);

    let result = engine.correct("Manpower is short.");
    assert_eq!(result.text, "Workforce is short.");

    let result = engine.correct("Manpower Group hired more manpower.");
    assert!(result.is_noop());
}

fn two_rule_engine(first: (&str, &str), second: (&str, &str)) -> BiasEngine {
    let toml = format!(
        "version = 1\n\n[[rules]]\nterm = \"{}\"\nreplacement = \"{}\"\n\n[[rules]]\nterm = \"{}\"\nreplacement = \"{}\"\n",
        first.0, first.1, second.0, second.1
    );
    BiasEngine::with_ruleset(Arc::new(RuleSet::from_toml_str(&toml).unwrap()))
}

#[test]
fn test_later_rule_sees_earlier_rewrite() {
    let engine = two_rule_engine(("man", "person"), ("person", "individual"));

    let result = engine.correct("a Man");
    assert_eq!(result.text, "a Individual");
    assert_eq!(
        result.substitutions,
        vec![
            Substitution::new("Man", "Person"),
            Substitution::new("Person", "Individual"),
        ]
    );
}

#[test]
fn test_rules_run_once_without_fixed_point() {
    // "person" already ran when "man" produces it, so it is not revisited.
    let engine = two_rule_engine(("person", "individual"), ("man", "person"));

    let result = engine.correct("a Man");
    assert_eq!(result.text, "a Person");
    assert_eq!(result.substitutions, vec![Substitution::new("Man", "Person")]);
}

#[test]
fn test_possessive_pronoun_whole_word() {
    let result = correct("the book is hers");
    assert_eq!(result.text, "the book is theirs");
    assert_eq!(result.substitutions, vec![Substitution::new("hers", "theirs")]);
}

#[test]
fn test_engine_is_usable_across_threads() {
    let engine = BiasEngine::default();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.correct("a Black man").text)
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "a Individual person");
    }
}
