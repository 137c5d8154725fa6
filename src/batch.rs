//! Parallel classification over many texts and per-category summaries.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug_span;

use crate::classifier::{CategoryCounts, ClassificationResult, Classifier};

/// Subcategory totals for one lexicon category, highest total first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    /// `(label, total)` pairs sorted by total, descending; ties keep lexicon order
    pub totals: Vec<(String, usize)>,
}

impl CategorySummary {
    pub fn total(&self) -> usize {
        self.totals.iter().map(|(_, n)| n).sum()
    }
}

/// Classify every text in parallel. Output order matches input order.
pub fn classify_batch<S>(classifier: &Classifier, texts: &[S]) -> Vec<ClassificationResult>
where
    S: AsRef<str> + Sync,
{
    let _span = debug_span!("classify_batch", texts = texts.len()).entered();
    texts
        .par_iter()
        .map(|text| classifier.classify(text.as_ref()))
        .collect()
}

/// Per-label counts for every text, in input order.
pub fn count_batch<S>(classifier: &Classifier, texts: &[S]) -> Vec<CategoryCounts>
where
    S: AsRef<str> + Sync,
{
    let _span = debug_span!("count_batch", texts = texts.len()).entered();
    texts
        .par_iter()
        .map(|text| classifier.count(text.as_ref()))
        .collect()
}

/// Sum label counts across `texts` and group them by category.
pub fn summarize<S>(classifier: &Classifier, texts: &[S]) -> Vec<CategorySummary>
where
    S: AsRef<str> + Sync,
{
    let lexicon = classifier.ruleset().lexicon();
    let label_totals = count_batch(classifier, texts)
        .into_par_iter()
        .map(|counts| counts.iter().map(|(_, n)| n).collect::<Vec<_>>())
        .reduce(
            || vec![0; lexicon.len()],
            |mut acc, row| {
                acc.iter_mut().zip(row).for_each(|(a, n)| *a += n);
                acc
            },
        );

    lexicon
        .categories()
        .into_iter()
        .map(|category| {
            let mut totals: Vec<(String, usize)> = lexicon
                .entries()
                .iter()
                .zip(&label_totals)
                .filter(|(entry, _)| entry.category() == category)
                .map(|(entry, n)| (entry.label().to_string(), *n))
                .collect();
            totals.sort_by(|a, b| b.1.cmp(&a.1));
            CategorySummary {
                category: category.to_string(),
                totals,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierOptions;
    use crate::ruleset::RuleSet;

    fn classifier() -> Classifier {
        Classifier::new(RuleSet::builtin(), ClassifierOptions::default())
    }

    #[test]
    fn test_batch_preserves_order() {
        let texts = vec!["nothing", "he is rich", "she"];
        let results = classify_batch(&classifier(), &texts);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].categories, vec!["none"]);
        assert_eq!(results[1].categories, vec!["gender_male", "socioeconomic_rich"]);
        assert_eq!(results[2].categories, vec!["gender_female"]);
    }

    #[test]
    fn test_summarize_sorts_within_category() {
        let texts = vec!["she is here", "she and her", "he left"];
        let summary = summarize(&classifier(), &texts);

        let gender = summary.iter().find(|s| s.category == "gender").unwrap();
        assert_eq!(
            gender.totals,
            vec![
                ("gender_female".to_string(), 3),
                ("gender_male".to_string(), 1)
            ]
        );
        assert_eq!(gender.total(), 4);
        assert_eq!(summary[0].category, "gender");
    }

    #[test]
    fn test_summarize_empty_input() {
        let texts: Vec<String> = Vec::new();
        let summary = summarize(&classifier(), &texts);
        assert!(summary.iter().all(|s| s.total() == 0));
        assert_eq!(summary.len(), 10);
    }
}
