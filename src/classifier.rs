//! Lexicon-driven bias classification.
//!
//! Text is lowercased and padded with one space on each side, then every
//! trigger phrase is counted as a plain substring. Padding makes matches at
//! the string edges behave like interior matches. This is a boundary
//! approximation rather than tokenization: a trigger followed by punctuation
//! (`"temple."`) is not counted, and hyphenated or compound words can be
//! under- or over-counted.
//!
//! The score saturates linearly: `min(hits / saturation, 1.0)`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::ruleset::RuleSet;

/// Label reported when no trigger phrase matched.
pub const NO_BIAS_LABEL: &str = "none";

/// Hit count at which the score reaches 1.0.
pub const DEFAULT_SATURATION: u32 = 10;

/// Which labels a classification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMode {
    /// Every label with a nonzero count, in lexicon order
    #[default]
    All,
    /// Only the label with the highest count; ties go to the earliest label
    Dominant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierOptions {
    pub category_mode: CategoryMode,
    pub saturation: u32,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            category_mode: CategoryMode::default(),
            saturation: DEFAULT_SATURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Bias score in `[0, 1]`
    pub score: f64,
    /// `category_subcategory` labels, or `["none"]`
    pub categories: Vec<String>,
    /// Total trigger hits across all labels
    pub hits: usize,
}

impl ClassificationResult {
    fn none() -> Self {
        Self {
            score: 0.0,
            categories: vec![NO_BIAS_LABEL.to_string()],
            hits: 0,
        }
    }

    pub fn is_biased(&self) -> bool {
        self.hits > 0
    }
}

/// Per-label hit counts in lexicon order, zeros included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    counts: Vec<(String, usize)>,
}

impl CategoryCounts {
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(label, n)| (label.as_str(), *n))
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.iter().find(|(l, _)| *l == label).map(|(_, n)| n)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Labels with at least one hit, in lexicon order.
    pub fn nonzero(&self) -> impl Iterator<Item = (&str, usize)> {
        self.iter().filter(|(_, n)| *n > 0)
    }

    /// Highest count; the first label wins a tie.
    pub fn dominant(&self) -> Option<(&str, usize)> {
        self.nonzero()
            .fold(None, |best: Option<(&str, usize)>, (label, n)| match best {
                Some((_, top)) if top >= n => best,
                _ => Some((label, n)),
            })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Scores text against the lexicon of a shared [`RuleSet`].
#[derive(Debug, Clone)]
pub struct Classifier {
    ruleset: Arc<RuleSet>,
    options: ClassifierOptions,
}

impl Classifier {
    pub fn new(ruleset: Arc<RuleSet>, options: ClassifierOptions) -> Self {
        Self { ruleset, options }
    }

    pub fn options(&self) -> ClassifierOptions {
        self.options
    }

    pub fn ruleset(&self) -> &Arc<RuleSet> {
        &self.ruleset
    }

    /// Count trigger hits for every label.
    pub fn count(&self, text: &str) -> CategoryCounts {
        let padded = pad_lower(text);
        let counts = self
            .ruleset
            .lexicon()
            .entries()
            .iter()
            .map(|entry| (entry.label().to_string(), entry.count_in(&padded)))
            .collect();
        CategoryCounts { counts }
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        let counts = self.count(text);
        self.classify_counts(&counts)
    }

    /// Build a classification from precomputed counts.
    pub fn classify_counts(&self, counts: &CategoryCounts) -> ClassificationResult {
        let hits = counts.total();
        if hits == 0 {
            return ClassificationResult::none();
        }

        let categories = match self.options.category_mode {
            CategoryMode::All => counts
                .nonzero()
                .map(|(label, _)| label.to_string())
                .collect(),
            CategoryMode::Dominant => counts
                .dominant()
                .map(|(label, _)| vec![label.to_string()])
                .unwrap_or_default(),
        };

        ClassificationResult {
            score: saturated_score(hits, self.options.saturation),
            categories,
            hits,
        }
    }
}

fn pad_lower(text: &str) -> String {
    format!(" {} ", text.to_lowercase())
}

fn saturated_score(hits: usize, saturation: u32) -> f64 {
    let saturation = f64::from(saturation.max(1));
    (hits as f64 / saturation).min(1.0)
}
