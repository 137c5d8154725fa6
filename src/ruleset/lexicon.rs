use serde::Deserialize;
use std::collections::HashSet;

use crate::errors::{Error, Result};

/// A lexicon row as authored in the ruleset file.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconSpec {
    pub category: String,
    pub subcategory: String,
    #[serde(default)]
    pub triggers: Vec<String>,
}

/// One category/subcategory key with its space-padded trigger phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    category: String,
    subcategory: String,
    label: String,
    triggers: Vec<String>,
}

impl LexiconEntry {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subcategory(&self) -> &str {
        &self.subcategory
    }

    /// The `category_subcategory` label reported by the classifier.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Trigger phrases, lowercase and padded with one space on each side.
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// Number of non-overlapping trigger occurrences in already padded,
    /// lowercased text.
    pub fn count_in(&self, padded: &str) -> usize {
        self.triggers
            .iter()
            .map(|trigger| padded.matches(trigger.as_str()).count())
            .sum()
    }
}

/// Ordered category table. Iteration order is file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    pub fn from_specs(specs: Vec<LexiconSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        let entries = specs
            .into_iter()
            .map(|spec| {
                let entry = compile_entry(spec)?;
                if !seen.insert(entry.label.clone()) {
                    return Err(Error::DuplicateCategory { label: entry.label });
                }
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&LexiconEntry> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !out.contains(&entry.category.as_str()) {
                out.push(&entry.category);
            }
        }
        out
    }

    pub fn trigger_count(&self) -> usize {
        self.entries.iter().map(|e| e.triggers.len()).sum()
    }
}

fn compile_entry(spec: LexiconSpec) -> Result<LexiconEntry> {
    let category = spec.category.trim().to_string();
    let subcategory = spec.subcategory.trim().to_string();
    let label = format!("{category}_{subcategory}");

    if category.is_empty() || subcategory.is_empty() {
        return Err(Error::InvalidTrigger {
            label,
            trigger: String::new(),
            reason: "category and subcategory must be non-empty",
        });
    }

    let triggers = spec
        .triggers
        .iter()
        .map(|raw| pad_trigger(&label, raw))
        .collect::<Result<Vec<_>>>()?;

    Ok(LexiconEntry {
        category,
        subcategory,
        label,
        triggers,
    })
}

fn pad_trigger(label: &str, raw: &str) -> Result<String> {
    let phrase = raw.trim();
    if phrase.is_empty() {
        return Err(Error::InvalidTrigger {
            label: label.to_string(),
            trigger: raw.to_string(),
            reason: "trigger is empty",
        });
    }
    if phrase.chars().any(char::is_uppercase) {
        return Err(Error::InvalidTrigger {
            label: label.to_string(),
            trigger: raw.to_string(),
            reason: "trigger must be lowercase",
        });
    }
    Ok(format!(" {phrase} "))
}
