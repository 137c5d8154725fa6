//! Case-preserving neutral-language rewriting.
//!
//! Rules run once each, in table order, over the text as rewritten by the
//! rules before them. A word produced by an earlier rule is never matched
//! again by a later one, and the corrector does not iterate to a fixed point.
//! Grammar is not repaired: "a White man" becomes "a Individual person".

use regex::Captures;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::ruleset::{ReplacementRule, RuleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectorOptions {
    /// Skip correction entirely when a factual-context guard phrase is present
    pub guard_enabled: bool,
}

impl Default for CorrectorOptions {
    fn default() -> Self {
        Self {
            guard_enabled: true,
        }
    }
}

/// One effected replacement: the matched text and what replaced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub original: String,
    pub replacement: String,
}

impl Substitution {
    pub fn new(original: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            replacement: replacement.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub text: String,
    /// In rule-table order, left to right within each rule
    pub substitutions: Vec<Substitution>,
    /// Guard phrase that suppressed correction, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,
}

impl CorrectionResult {
    fn unchanged(text: &str, guard: Option<String>) -> Self {
        Self {
            text: text.to_string(),
            substitutions: Vec::new(),
            guard,
        }
    }

    pub fn changed(&self) -> bool {
        !self.substitutions.is_empty()
    }

    pub fn is_noop(&self) -> bool {
        !self.changed()
    }
}

/// Rewrites biased terms using the rules and guards of a shared [`RuleSet`].
#[derive(Debug, Clone)]
pub struct Corrector {
    ruleset: Arc<RuleSet>,
    options: CorrectorOptions,
}

impl Corrector {
    pub fn new(ruleset: Arc<RuleSet>, options: CorrectorOptions) -> Self {
        Self { ruleset, options }
    }

    pub fn options(&self) -> CorrectorOptions {
        self.options
    }

    pub fn ruleset(&self) -> &Arc<RuleSet> {
        &self.ruleset
    }

    pub fn correct(&self, text: &str) -> CorrectionResult {
        if let Some(guard) = self.guard_for(text) {
            return CorrectionResult::unchanged(text, Some(guard.to_string()));
        }

        let mut substitutions = Vec::new();
        let text = self
            .ruleset
            .rules()
            .iter()
            .fold(text.to_string(), |current, rule| {
                apply_rule(rule, &current, &mut substitutions)
            });

        CorrectionResult {
            text,
            substitutions,
            guard: None,
        }
    }

    fn guard_for(&self, text: &str) -> Option<&str> {
        if !self.options.guard_enabled {
            return None;
        }
        self.ruleset.guards().first_match(&text.to_lowercase())
    }
}

fn apply_rule(rule: &ReplacementRule, text: &str, log: &mut Vec<Substitution>) -> String {
    rule.pattern()
        .replace_all(text, |caps: &Captures| {
            let original = &caps[0];
            let cased = preserve_case(original, rule.replacement());
            if cased.to_lowercase() != original.to_lowercase() {
                log.push(Substitution::new(original, cased.clone()));
            }
            cased
        })
        .into_owned()
}

/// Render `replacement` in the casing pattern of `original`.
///
/// All-caps originals give an all-caps replacement, a capitalized original
/// capitalizes only the first character of the replacement, anything else
/// keeps the replacement as authored.
pub fn preserve_case(original: &str, replacement: &str) -> String {
    if is_all_upper(original) {
        return replacement.to_uppercase();
    }

    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }

    replacement.to_string()
}

fn is_all_upper(word: &str) -> bool {
    let mut alphabetic = word.chars().filter(|c| c.is_alphabetic()).peekable();
    alphabetic.peek().is_some() && alphabetic.all(|c| !c.is_lowercase())
}
