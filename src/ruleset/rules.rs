use regex::Regex;
use serde::Deserialize;

use crate::errors::{Error, Result};

/// A neutralization rule as authored in the ruleset file.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    pub term: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuardSpec {
    #[serde(default)]
    pub phrases: Vec<String>,
}

/// Compiled whole-word, case-insensitive rewrite of `term` to `replacement`.
#[derive(Debug, Clone)]
pub struct ReplacementRule {
    term: String,
    replacement: String,
    pattern: Regex,
}

impl ReplacementRule {
    pub fn new(term: &str, replacement: &str) -> Result<Self> {
        let term = term.trim();
        if term.is_empty() {
            return Err(Error::InvalidRule {
                term: term.to_string(),
                reason: "term is empty".to_string(),
            });
        }
        if replacement.trim().is_empty() {
            return Err(Error::InvalidRule {
                term: term.to_string(),
                reason: "replacement is empty".to_string(),
            });
        }

        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))).map_err(|e| {
            Error::InvalidRule {
                term: term.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            term: term.to_lowercase(),
            replacement: replacement.to_string(),
            pattern,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

/// Lowercased factual-context phrases that disable correction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardList {
    phrases: Vec<String>,
}

impl GuardList {
    pub fn from_spec(spec: GuardSpec) -> Result<Self> {
        let phrases = spec
            .phrases
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let phrase = raw.trim().to_lowercase();
                if phrase.is_empty() {
                    Err(Error::InvalidGuard { index })
                } else {
                    Ok(phrase)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { phrases })
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// First guard phrase occurring in `lowered`, which must already be lowercase.
    pub fn first_match(&self, lowered: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|phrase| lowered.contains(phrase.as_str()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_matches_whole_words_only() {
        let rule = ReplacementRule::new("man", "person").unwrap();
        assert!(rule.pattern().is_match("a Man walks"));
        assert!(!rule.pattern().is_match("the chairman spoke"));
        assert!(!rule.pattern().is_match("woman"));
    }

    #[test]
    fn test_hyphenated_term_is_escaped() {
        let rule = ReplacementRule::new("south-asian", "individual").unwrap();
        assert!(rule.pattern().is_match("a South-Asian family"));
        assert!(!rule.pattern().is_match("a southXasian family"));
    }

    #[test]
    fn test_empty_term_rejected() {
        assert!(matches!(
            ReplacementRule::new("  ", "person"),
            Err(Error::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_guard_phrases_are_lowercased() {
        let guards = GuardList::from_spec(GuardSpec {
            phrases: vec!["Indian Cuisine".to_string()],
        })
        .unwrap();
        assert_eq!(guards.first_match("we love indian cuisine"), Some("indian cuisine"));
        assert_eq!(guards.first_match("an indian chef"), None);
    }

    #[test]
    fn test_empty_guard_rejected() {
        let result = GuardList::from_spec(GuardSpec {
            phrases: vec!["ok".to_string(), " ".to_string()],
        });
        assert!(matches!(result, Err(Error::InvalidGuard { index: 1 })));
    }
}
