//! Declarative ruleset shared by the classifier and the corrector.
//!
//! A ruleset is pure data: an ordered lexicon of trigger phrases, an ordered
//! list of neutralization rules and a list of factual-context guard phrases.
//! It is parsed from TOML, validated and compiled once, then shared by
//! reference. New categories or rules are additions to the data file.
//!
//! ```toml
//! version = 1
//!
//! [[lexicon]]
//! category = "gender"
//! subcategory = "male"
//! triggers = ["he", "him"]
//!
//! [[rules]]
//! term = "chairman"
//! replacement = "chairperson"
//!
//! [guards]
//! phrases = ["indian cuisine"]
//! ```

mod lexicon;
mod rules;

pub use lexicon::{Lexicon, LexiconEntry, LexiconSpec};
pub use rules::{GuardList, GuardSpec, ReplacementRule, RuleSpec};

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::errors::{Error, Result};

/// Ruleset format version understood by this build.
pub const SUPPORTED_VERSION: u32 = 1;

const BUILTIN_RULESET: &str = include_str!("../../data/ruleset.toml");

static BUILTIN: Lazy<Arc<RuleSet>> = Lazy::new(|| {
    Arc::new(RuleSet::from_toml_str(BUILTIN_RULESET).expect("built-in ruleset must be valid"))
});

#[derive(Debug, Deserialize)]
struct RuleSetFile {
    version: u32,
    #[serde(default)]
    lexicon: Vec<LexiconSpec>,
    #[serde(default)]
    rules: Vec<RuleSpec>,
    #[serde(default)]
    guards: GuardSpec,
}

/// Immutable, compiled ruleset.
#[derive(Debug, Clone)]
pub struct RuleSet {
    version: u32,
    lexicon: Lexicon,
    rules: Vec<ReplacementRule>,
    guards: GuardList,
}

impl RuleSet {
    /// The ruleset shipped with the crate, compiled on first use.
    pub fn builtin() -> Arc<RuleSet> {
        Arc::clone(&BUILTIN)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: RuleSetFile =
            toml::from_str(contents).map_err(|e| Error::parse("ruleset", e))?;
        Self::compile(file)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let file: RuleSetFile = toml::from_str(&contents)
            .map_err(|e| Error::parse(format!("ruleset {}", path.display()), e))?;
        let ruleset = Self::compile(file)?;
        debug!(
            path = %path.display(),
            categories = ruleset.lexicon.len(),
            rules = ruleset.rules.len(),
            guards = ruleset.guards.phrases().len(),
            "Loaded ruleset"
        );
        Ok(ruleset)
    }

    fn compile(file: RuleSetFile) -> Result<Self> {
        if file.version != SUPPORTED_VERSION {
            return Err(Error::UnsupportedVersion {
                found: file.version,
                supported: SUPPORTED_VERSION,
            });
        }

        let lexicon = Lexicon::from_specs(file.lexicon)?;
        let rules = file
            .rules
            .iter()
            .map(|spec| ReplacementRule::new(&spec.term, &spec.replacement))
            .collect::<Result<Vec<_>>>()?;
        let guards = GuardList::from_spec(file.guards)?;

        Ok(Self {
            version: file.version,
            lexicon,
            rules,
            guards,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[ReplacementRule] {
        &self.rules
    }

    pub fn guards(&self) -> &GuardList {
        &self.guards
    }
}
