//! Bias classification and neutral-language correction.
//!
//! Two pure operations over one immutable [`RuleSet`]:
//!
//! - [`classify`] scores text along social dimensions (gender, ethnicity,
//!   religion, age, ...) from a lexicon of trigger phrases.
//! - [`correct`] rewrites biased terms into neutral language, preserving the
//!   casing of each replaced word and leaving text with factual-context
//!   phrases untouched.
//!
//! ```
//! let result = biasguard::classify("He is a rich engineer in Lyon.");
//! assert_eq!(result.categories, vec!["gender_male", "occupation_tech", "socioeconomic_rich"]);
//!
//! let corrected = biasguard::correct("The Chairman spoke.");
//! assert_eq!(corrected.text, "The Chairperson spoke.");
//! ```
//!
//! Use [`BiasEngine`] to supply a custom ruleset or policy, and [`Pipeline`]
//! to combine both operations in an explicit order.

pub mod batch;
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod corrector;
pub mod engine;
pub mod errors;
pub mod pipeline;
pub mod report;
pub mod ruleset;

pub use crate::classifier::{
    CategoryCounts, CategoryMode, ClassificationResult, Classifier, ClassifierOptions,
    NO_BIAS_LABEL,
};
pub use crate::corrector::{
    preserve_case, CorrectionResult, Corrector, CorrectorOptions, Substitution,
};
pub use crate::engine::{classify, correct, BiasEngine};
pub use crate::errors::{Error, Result};
pub use crate::pipeline::{
    AuditRecord, JsonLinesSink, MemorySink, Pipeline, PipelineOrder, ResultSink,
};
pub use crate::ruleset::{Lexicon, LexiconEntry, ReplacementRule, RuleSet};
