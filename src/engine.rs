//! The two engine operations over one shared ruleset.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::classifier::{CategoryCounts, ClassificationResult, Classifier, ClassifierOptions};
use crate::corrector::{CorrectionResult, Corrector, CorrectorOptions};
use crate::ruleset::RuleSet;

static DEFAULT_ENGINE: Lazy<BiasEngine> = Lazy::new(BiasEngine::default);

/// Classifier and corrector sharing one immutable [`RuleSet`].
///
/// Cloning is cheap and clones share the ruleset; the engine can be used
/// from any number of threads at once.
#[derive(Debug, Clone)]
pub struct BiasEngine {
    classifier: Classifier,
    corrector: Corrector,
}

impl BiasEngine {
    pub fn new(
        ruleset: Arc<RuleSet>,
        classifier_options: ClassifierOptions,
        corrector_options: CorrectorOptions,
    ) -> Self {
        Self {
            classifier: Classifier::new(Arc::clone(&ruleset), classifier_options),
            corrector: Corrector::new(ruleset, corrector_options),
        }
    }

    pub fn with_ruleset(ruleset: Arc<RuleSet>) -> Self {
        Self::new(ruleset, ClassifierOptions::default(), CorrectorOptions::default())
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        self.classifier.classify(text)
    }

    pub fn count(&self, text: &str) -> CategoryCounts {
        self.classifier.count(text)
    }

    pub fn correct(&self, text: &str) -> CorrectionResult {
        self.corrector.correct(text)
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn corrector(&self) -> &Corrector {
        &self.corrector
    }

    pub fn ruleset(&self) -> &Arc<RuleSet> {
        self.classifier.ruleset()
    }
}

impl Default for BiasEngine {
    fn default() -> Self {
        Self::with_ruleset(RuleSet::builtin())
    }
}

/// Classify `text` with the built-in ruleset and default options.
pub fn classify(text: &str) -> ClassificationResult {
    DEFAULT_ENGINE.classify(text)
}

/// Correct `text` with the built-in ruleset and default options.
pub fn correct(text: &str) -> CorrectionResult {
    DEFAULT_ENGINE.correct(text)
}
