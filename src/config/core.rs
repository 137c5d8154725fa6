use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::classifier::{CategoryMode, ClassifierOptions, DEFAULT_SATURATION};
use crate::corrector::CorrectorOptions;
use crate::engine::BiasEngine;
use crate::errors::{Error, Result};
use crate::ruleset::RuleSet;

/// Root configuration structure for biasguard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiasguardConfig {
    /// Classification policy
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Correction policy
    #[serde(default)]
    pub corrector: CorrectorConfig,

    /// Which ruleset to load
    #[serde(default)]
    pub ruleset: RulesetConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Report every matched label or only the dominant one (default: all)
    #[serde(default)]
    pub category_mode: CategoryMode,

    /// Hit count at which the score reaches 1.0 (default: 10)
    #[serde(default = "default_saturation")]
    pub saturation: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            category_mode: CategoryMode::default(),
            saturation: default_saturation(),
        }
    }
}

fn default_saturation() -> u32 {
    DEFAULT_SATURATION
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectorConfig {
    /// Leave text untouched when a factual-context phrase is present (default: true)
    #[serde(default = "default_guard_enabled")]
    pub guard_enabled: bool,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        Self {
            guard_enabled: default_guard_enabled(),
        }
    }
}

fn default_guard_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetConfig {
    /// Custom ruleset file; the built-in ruleset is used when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl BiasguardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.classifier.saturation == 0 {
            return Err(Error::Configuration(
                "classifier.saturation must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions {
            category_mode: self.classifier.category_mode,
            saturation: self.classifier.saturation,
        }
    }

    pub fn corrector_options(&self) -> CorrectorOptions {
        CorrectorOptions {
            guard_enabled: self.corrector.guard_enabled,
        }
    }

    /// Load the configured ruleset once.
    pub fn load_ruleset(&self) -> Result<Arc<RuleSet>> {
        match &self.ruleset.path {
            Some(path) => RuleSet::from_path(path).map(Arc::new),
            None => Ok(RuleSet::builtin()),
        }
    }

    pub fn build_engine(&self) -> Result<BiasEngine> {
        self.validate()?;
        Ok(BiasEngine::new(
            self.load_ruleset()?,
            self.classifier_options(),
            self.corrector_options(),
        ))
    }
}
