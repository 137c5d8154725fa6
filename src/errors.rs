//! Shared error types for ruleset loading, configuration and sinks.
//!
//! Classification and correction never fail; only the operations that touch
//! files or parse data return [`Result`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for biasguard operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing errors for rulesets and configuration files
    #[error("Failed to parse {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: toml::de::Error,
    },

    /// Ruleset declares a format version this build does not understand
    #[error("Unsupported ruleset version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Two lexicon entries share the same category/subcategory key
    #[error("Duplicate lexicon entry: {label}")]
    DuplicateCategory { label: String },

    /// A lexicon entry is malformed or one of its trigger phrases is
    #[error("Invalid trigger '{trigger}' in {label}: {reason}")]
    InvalidTrigger {
        label: String,
        trigger: String,
        reason: &'static str,
    },

    /// A neutralization rule could not be compiled
    #[error("Invalid rule for term '{term}': {reason}")]
    InvalidRule { term: String, reason: String },

    /// A guard phrase is empty after normalization
    #[error("Invalid guard phrase at position {index}")]
    InvalidGuard { index: usize },

    /// Configuration value out of range
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Record serialization failures in result sinks
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Write failures in result sinks
    #[error("Sink error: {0}")]
    Sink(#[source] std::io::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(context: impl Into<String>, source: toml::de::Error) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Whether the user can fix this error by editing a ruleset or config file.
    pub fn is_user_fixable(&self) -> bool {
        !matches!(
            self,
            Self::Io { .. } | Self::Serialization(_) | Self::Sink(_)
        )
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
