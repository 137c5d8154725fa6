//! `.biasguard.toml` configuration.
//!
//! ```toml
//! [classifier]
//! category_mode = "all"   # or "dominant"
//! saturation = 10
//!
//! [corrector]
//! guard_enabled = true
//!
//! [ruleset]
//! path = "rules/custom.toml"
//! ```

mod core;
mod loader;

pub use self::core::{BiasguardConfig, ClassifierConfig, CorrectorConfig, RulesetConfig};
pub use self::loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

/// Commented default configuration written by `biasguard init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Biasguard Configuration

[classifier]
# "all" reports every matched category, "dominant" only the strongest one
category_mode = "all"
# Number of trigger hits at which the score reaches 1.0
saturation = 10

[corrector]
# Leave text untouched when it contains a factual-context phrase
guard_enabled = true

[ruleset]
# Custom ruleset file; the built-in ruleset is used when unset
# path = "rules/custom.toml"
"#;
