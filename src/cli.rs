use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::report::ColorMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Terminal,
    /// One JSON document per result
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Score the original text, then correct it
    ClassifyFirst,
    /// Correct the text, then score the corrected text
    CorrectFirst,
}

#[derive(Parser, Debug)]
#[command(name = "biasguard")]
#[command(about = "Bias classifier and neutral-language corrector", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .biasguard.toml)
    #[arg(long, global = true, env = "BIASGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ruleset file, overriding the configured one
    #[arg(long, global = true)]
    pub ruleset: Option<PathBuf>,

    /// Report only the dominant category
    #[arg(long, global = true)]
    pub dominant: bool,

    /// Correct even when a factual-context phrase is present
    #[arg(long = "no-guard", global = true)]
    pub no_guard: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal", global = true)]
    pub format: OutputFormat,

    /// Color output: auto, always or never
    #[arg(long, global = true, value_parser = parse_color_mode)]
    pub color: Option<ColorMode>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score text for bias
    Classify {
        /// Text to classify (reads stdin when omitted)
        text: Option<String>,
    },

    /// Rewrite biased terms into neutral language
    Correct {
        /// Text to correct (reads stdin when omitted)
        text: Option<String>,
    },

    /// Classify and correct, producing an audit record
    Run {
        /// Text to process (reads stdin when omitted)
        text: Option<String>,

        /// Prompt that produced the text
        #[arg(long, default_value = "")]
        prompt: String,

        /// Order of the two operations
        #[arg(long, value_enum, default_value = "classify-first")]
        order: OrderArg,

        /// Skip scoring the corrected text in classify-first order
        #[arg(long = "no-rescore")]
        no_rescore: bool,
    },

    /// Summarize category counts over a file with one text per line
    Summarize {
        /// Input file
        path: PathBuf,
    },

    /// Write a default .biasguard.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn parse_color_mode(value: &str) -> Result<ColorMode, String> {
    ColorMode::parse(value).ok_or_else(|| format!("invalid color mode '{value}'"))
}
