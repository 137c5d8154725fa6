//! Terminal rendering and presentation policy.
//!
//! Nothing here changes engine results; it only decides what a human sees.

use colored::*;
use std::env;
use std::fmt::Write as _;
use std::io::IsTerminal;

use crate::batch::CategorySummary;
use crate::classifier::ClassificationResult;
use crate::corrector::{CorrectionResult, Substitution};
use crate::pipeline::AuditRecord;

/// Substitutions worth showing: both sides longer than one character.
pub fn reportable_substitutions(substitutions: &[Substitution]) -> Vec<&Substitution> {
    substitutions
        .iter()
        .filter(|s| s.original.chars().count() > 1 && s.replacement.chars().count() > 1)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    /// `NO_COLOR` and `CLICOLOR=0` turn colors off, `CLICOLOR_FORCE=1` on.
    pub fn from_env() -> Self {
        if env::var("NO_COLOR").is_ok() || env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return Self::Never;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v == "1") {
            return Self::Always;
        }
        Self::Auto
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

pub struct ReportFormatter {
    color: bool,
}

impl ReportFormatter {
    pub fn new(mode: ColorMode) -> Self {
        let color = mode.should_use_color();
        colored::control::set_override(color);
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(ColorMode::Never)
    }

    fn header(&self, text: &str) -> String {
        if self.color {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn score(&self, score: f64) -> String {
        let text = format!("{score:.2}");
        if !self.color {
            return text;
        }
        match score {
            s if s >= 0.7 => text.red().bold().to_string(),
            s if s >= 0.3 => text.yellow().to_string(),
            _ => text.green().to_string(),
        }
    }

    pub fn classification(&self, result: &ClassificationResult) -> String {
        let mut out = String::new();
        writeln!(out, "{}", self.header("Classification")).unwrap();
        writeln!(out, "  score:      {}", self.score(result.score)).unwrap();
        writeln!(out, "  hits:       {}", result.hits).unwrap();
        writeln!(out, "  categories: {}", result.categories.join(", ")).unwrap();
        out
    }

    pub fn correction(&self, result: &CorrectionResult) -> String {
        let mut out = String::new();
        writeln!(out, "{}", self.header("Correction")).unwrap();
        writeln!(out, "  text: {}", result.text).unwrap();
        if let Some(guard) = &result.guard {
            writeln!(
                out,
                "  {}",
                self.dim(&format!("unchanged: factual context \"{guard}\""))
            )
            .unwrap();
        }
        self.write_substitutions(&mut out, &result.substitutions);
        out
    }

    pub fn record(&self, record: &AuditRecord) -> String {
        let mut out = String::new();
        writeln!(out, "{}", self.header("Result")).unwrap();
        writeln!(out, "  original:   {}", record.original).unwrap();
        writeln!(out, "  corrected:  {}", record.corrected).unwrap();
        writeln!(out, "  score:      {}", self.score(record.score)).unwrap();
        if let Some(after) = record.score_after {
            writeln!(out, "  after:      {}", self.score(after)).unwrap();
        }
        writeln!(out, "  categories: {}", record.categories.join(", ")).unwrap();
        self.write_substitutions(&mut out, &record.substitutions);
        writeln!(out, "  {}", self.dim(&record.fingerprint)).unwrap();
        out
    }

    pub fn summary(&self, summaries: &[CategorySummary]) -> String {
        let mut out = String::new();
        for summary in summaries {
            writeln!(
                out,
                "{} ({})",
                self.header(&summary.category.to_uppercase()),
                summary.total()
            )
            .unwrap();
            for (label, total) in &summary.totals {
                writeln!(out, "  {label:<32} {total:>6}").unwrap();
            }
        }
        out
    }

    fn write_substitutions(&self, out: &mut String, substitutions: &[Substitution]) {
        let shown = reportable_substitutions(substitutions);
        if shown.is_empty() {
            return;
        }
        writeln!(out, "  substitutions:").unwrap();
        for s in shown {
            writeln!(out, "    {} -> {}", s.original, s.replacement).unwrap();
        }
    }
}
