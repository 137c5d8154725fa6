//! Command handlers behind the `biasguard` binary.

pub mod init;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::batch;
use crate::classifier::CategoryMode;
use crate::cli::{Cli, Commands, OrderArg, OutputFormat};
use crate::config::{load_config, load_config_from_path, BiasguardConfig};
use crate::engine::BiasEngine;
use crate::pipeline::{AuditRecord, JsonLinesSink, Pipeline, PipelineOrder, ResultSink};
use crate::report::{ColorMode, ReportFormatter};

pub fn run(cli: Cli) -> Result<()> {
    if let Commands::Init { force } = &cli.command {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        return init::init_config(&cwd, *force);
    }

    let config = resolve_config(&cli)?;
    let engine = config
        .build_engine()
        .context("Failed to build engine from configuration")?;
    let formatter = ReportFormatter::new(color_mode(&cli));

    match cli.command {
        Commands::Classify { text } => {
            let result = engine.classify(&input_text(text)?);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Terminal => print!("{}", formatter.classification(&result)),
            }
        }
        Commands::Correct { text } => {
            let result = engine.correct(&input_text(text)?);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Terminal => print!("{}", formatter.correction(&result)),
            }
        }
        Commands::Run {
            text,
            prompt,
            order,
            no_rescore,
        } => {
            let pipeline = Pipeline::new(engine, pipeline_order(order, no_rescore));
            let text = input_text(text)?;
            match cli.format {
                OutputFormat::Json => {
                    let mut sink = JsonLinesSink::new(std::io::stdout().lock());
                    emit_record(&pipeline, &prompt, &text, &mut sink)?;
                }
                OutputFormat::Terminal => {
                    print!("{}", formatter.record(&pipeline.process(&prompt, &text)))
                }
            }
        }
        Commands::Summarize { path } => {
            let summaries = summarize_file(&engine, &path)?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
                OutputFormat::Terminal => print!("{}", formatter.summary(&summaries)),
            }
        }
        // Handled before configuration is loaded
        Commands::Init { .. } => {}
    }

    Ok(())
}

/// Config file first, then command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<BiasguardConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_config(),
    };

    if let Some(path) = &cli.ruleset {
        config.ruleset.path = Some(path.clone());
    }
    if cli.dominant {
        config.classifier.category_mode = CategoryMode::Dominant;
    }
    if cli.no_guard {
        config.corrector.guard_enabled = false;
    }

    Ok(config)
}

/// `--plain` wins over `--color`; without either the environment decides.
fn color_mode(cli: &Cli) -> ColorMode {
    if cli.plain {
        ColorMode::Never
    } else {
        cli.color.unwrap_or_else(ColorMode::from_env)
    }
}

fn emit_record(
    pipeline: &Pipeline,
    prompt: &str,
    text: &str,
    sink: &mut dyn ResultSink,
) -> Result<AuditRecord> {
    let record = pipeline.process(prompt, text);
    sink.accept(&record).context("Failed to write audit record")?;
    Ok(record)
}

fn pipeline_order(order: OrderArg, no_rescore: bool) -> PipelineOrder {
    match order {
        OrderArg::ClassifyFirst => PipelineOrder::ClassifyThenCorrect {
            rescore: !no_rescore,
        },
        OrderArg::CorrectFirst => PipelineOrder::CorrectThenClassify,
    }
}

fn input_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

fn summarize_file(engine: &BiasEngine, path: &Path) -> Result<Vec<batch::CategorySummary>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let texts: Vec<&str> = contents.lines().filter(|l| !l.trim().is_empty()).collect();
    Ok(batch::summarize(engine.classifier(), &texts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_cli_overrides_apply() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("biasguard.toml");
        std::fs::write(&config_path, "[classifier]\nsaturation = 4\n").unwrap();

        let cli = Cli::parse_from([
            "biasguard",
            "--config",
            config_path.to_str().unwrap(),
            "--dominant",
            "--no-guard",
            "classify",
            "some text",
        ]);
        let resolved = resolve_config(&cli).unwrap();

        assert_eq!(resolved.classifier.saturation, 4);
        assert_eq!(resolved.classifier.category_mode, CategoryMode::Dominant);
        assert!(!resolved.corrector.guard_enabled);
    }

    #[test]
    fn test_plain_overrides_color_flag() {
        let cli = Cli::parse_from(["biasguard", "--color", "always", "--plain", "classify", "x"]);
        assert_eq!(color_mode(&cli), ColorMode::Never);

        let cli = Cli::parse_from(["biasguard", "--color", "ALWAYS", "classify", "x"]);
        assert_eq!(color_mode(&cli), ColorMode::Always);

        assert!(Cli::try_parse_from(["biasguard", "--color", "sometimes", "classify", "x"]).is_err());
    }

    struct BrokenPipe;

    impl std::io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_record_propagates_sink_failure() {
        let pipeline = Pipeline::default();
        let mut sink = JsonLinesSink::new(BrokenPipe);
        let err = emit_record(&pipeline, "", "He is a man", &mut sink).unwrap_err();
        assert!(err.to_string().contains("Failed to write audit record"));
    }

    #[test]
    fn test_emit_record_writes_one_line() {
        let pipeline = Pipeline::default();
        let mut sink = JsonLinesSink::new(Vec::new());
        let record = emit_record(&pipeline, "p", "He is a man", &mut sink).unwrap();
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.contains(&record.fingerprint));
    }

    #[test]
    fn test_pipeline_order_mapping() {
        assert_eq!(
            pipeline_order(OrderArg::ClassifyFirst, true),
            PipelineOrder::ClassifyThenCorrect { rescore: false }
        );
        assert_eq!(
            pipeline_order(OrderArg::CorrectFirst, false),
            PipelineOrder::CorrectThenClassify
        );
    }
}
