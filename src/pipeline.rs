//! Caller-side composition of classification and correction.
//!
//! The engine itself imposes no order between the two operations. A
//! [`Pipeline`] makes the order explicit and produces one [`AuditRecord`]
//! per input, which can be handed to a [`ResultSink`] for storage or
//! attestation.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;
use tracing::{debug_span, warn};

use crate::corrector::Substitution;
use crate::engine::BiasEngine;
use crate::errors::{Error, Result};

/// Order in which a pipeline runs the two operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "order")]
pub enum PipelineOrder {
    /// Score the raw text, then correct it. With `rescore`, the corrected
    /// text is classified as well and reported as `score_after`.
    ClassifyThenCorrect { rescore: bool },
    /// Correct first and score the corrected text.
    CorrectThenClassify,
}

impl Default for PipelineOrder {
    fn default() -> Self {
        Self::ClassifyThenCorrect { rescore: true }
    }
}

/// Finalized record for one processed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub prompt: String,
    pub original: String,
    pub corrected: String,
    pub categories: Vec<String>,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_after: Option<f64>,
    pub substitutions: Vec<Substitution>,
    /// SHA-256 over prompt, original and corrected text
    pub fingerprint: String,
}

/// Destination for finished records.
pub trait ResultSink {
    fn accept(&mut self, record: &AuditRecord) -> Result<()>;
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<AuditRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AuditRecord> {
        self.records
    }
}

impl ResultSink for MemorySink {
    fn accept(&mut self, record: &AuditRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Writes one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for JsonLinesSink<W> {
    fn accept(&mut self, record: &AuditRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n").map_err(Error::Sink)?;
        self.writer.flush().map_err(Error::Sink)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    engine: BiasEngine,
    order: PipelineOrder,
}

impl Pipeline {
    pub fn new(engine: BiasEngine, order: PipelineOrder) -> Self {
        Self { engine, order }
    }

    pub fn order(&self) -> PipelineOrder {
        self.order
    }

    pub fn engine(&self) -> &BiasEngine {
        &self.engine
    }

    pub fn process(&self, prompt: &str, text: &str) -> AuditRecord {
        let _span = debug_span!("pipeline", order = ?self.order, len = text.len()).entered();

        let (classification, correction, score_after) = match self.order {
            PipelineOrder::ClassifyThenCorrect { rescore } => {
                let classification = self.engine.classify(text);
                let correction = self.engine.correct(text);
                let score_after = rescore.then(|| self.engine.classify(&correction.text).score);
                (classification, correction, score_after)
            }
            PipelineOrder::CorrectThenClassify => {
                let correction = self.engine.correct(text);
                let classification = self.engine.classify(&correction.text);
                (classification, correction, None)
            }
        };

        AuditRecord {
            fingerprint: fingerprint(prompt, text, &correction.text),
            prompt: prompt.to_string(),
            original: text.to_string(),
            corrected: correction.text,
            categories: classification.categories,
            score: classification.score,
            score_after,
            substitutions: correction.substitutions,
        }
    }

    /// Process and hand the record to `sink`. A failing sink is logged and
    /// does not affect the returned record.
    pub fn process_into(
        &self,
        prompt: &str,
        text: &str,
        sink: &mut dyn ResultSink,
    ) -> AuditRecord {
        let record = self.process(prompt, text);
        if let Err(e) = sink.accept(&record) {
            warn!(fingerprint = %record.fingerprint, error = %e, "Result sink rejected record");
        }
        record
    }
}

/// Hex SHA-256 of the three texts joined by newlines.
pub fn fingerprint(prompt: &str, original: &str, corrected: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    hasher.update(b"\n");
    hasher.update(original.as_bytes());
    hasher.update(b"\n");
    hasher.update(corrected.as_bytes());
    format!("{:x}", hasher.finalize())
}
