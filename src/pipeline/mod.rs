// Pipelines and the startup context
//
// A pipeline is one dataset turned into a lookup table and a classifier.
// `BotContext` holds the chat and emotion pipelines; it is built once before
// the server starts and only read afterwards.

use serde::Serialize;
use std::time::Instant;

use crate::config::{DataConfig, DatasetConfig, TrainingParams};
use crate::config::constants::MATCH_THRESHOLD;
use crate::dataset::{Dataset, TrainingRecord};
use crate::errors::LoadError;
use crate::models::{Classifier, TextClassifier};
use crate::patterns::{resolve_detailed, LookupTable, Resolution};

/// Lookup table + classifier built from one dataset snapshot
pub struct Pipeline {
    name: String,
    lookup: LookupTable,
    classifier: Box<dyn Classifier>,
    label_count: usize,
}

impl Pipeline {
    /// Build both halves from the same records
    pub fn from_records(
        name: &str,
        records: &[TrainingRecord],
        params: &TrainingParams,
    ) -> Result<Self, LoadError> {
        let inputs: Vec<&str> = records.iter().map(|r| r.input.as_str()).collect();
        let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();

        let classifier = TextClassifier::fit(&inputs, &labels, params).map_err(|source| {
            LoadError::Training {
                pipeline: name.to_string(),
                source,
            }
        })?;
        let label_count = classifier.classes().len();
        let lookup = LookupTable::from_records(records);

        Ok(Self::with_classifier(
            name,
            lookup,
            Box::new(classifier),
            label_count,
        ))
    }

    /// Assemble from pre-built parts
    pub fn with_classifier(
        name: &str,
        lookup: LookupTable,
        classifier: Box<dyn Classifier>,
        label_count: usize,
    ) -> Self {
        Self {
            name: name.to_string(),
            lookup,
            classifier,
            label_count,
        }
    }

    /// Read the dataset and build the pipeline
    pub fn load(
        name: &str,
        config: &DatasetConfig,
        params: &TrainingParams,
    ) -> Result<Self, LoadError> {
        let started = Instant::now();
        let dataset = Dataset::load(config)?;
        let pipeline = Self::from_records(name, &dataset.records, params)?;

        tracing::info!(
            "✓ {} pipeline ready: {} rows ({} skipped), {} lookup keys, {} labels in {:.2?}",
            name,
            dataset.len(),
            dataset.skipped,
            pipeline.lookup.len(),
            pipeline.label_count,
            started.elapsed()
        );

        Ok(pipeline)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lookup(&self) -> &LookupTable {
        &self.lookup
    }

    pub fn label_count(&self) -> usize {
        self.label_count
    }

    /// Resolve with the shared fixed threshold
    pub fn resolve(&self, input: &str) -> Resolution {
        resolve_detailed(input, &self.lookup, self.classifier.as_ref(), MATCH_THRESHOLD)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("lookup_keys", &self.lookup.len())
            .field("classifier", &self.classifier.name())
            .field("label_count", &self.label_count)
            .finish()
    }
}

/// Result of running both pipelines on one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub reply: Resolution,
    pub emotion: Resolution,
}

/// Pipeline sizes for health checks
#[derive(Debug, Clone, Serialize)]
pub struct ContextStats {
    pub chat_keys: usize,
    pub chat_labels: usize,
    pub emotion_keys: usize,
    pub emotion_labels: usize,
}

/// Immutable startup state: both fitted pipelines
#[derive(Debug)]
pub struct BotContext {
    chat: Pipeline,
    emotion: Pipeline,
}

impl BotContext {
    pub fn new(chat: Pipeline, emotion: Pipeline) -> Self {
        Self { chat, emotion }
    }

    /// Load and train both pipelines. Any failure aborts startup.
    pub fn load(data: &DataConfig, params: &TrainingParams) -> Result<Self, LoadError> {
        let chat = Pipeline::load("chat", &data.chat, params)?;
        let emotion = Pipeline::load("emotion", &data.emotion, params)?;
        Ok(Self::new(chat, emotion))
    }

    pub fn chat(&self) -> &Pipeline {
        &self.chat
    }

    pub fn emotion(&self) -> &Pipeline {
        &self.emotion
    }

    /// Run both pipelines independently on the same input
    pub fn respond(&self, input: &str) -> Reply {
        let reply = self.chat.resolve(input);
        let emotion = self.emotion.resolve(input);

        tracing::info!(
            reply_source = reply.source().as_str(),
            emotion_source = emotion.source().as_str(),
            emotion = emotion.label(),
            "Resolved message"
        );

        Reply { reply, emotion }
    }

    pub fn stats(&self) -> ContextStats {
        ContextStats {
            chat_keys: self.chat.lookup.len(),
            chat_labels: self.chat.label_count,
            emotion_keys: self.emotion.lookup.len(),
            emotion_labels: self.emotion.label_count,
        }
    }
}
