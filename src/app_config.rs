use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::pipeline::ModelPolicy;
use crate::pivot::{OutputKind, TagSet};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Tagger config
    #[serde(default)]
    pub tagger: TaggerConfig,

    /// Pipeline config
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tagger: TaggerConfig::default(),
            pipeline: PipelineSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        if self.tagger.variant.trim().is_empty() {
            return Err(anyhow!("tagger.variant must not be empty"));
        }

        if !self.tagger.use_mock && self.tagger.treetagger_path.trim().is_empty() {
            return Err(anyhow!(
                "tagger.treetagger_path must point at a TreeTagger install (or set tagger.use_mock)"
            ));
        }

        if self.pipeline.workers == 0 {
            return Err(anyhow!("pipeline.workers must be at least 1"));
        }

        if !self.pipeline.tags.is_empty()
            && self.pipeline.tags.len() != 1
            && self.pipeline.tags.len() != self.pipeline.outputs.len()
        {
            return Err(anyhow!(
                "pipeline.tags must be empty, a single set, or one set per output"
            ));
        }

        Ok(())
    }
}

/// Tokenizer/tagger configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TaggerConfig {
    // @field: Language variant identifier
    #[serde(default = "default_tagger_variant")]
    pub variant: String,

    // @field: TreeTagger install directory
    #[serde(default = "default_treetagger_path")]
    pub treetagger_path: String,

    // @field: Worker handle policy (shared or replicate)
    #[serde(default)]
    pub model_policy: ModelPolicy,

    // @field: Use the deterministic mock tagger instead of TreeTagger
    #[serde(default)]
    pub use_mock: bool,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        TaggerConfig {
            variant: default_tagger_variant(),
            treetagger_path: default_treetagger_path(),
            model_policy: ModelPolicy::default(),
            use_mock: false,
        }
    }
}

/// Batch pipeline configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineSettings {
    // @field: Max parallel document workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    // @field: Output kinds produced for every document
    #[serde(default = "default_outputs")]
    pub outputs: Vec<OutputKind>,

    // @field: Per-output tag sets (empty = full set everywhere)
    #[serde(default)]
    pub tags: Vec<TagSet>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            workers: default_workers(),
            outputs: default_outputs(),
            tags: Vec::new(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_tagger_variant() -> String {
    "french".to_string()
}

fn default_treetagger_path() -> String {
    "/opt/treetagger".to_string()
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(usize::from)
        .unwrap_or(1)
}

fn default_outputs() -> Vec<OutputKind> {
    vec![OutputKind::Json]
}
