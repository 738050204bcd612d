use serde::{Deserialize, Serialize};

use crate::pivot::{OutputKind, TagSet};

// @module: Batch request surface and result types

/// Declared content kind of an input document
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Raw TEI-like markup, goes through the full annotation pass
    #[default]
    Markup,
    /// Pre-built pivot JSON, trusted and passed through verbatim
    Pivot,
    /// Plain text, not processable by this pipeline
    Plain,
    /// Anything the caller could not classify
    Unknown,
}

impl ContentKind {
    /// Classify a file name by extension
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".pivot.json") || lower.ends_with(".json") {
            Self::Pivot
        } else if lower.ends_with(".xml") || lower.ends_with(".tei") {
            Self::Markup
        } else if lower.ends_with(".txt") {
            Self::Plain
        } else {
            Self::Unknown
        }
    }
}

/// One input document, read-only during a run
#[derive(Debug, Clone)]
pub struct Document {
    // @field: Identifier used to derive output file names
    pub name: String,

    // @field: Raw content (markup text or pivot JSON)
    pub content: String,

    // @field: Declared content kind
    pub kind: ContentKind,
}

impl Document {
    pub fn new<S: Into<String>>(name: S, content: S, kind: ContentKind) -> Self {
        Document {
            name: name.into(),
            content: content.into(),
            kind,
        }
    }

    /// A raw markup document
    pub fn markup<S: Into<String>>(name: S, content: S) -> Self {
        Self::new(name, content, ContentKind::Markup)
    }

    /// A pre-built pivot document
    pub fn pivot<S: Into<String>>(name: S, content: S) -> Self {
        Self::new(name, content, ContentKind::Pivot)
    }

    /// Document name with the extension removed, base for output names
    pub fn stem(&self) -> &str {
        let name = &self.name;
        // Strip the double extension of pre-built pivots first
        if let Some(stem) = name.strip_suffix(".pivot.json") {
            return stem;
        }
        match name.rfind('.') {
            Some(dot) if dot > 0 => &name[..dot],
            _ => name,
        }
    }
}

/// One (kind, tag set) pair the caller wants for every document
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRequest {
    pub kind: OutputKind,
    pub tags: TagSet,
}

/// A validated batch request
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    /// Documents in the order results must come back
    pub documents: Vec<Document>,

    /// Output kinds to produce for each document; empty means `[json]`
    pub outputs: Vec<OutputKind>,

    /// Per-output tag sets. Empty means the full set for every output;
    /// a single entry is reused for every output; otherwise the length
    /// must match `outputs`.
    pub tags: Vec<TagSet>,

    /// Tagger variant identifier, resolved against the registry
    pub tagger: String,
}

impl BatchRequest {
    pub fn new<S: Into<String>>(documents: Vec<Document>, tagger: S) -> Self {
        BatchRequest {
            documents,
            outputs: Vec::new(),
            tags: Vec::new(),
            tagger: tagger.into(),
        }
    }

    /// Set the requested output kinds (builder style)
    pub fn with_outputs<I: IntoIterator<Item = OutputKind>>(mut self, outputs: I) -> Self {
        self.outputs = outputs.into_iter().collect();
        self
    }

    /// Set the per-output tag sets (builder style)
    pub fn with_tags<I: IntoIterator<Item = TagSet>>(mut self, tags: I) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }
}

/// One rendered artifact
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    /// Target file name (document stem + kind suffix)
    pub name: String,

    /// Serialized content
    pub content: String,
}

/// One document that could not be processed
#[derive(Debug)]
pub struct DocumentFailure {
    /// Name of the failing document
    pub document: String,

    /// What went wrong
    pub error: crate::errors::PipelineError,
}

/// Result of one batch run: ordered output files plus per-document
/// failures that did not stop the rest of the batch
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub files: Vec<OutputFile>,
    pub failures: Vec<DocumentFailure>,
}
