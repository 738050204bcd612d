use std::collections::BTreeSet;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

// @module: Token attribute and output kind vocabulary

/// Token attribute requested by an output
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    // @tag: 1-based token position within its group
    Id,
    // @tag: Surface form
    Form,
    // @tag: Lemma
    Lemma,
    // @tag: Part-of-speech tag
    Pos,
    // @tag: Raw text of the token run
    Text,
}

impl Tag {
    // @returns: Lowercase tag identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Form => "form",
            Self::Lemma => "lemma",
            Self::Pos => "pos",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Tag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "form" => Ok(Self::Form),
            "lemma" => Ok(Self::Lemma),
            "pos" => Ok(Self::Pos),
            "text" => Ok(Self::Text),
            _ => Err(anyhow!("Invalid tag: {}", s)),
        }
    }
}

/// Set of token attributes an output wants to see
///
/// Iteration and serialization order is the declaration order of [`Tag`],
/// so two equal sets always serialize identically.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<Tag>);

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// The full vocabulary: every known tag
    pub fn full() -> Self {
        Self::from_tags([Tag::Id, Tag::Form, Tag::Lemma, Tag::Pos, Tag::Text])
    }

    /// Build a set from any collection of tags
    pub fn from_tags<I: IntoIterator<Item = Tag>>(tags: I) -> Self {
        Self(tags.into_iter().collect())
    }

    pub fn insert(&mut self, tag: Tag) {
        self.0.insert(tag);
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.0.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when every tag in `self` is also in `other`
    pub fn is_subset(&self, other: &TagSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Set union, used to compute the batch-wide pivot tag set
    pub fn union(&self, other: &TagSet) -> TagSet {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Output kind produced by the pipeline
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    // @kind: Full pivot tree with metadata
    Pivot,
    // @kind: Filtered pivot as JSON
    #[default]
    Json,
    // @kind: XML re-export for TXM
    Txm,
    // @kind: Token-per-line tabular format
    Conllu,
    // @kind: Plain text for Hyperbase
    Hyperbase,
}

impl OutputKind {
    /// Fixed placement order of outputs within one document's results.
    /// Output files follow this order, not the caller's request order.
    pub const ENCODING_ORDER: [OutputKind; 5] = [
        OutputKind::Pivot,
        OutputKind::Json,
        OutputKind::Txm,
        OutputKind::Conllu,
        OutputKind::Hyperbase,
    ];

    /// File suffix appended to the document name for this kind
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Pivot => ".pivot.json",
            Self::Json => ".json",
            Self::Txm => ".xml",
            Self::Conllu => ".conllu",
            Self::Hyperbase => ".hyperbase.txt",
        }
    }

    // @returns: Lowercase kind identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pivot => "pivot",
            Self::Json => "json",
            Self::Txm => "txm",
            Self::Conllu => "conllu",
            Self::Hyperbase => "hyperbase",
        }
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OutputKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pivot" => Ok(Self::Pivot),
            "json" => Ok(Self::Json),
            "txm" => Ok(Self::Txm),
            "conllu" => Ok(Self::Conllu),
            "hyperbase" => Ok(Self::Hyperbase),
            _ => Err(anyhow!("Invalid output kind: {}", s)),
        }
    }
}
