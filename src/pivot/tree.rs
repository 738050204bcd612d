use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::pivot::metadata::Metadata;
use crate::pivot::tags::TagSet;

// @module: Pivot tree data model

/// One tagged word occurrence.
///
/// A field is present only when the tag set active at build time asked
/// for it. `id` is the 1-based position of the token within its group,
/// never globally unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
}

/// Ordered tokens replacing one contiguous text run of the source markup.
///
/// `text` carries the normalized source run and survives only while
/// `Tag::Text` is in the active tag set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub w: Vec<Token>,
}

/// A pivot element mirrors a markup element, with rewritten children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotElement {
    pub tag: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PivotNode>,
}

impl PivotElement {
    pub fn new<S: Into<String>>(tag: S) -> Self {
        PivotElement {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }
}

/// One node of the pivot tree.
///
/// `Text` carries untokenized text verbatim: header subtrees are copied
/// into the pivot without annotation, only the document body is rewritten
/// into token groups.
///
/// Serialized shapes are disjoint, so the enum round-trips untagged:
/// a token group is a map with a `w` key, an element is a map with a
/// `tag` key, untokenized text is a bare string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PivotNode {
    Tokens(TokenGroup),
    Element(PivotElement),
    Text(String),
}

impl PivotNode {
    /// The element inside this node, if it is one
    pub fn as_element(&self) -> Option<&PivotElement> {
        match self {
            PivotNode::Element(el) => Some(el),
            _ => None,
        }
    }

    /// All token groups in this subtree, in document order
    pub fn token_groups(&self) -> Vec<&TokenGroup> {
        let mut groups = Vec::new();
        self.collect_groups(&mut groups);
        groups
    }

    fn collect_groups<'a>(&'a self, groups: &mut Vec<&'a TokenGroup>) {
        match self {
            PivotNode::Tokens(g) => groups.push(g),
            PivotNode::Element(el) => {
                for child in &el.children {
                    child.collect_groups(groups);
                }
            }
            PivotNode::Text(_) => {}
        }
    }
}

/// The canonical intermediate document: a rewritten tree, the tag set it
/// was built with, and the metadata record extracted from its header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTree {
    /// Tag set the token groups were built with
    pub tags: TagSet,

    /// Extracted metadata, surfaced only in the `pivot` output kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Rewritten document tree
    pub document: PivotNode,
}

impl PivotTree {
    /// Serialize to the pretty JSON shape shared by the pivot and json outputs
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a pre-built pivot document
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
