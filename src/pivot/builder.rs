/*!
 * Pivot builder: rewrites a parsed markup tree into the canonical pivot
 * tree, replacing every text run of the document body with a tokenized,
 * attribute-tagged token group.
 *
 * Header subtrees are carried into the pivot untouched; only the body
 * (the `text` child of the document wrapper, or the whole tree when the
 * wrapper is absent) is rewritten. The transformation is pure given
 * deterministic tagger output.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::PipelineError;
use crate::markup::{parse_markup, Element, MarkupNode};
use crate::pivot::metadata::{squeeze_whitespace, MetadataExtractor};
use crate::pivot::tags::{Tag, TagSet};
use crate::pivot::tree::{PivotElement, PivotNode, PivotTree, Token, TokenGroup};
use crate::tagger::Tagger;

// @const: Emphasis wrapper regex, kept only for its inner text
static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<hi rend="\w+">([^<]+)</hi>"#).unwrap());

/// Collapse runs of one repeated whitespace character to a single
/// instance and trim. Mixed whitespace sequences are left alone; full
/// normalization happens per text run at tokenization time.
fn collapse_repeated_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if c.is_whitespace() && prev == Some(c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out.trim().to_string()
}

/// Raw text preprocessing applied before parsing
fn preprocess(raw: &str) -> String {
    let collapsed = collapse_repeated_whitespace(raw);
    EMPHASIS.replace_all(&collapsed, "$1").to_string()
}

/// Rewrites raw markup into a [`PivotTree`] using an external tagger
pub struct PivotBuilder<'a> {
    /// Active tag set: the union of every requested output's tags
    tags: TagSet,
    /// Tokenizer/tagger handle, read-only per call
    tagger: &'a dyn Tagger,
}

impl<'a> PivotBuilder<'a> {
    /// Create a builder for an active tag set. An empty set means every
    /// attribute is kept.
    pub fn new(tags: TagSet, tagger: &'a dyn Tagger) -> Self {
        let tags = if tags.is_empty() { TagSet::full() } else { tags };
        PivotBuilder { tags, tagger }
    }

    /// Transform one document's raw markup text into a pivot tree
    pub fn build(&self, raw: &str) -> Result<PivotTree, PipelineError> {
        let text = preprocess(raw);
        let root = parse_markup(&text)?;
        self.build_from_tree(&root)
    }

    /// Transform an already-parsed markup tree into a pivot tree
    pub fn build_from_tree(&self, root: &Element) -> Result<PivotTree, PipelineError> {
        // Metadata reads the original tree, independent of the rewrite
        let metadata = MetadataExtractor::extract(root)?;

        let document = self.rewrite_document(root)?;

        Ok(PivotTree {
            tags: self.tags.clone(),
            metadata: Some(metadata),
            document,
        })
    }

    /// Rewrite the body under the document wrapper, carrying the rest
    /// verbatim. A document without the wrapper (or a wrapper without a
    /// body) is rewritten whole at its root.
    fn rewrite_document(&self, root: &Element) -> Result<PivotNode, PipelineError> {
        let is_wrapper = root.name == "TEI" || root.name == "tei";
        if !is_wrapper || root.child("text").is_none() {
            return self.rewrite(&MarkupNode::Element(root.clone()));
        }

        let mut element = PivotElement::new(root.name.clone());
        element.attrs = root.attributes.clone();
        for child in &root.children {
            let rewritten = match child {
                MarkupNode::Element(el) if el.name == "text" => self.rewrite(child)?,
                other => Self::carry(other),
            };
            element.children.push(rewritten);
        }
        Ok(PivotNode::Element(element))
    }

    /// Depth-first rewrite: text runs become token groups, elements
    /// recurse into their children
    fn rewrite(&self, node: &MarkupNode) -> Result<PivotNode, PipelineError> {
        match node {
            MarkupNode::Text(text) => Ok(PivotNode::Tokens(self.tokenize(text)?)),
            MarkupNode::Element(el) => {
                let mut element = PivotElement::new(el.name.clone());
                element.attrs = el.attributes.clone();
                element.children = el
                    .children
                    .iter()
                    .map(|child| self.rewrite(child))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PivotNode::Element(element))
            }
        }
    }

    /// Verbatim conversion with no tokenization, used for header subtrees
    fn carry(node: &MarkupNode) -> PivotNode {
        match node {
            MarkupNode::Text(text) => PivotNode::Text(text.clone()),
            MarkupNode::Element(el) => {
                let mut element = PivotElement::new(el.name.clone());
                element.attrs = el.attributes.clone();
                element.children = el.children.iter().map(Self::carry).collect();
                PivotNode::Element(element)
            }
        }
    }

    /// Tokenize one text run and keep only the active attributes.
    /// Token ids are synthesized as 1-based positions within the group.
    fn tokenize(&self, raw: &str) -> Result<TokenGroup, PipelineError> {
        let text = squeeze_whitespace(raw);
        let tagged = self.tagger.tag(&text).map_err(PipelineError::Tagger)?;

        let tokens = tagged
            .iter()
            .enumerate()
            .map(|(i, token)| Token {
                id: self.tags.contains(Tag::Id).then(|| (i + 1) as u32),
                form: self.tags.contains(Tag::Form).then(|| token.form.clone()),
                lemma: self.tags.contains(Tag::Lemma).then(|| token.lemma.clone()),
                pos: self.tags.contains(Tag::Pos).then(|| token.pos.clone()),
            })
            .collect();

        Ok(TokenGroup {
            text: self.tags.contains(Tag::Text).then_some(text),
            w: tokens,
        })
    }
}
