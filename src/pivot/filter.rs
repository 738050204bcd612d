/*!
 * Tag-set resolver / output filter.
 *
 * Reduces a pivot tree to the token attributes one output asked for.
 * The source tree is never mutated: every output kind filters the same
 * pivot independently, and filtering twice with the same set yields
 * byte-identical JSON. Metadata never survives filtering; it is only
 * surfaced by the unfiltered `pivot` output.
 */

use crate::errors::PipelineError;
use crate::pivot::tags::{Tag, TagSet};
use crate::pivot::tree::{PivotElement, PivotNode, PivotTree, Token, TokenGroup};

/// Produce a filtered copy of `tree` exposing only `tags`.
///
/// Requesting an attribute outside the tree's active set is a
/// configuration error: the pivot was built without it, so there is
/// nothing to expose.
pub fn filter_tree(tree: &PivotTree, tags: &TagSet) -> Result<PivotTree, PipelineError> {
    if !tags.is_subset(&tree.tags) {
        return Err(PipelineError::Configuration(format!(
            "requested tags {:?} exceed the pivot's active tags {:?}",
            tags, tree.tags
        )));
    }

    Ok(PivotTree {
        tags: tags.clone(),
        metadata: None,
        document: filter_node(&tree.document, tags),
    })
}

fn filter_node(node: &PivotNode, tags: &TagSet) -> PivotNode {
    match node {
        PivotNode::Text(text) => PivotNode::Text(text.clone()),
        PivotNode::Tokens(group) => PivotNode::Tokens(filter_group(group, tags)),
        PivotNode::Element(el) => {
            let mut element = PivotElement::new(el.tag.clone());
            element.attrs = el.attrs.clone();
            element.children = el
                .children
                .iter()
                .map(|child| filter_node(child, tags))
                .collect();
            PivotNode::Element(element)
        }
    }
}

fn filter_group(group: &TokenGroup, tags: &TagSet) -> TokenGroup {
    TokenGroup {
        text: if tags.contains(Tag::Text) {
            group.text.clone()
        } else {
            None
        },
        w: group
            .w
            .iter()
            .map(|token| Token {
                id: if tags.contains(Tag::Id) { token.id } else { None },
                form: if tags.contains(Tag::Form) {
                    token.form.clone()
                } else {
                    None
                },
                lemma: if tags.contains(Tag::Lemma) {
                    token.lemma.clone()
                } else {
                    None
                },
                pos: if tags.contains(Tag::Pos) {
                    token.pos.clone()
                } else {
                    None
                },
            })
            .collect(),
    }
}
