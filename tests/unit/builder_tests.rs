/*!
 * Unit tests for the markup-to-pivot transformation.
 */

use pivotier::errors::PipelineError;
use pivotier::pivot::{PivotBuilder, PivotNode, Tag, TagSet};
use pivotier::tagger::MockTagger;

use crate::common::{AVARE, BARE_HEADER};

fn build(tags: TagSet, raw: &str) -> pivotier::pivot::PivotTree {
    let tagger = MockTagger::working();
    PivotBuilder::new(tags, &tagger).build(raw).unwrap()
}

#[test]
fn test_build_shouldTokenizeEveryBodyTextRun() {
    let tree = build(TagSet::full(), AVARE);

    let groups = tree.document.token_groups();
    // Two speeches plus two cast entries (castList lives inside <text>)
    assert!(groups.len() >= 2);

    let forms: Vec<String> = groups
        .iter()
        .flat_map(|g| g.w.iter().filter_map(|t| t.form.clone()))
        .collect();
    assert!(forms.contains(&"vais".to_string()));
    assert!(forms.contains(&"donc".to_string()));
}

#[test]
fn test_build_shouldNumberTokensPerGroupNotGlobally() {
    let tree = build(TagSet::full(), AVARE);

    for group in tree.document.token_groups() {
        for (position, token) in group.w.iter().enumerate() {
            assert_eq!(token.id, Some((position + 1) as u32));
        }
    }
}

#[test]
fn test_build_shouldCarryHeaderSubtreeUntokenized() {
    let tree = build(TagSet::full(), AVARE);
    let root = tree.document.as_element().unwrap();

    let header = root
        .children
        .iter()
        .find_map(|c| c.as_element().filter(|el| el.tag == "teiHeader"))
        .expect("header should be carried into the pivot");

    fn no_tokens(node: &PivotNode) -> bool {
        match node {
            PivotNode::Tokens(_) => false,
            PivotNode::Text(_) => true,
            PivotNode::Element(el) => el.children.iter().all(no_tokens),
        }
    }
    for child in &header.children {
        assert!(no_tokens(child), "header must never be tokenized");
    }
}

#[test]
fn test_build_shouldAttachMetadataRecord() {
    let tree = build(TagSet::full(), BARE_HEADER);
    let meta = tree.metadata.expect("markup documents always carry metadata");
    assert_eq!(meta.title.as_deref(), Some("Dom Juan"));
}

#[test]
fn test_build_shouldRecordActiveTagSet() {
    let tags = TagSet::from_tags([Tag::Form, Tag::Lemma]);
    let tree = build(tags.clone(), BARE_HEADER);
    assert_eq!(tree.tags, tags);
}

#[test]
fn test_buildWithEmptyTagSet_shouldKeepEveryAttribute() {
    let tree = build(TagSet::new(), BARE_HEADER);
    assert_eq!(tree.tags, TagSet::full());

    let groups = tree.document.token_groups();
    let token = &groups[0].w[0];
    assert!(token.id.is_some());
    assert!(token.form.is_some());
    assert!(token.lemma.is_some());
    assert!(token.pos.is_some());
}

#[test]
fn test_build_shouldPreserveElementAttributes() {
    let tree = build(TagSet::full(), AVARE);
    let json = tree.to_json().unwrap();
    assert!(json.contains(r#""who": "harpagon""#));
}

#[test]
fn test_build_shouldBeDeterministic() {
    let first = build(TagSet::full(), AVARE).to_json().unwrap();
    let second = build(TagSet::full(), AVARE).to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_build_shouldFailOnUnparsableMarkup() {
    let tagger = MockTagger::working();
    let err = PivotBuilder::new(TagSet::full(), &tagger)
        .build("<TEI><text>broken")
        .unwrap_err();
    assert!(matches!(err, PipelineError::StructuralRewrite(_)));
}
