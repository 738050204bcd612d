/*!
 * Unit tests for the format encoders over one shared pivot fixture.
 */

use pivotier::encoders;
use pivotier::pivot::{filter_tree, OutputKind, PivotBuilder, PivotTree, Tag, TagSet};
use pivotier::tagger::MockTagger;

use crate::common::AVARE;

fn full_tree() -> PivotTree {
    let tagger = MockTagger::working();
    PivotBuilder::new(TagSet::full(), &tagger).build(AVARE).unwrap()
}

fn view(tags: TagSet) -> PivotTree {
    filter_tree(&full_tree(), &tags).unwrap()
}

#[test]
fn test_pivotKind_shouldSerializeMetadata() {
    let out = encoders::encode(OutputKind::Pivot, &full_tree()).unwrap();
    assert!(out.contains("\"metadata\""));
    assert!(out.contains("L'Avare"));
}

#[test]
fn test_jsonKind_shouldSerializeFilteredViewWithoutMetadata() {
    let out = encoders::encode(
        OutputKind::Json,
        &view(TagSet::from_tags([Tag::Form])),
    )
    .unwrap();
    assert!(!out.contains("\"metadata\""));
    assert!(out.contains("\"form\""));
    assert!(!out.contains("\"lemma\""));
}

#[test]
fn test_txmKind_shouldProduceWellFormedTokenMarkup() {
    let out = encoders::encode(
        OutputKind::Txm,
        &view(TagSet::from_tags([Tag::Id, Tag::Form, Tag::Pos])),
    )
    .unwrap();

    assert!(out.starts_with("<?xml"));
    assert!(out.contains(r#"<w id="1" pos="WORD">Je</w>"#));
    // The re-export parses back as markup
    assert!(pivotier::markup::parse_markup(&out).is_ok());
}

#[test]
fn test_conlluKind_shouldEmitTenColumns() {
    let out = encoders::encode(
        OutputKind::Conllu,
        &view(TagSet::from_tags([Tag::Id, Tag::Form, Tag::Lemma, Tag::Pos])),
    )
    .unwrap();

    let token_line = out
        .lines()
        .find(|l| !l.starts_with('#') && !l.is_empty())
        .unwrap();
    assert_eq!(token_line.split('\t').count(), 10);
}

#[test]
fn test_hyperbaseKind_shouldEmitPlainForms() {
    let out = encoders::encode(
        OutputKind::Hyperbase,
        &view(TagSet::from_tags([Tag::Form])),
    )
    .unwrap();

    assert!(out.contains("Je vais bien"));
    assert!(out.contains("Et moi donc"));
    assert!(!out.contains('<'));
    assert!(!out.contains('{'));
}

#[test]
fn test_everyKind_shouldBeDeterministic() {
    for kind in OutputKind::ENCODING_ORDER {
        let tags = TagSet::from_tags([Tag::Id, Tag::Form, Tag::Lemma, Tag::Pos]);
        let first = encoders::encode(kind, &view(tags.clone())).unwrap();
        let second = encoders::encode(kind, &view(tags)).unwrap();
        assert_eq!(first, second, "encoder {} is not pure", kind);
    }
}
