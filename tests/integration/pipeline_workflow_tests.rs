/*!
 * End-to-end conversion workflow tests: markup in, every format out,
 * mixed batches of raw markup and pre-built pivots.
 */

use pivotier::pipeline::{BatchRequest, Document};
use pivotier::pivot::{OutputKind, PivotBuilder, PivotTree, Tag, TagSet};
use pivotier::tagger::MockTagger;

use crate::common::{markup_doc, mock_orchestrator, AVARE, BARE_HEADER};

#[tokio::test]
async fn test_fullConversion_shouldProduceEveryRequestedFormat() {
    let request = BatchRequest::new(vec![markup_doc("avare.xml", AVARE)], "french")
        .with_outputs(OutputKind::ENCODING_ORDER);

    let outcome = mock_orchestrator().run(request).await.unwrap();
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.files.len(), 5);

    // The pivot output carries metadata; every other view does not
    let pivot = &outcome.files[0];
    assert!(pivot.content.contains("\"metadata\""));
    assert!(pivot.content.contains("L'Avare"));

    let json = &outcome.files[1];
    assert!(!json.content.contains("\"metadata\""));

    let txm = &outcome.files[2];
    assert!(txm.content.starts_with("<?xml"));
    assert!(txm.content.contains("<w "));

    let conllu = &outcome.files[3];
    assert!(conllu.content.contains("# sent_id = 1"));

    let hyperbase = &outcome.files[4];
    assert!(hyperbase.content.contains("Je vais bien"));
}

#[tokio::test]
async fn test_pivotOutput_shouldRoundTripThroughPrebuiltInput() {
    // First pass: produce a pivot file from markup
    let request = BatchRequest::new(vec![markup_doc("avare.xml", AVARE)], "french")
        .with_outputs([OutputKind::Pivot]);
    let first = mock_orchestrator().run(request).await.unwrap();
    let pivot_file = &first.files[0];

    // Second pass: feed that pivot back as a pre-built document and ask
    // for a filtered view
    let request = BatchRequest::new(
        vec![Document::pivot(pivot_file.name.clone(), pivot_file.content.clone())],
        "french",
    )
    .with_outputs([OutputKind::Json])
    .with_tags([TagSet::from_tags([Tag::Form])]);

    let second = mock_orchestrator().run(request).await.unwrap();
    assert!(second.failures.is_empty());
    let json = &second.files[0];
    assert_eq!(json.name, "avare.json");
    assert!(json.content.contains("\"form\""));
    assert!(!json.content.contains("\"lemma\""));
}

#[tokio::test]
async fn test_mixedBatch_shouldProcessMarkupAndPivotTogether() {
    let fixture_tagger = MockTagger::working();
    let prebuilt = PivotBuilder::new(TagSet::full(), &fixture_tagger)
        .build(BARE_HEADER)
        .unwrap()
        .to_json()
        .unwrap();

    let documents = vec![
        markup_doc("raw.xml", AVARE),
        Document::pivot("built.pivot.json".to_string(), prebuilt),
    ];
    let request = BatchRequest::new(documents, "french")
        .with_outputs([OutputKind::Json, OutputKind::Hyperbase]);

    let outcome = mock_orchestrator().run(request).await.unwrap();
    assert!(outcome.failures.is_empty());

    let names: Vec<&str> = outcome.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        ["raw.json", "raw.hyperbase.txt", "built.json", "built.hyperbase.txt"]
    );
}

#[tokio::test]
async fn test_jsonOutput_shouldDeserializeAsPivotTree() {
    let request = BatchRequest::new(vec![markup_doc("avare.xml", AVARE)], "french")
        .with_outputs([OutputKind::Json])
        .with_tags([TagSet::from_tags([Tag::Id, Tag::Form])]);

    let outcome = mock_orchestrator().run(request).await.unwrap();
    let tree = PivotTree::from_json(&outcome.files[0].content).unwrap();

    assert_eq!(tree.tags, TagSet::from_tags([Tag::Id, Tag::Form]));
    assert!(tree.metadata.is_none());
    assert!(!tree.document.token_groups().is_empty());
}
