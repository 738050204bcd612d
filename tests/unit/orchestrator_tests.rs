/*!
 * Unit tests for batch validation, union tag-set computation,
 * fan-out/fan-in ordering and per-document error isolation.
 */

use pivotier::errors::PipelineError;
use pivotier::pipeline::{BatchRequest, ContentKind, Document, Orchestrator};
use pivotier::pivot::{OutputKind, PivotBuilder, Tag, TagSet};
use pivotier::tagger::MockTagger;

use crate::common::{
    failing_registry, markup_doc, mock_orchestrator, AVARE, BARE_HEADER, NO_TITLE,
};

#[tokio::test]
async fn test_unionTagSet_shouldFeedEveryOutputItsOwnView() {
    // Output A wants {form, pos}, output B wants {lemma}: the pivot is
    // built with the union and each view exposes exactly its own set
    let request = BatchRequest::new(vec![markup_doc("a.xml", BARE_HEADER)], "french")
        .with_outputs([OutputKind::Json, OutputKind::Conllu])
        .with_tags([
            TagSet::from_tags([Tag::Form, Tag::Pos]),
            TagSet::from_tags([Tag::Lemma]),
        ]);

    let outcome = mock_orchestrator().run(request).await.unwrap();
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.files.len(), 2);

    let json = &outcome.files[0];
    assert_eq!(json.name, "a.json");
    assert!(json.content.contains("\"form\""));
    assert!(json.content.contains("\"pos\""));
    assert!(!json.content.contains("\"lemma\""), "lemma must not leak into A");
    assert!(!json.content.contains("\"id\""));

    let conllu = &outcome.files[1];
    assert_eq!(conllu.name, "a.conllu");
    // Lemma column filled, form column blanked
    assert!(conllu.content.contains("\t_\tbonjour\t_"));
}

#[tokio::test]
async fn test_outputOrder_shouldFollowInputOrderAndFixedKindOrder() {
    let documents = vec![
        markup_doc("d1.xml", BARE_HEADER),
        markup_doc("d2.xml", BARE_HEADER),
        markup_doc("d3.xml", BARE_HEADER),
    ];
    // Caller asks for conllu before json; placement still follows the
    // fixed kind order (json before conllu)
    let request = BatchRequest::new(documents, "french")
        .with_outputs([OutputKind::Conllu, OutputKind::Json]);

    let outcome = mock_orchestrator().run(request).await.unwrap();
    let names: Vec<&str> = outcome.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "d1.json", "d1.conllu",
            "d2.json", "d2.conllu",
            "d3.json", "d3.conllu",
        ]
    );
}

#[tokio::test]
async fn test_orderPreservation_shouldSurviveManyParallelWorkers() {
    let documents: Vec<Document> = (0..32)
        .map(|i| markup_doc(&format!("doc{:02}.xml", i), BARE_HEADER))
        .collect();
    let request = BatchRequest::new(documents, "french").with_outputs([OutputKind::Json]);

    let outcome = mock_orchestrator().run(request).await.unwrap();
    let names: Vec<String> = outcome.files.iter().map(|f| f.name.clone()).collect();
    let expected: Vec<String> = (0..32).map(|i| format!("doc{:02}.json", i)).collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_prebuiltPivot_shouldBypassTaggerAndMetadataExtraction() {
    // Build a pivot fixture with a local working tagger
    let fixture_tagger = MockTagger::working();
    let pivot_json = PivotBuilder::new(TagSet::full(), &fixture_tagger)
        .build(AVARE)
        .unwrap()
        .to_json()
        .unwrap();

    // The registry tagger always fails: if the pipeline touched it for a
    // pre-built pivot, the document would fail
    let orchestrator = Orchestrator::new(failing_registry()).with_pool_size(2);
    let request = BatchRequest::new(
        vec![Document::pivot("a.pivot.json".to_string(), pivot_json.clone())],
        "french",
    )
    .with_outputs([OutputKind::Pivot]);

    let outcome = orchestrator.run(request).await.unwrap();
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.files.len(), 1);
    // Content is the pivot verbatim
    assert_eq!(outcome.files[0].content, pivot_json);
    assert_eq!(outcome.files[0].name, "a.pivot.json");
}

#[tokio::test]
async fn test_documentFailure_shouldNotAbortSiblings() {
    let documents = vec![
        markup_doc("ok1.xml", BARE_HEADER),
        markup_doc("bad.xml", NO_TITLE),
        markup_doc("ok2.xml", BARE_HEADER),
    ];
    let request = BatchRequest::new(documents, "french").with_outputs([OutputKind::Json]);

    let outcome = mock_orchestrator().run(request).await.unwrap();

    let names: Vec<&str> = outcome.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["ok1.json", "ok2.json"]);

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].document, "bad.xml");
    assert!(matches!(
        outcome.failures[0].error,
        PipelineError::MalformedDocument(_)
    ));
}

#[tokio::test]
async fn test_unsupportedContentKind_shouldFailPerDocument() {
    let documents = vec![
        Document::new("notes.txt".to_string(), "plain text".to_string(), ContentKind::Plain),
        markup_doc("ok.xml", BARE_HEADER),
    ];
    let request = BatchRequest::new(documents, "french").with_outputs([OutputKind::Json]);

    let outcome = mock_orchestrator().run(request).await.unwrap();
    assert_eq!(outcome.files.len(), 1);
    assert_eq!(outcome.failures.len(), 1);
    assert!(matches!(
        outcome.failures[0].error,
        PipelineError::UnsupportedInput(_)
    ));
}

#[tokio::test]
async fn test_tagListMismatch_shouldAbortBeforeAnyProcessing() {
    let request = BatchRequest::new(vec![markup_doc("a.xml", BARE_HEADER)], "french")
        .with_outputs([OutputKind::Json, OutputKind::Txm, OutputKind::Conllu])
        .with_tags([TagSet::full(), TagSet::full()]);

    let err = mock_orchestrator().run(request).await.unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));
}

#[tokio::test]
async fn test_taggerFailure_shouldBeIsolatedPerDocument() {
    let orchestrator = Orchestrator::new(failing_registry()).with_pool_size(2);
    let request =
        BatchRequest::new(vec![markup_doc("a.xml", BARE_HEADER)], "french")
            .with_outputs([OutputKind::Json]);

    let outcome = orchestrator.run(request).await.unwrap();
    assert!(outcome.files.is_empty());
    assert_eq!(outcome.failures.len(), 1);
    assert!(matches!(outcome.failures[0].error, PipelineError::Tagger(_)));
}

#[tokio::test]
async fn test_fiveKindRequest_shouldProduceFixedOrderPerDocument() {
    let request = BatchRequest::new(vec![markup_doc("a.xml", AVARE)], "french").with_outputs([
        OutputKind::Hyperbase,
        OutputKind::Conllu,
        OutputKind::Txm,
        OutputKind::Json,
        OutputKind::Pivot,
    ]);

    let outcome = mock_orchestrator().run(request).await.unwrap();
    let names: Vec<&str> = outcome.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        ["a.pivot.json", "a.json", "a.xml", "a.conllu", "a.hyperbase.txt"]
    );
}
