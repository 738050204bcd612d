/*!
 * Unit tests for header metadata extraction and its degradation rules.
 */

use pivotier::errors::PipelineError;
use pivotier::markup::parse_markup;
use pivotier::pivot::{Metadata, MetadataExtractor};

use crate::common::{AVARE, BARE_HEADER, NO_TITLE};

fn extract(xml: &str) -> Result<Metadata, PipelineError> {
    let root = parse_markup(xml).unwrap();
    MetadataExtractor::extract(&root)
}

#[test]
fn test_fullDocument_shouldYieldEveryMetadataSection() {
    let meta = extract(AVARE).unwrap();

    assert_eq!(meta.title.as_deref(), Some("L'Avare"));
    assert_eq!(meta.edition.as_deref(), Some("Nouvelle édition"));
    assert_eq!(meta.publication.as_deref(), Some("CNRS"));
    assert_eq!(meta.date.as_deref(), Some("1682"));
    // Source text is whitespace-normalized
    assert_eq!(meta.source.as_deref(), Some("Paris, chez Denys Thierry"));

    let cast = meta.cast.unwrap();
    assert_eq!(cast.len(), 2);
    assert_eq!(cast[0].id, "harpagon");
    assert_eq!(cast[0].display, "HARPAGON, père de Cléante");
    assert_eq!(cast[1].id, "cleante");

    let parties = meta.responsibilities.unwrap();
    assert_eq!(parties.len(), 1);
    assert_eq!(parties[0].name, "Rasmussen");
    assert_eq!(parties[0].role, "encoding");
}

#[test]
fn test_titleOnlyHeader_shouldDefaultEveryOptionalField() {
    let meta = extract(BARE_HEADER).unwrap();

    assert_eq!(meta.title.as_deref(), Some("Dom Juan"));
    assert_eq!(meta.edition.as_deref(), Some("N/A"));
    assert_eq!(meta.publication.as_deref(), Some("N/A"));
    assert_eq!(meta.date.as_deref(), Some("N/A"));
    assert_eq!(meta.source.as_deref(), Some("N/A"));
}

#[test]
fn test_missingTitle_shouldFailEvenWithOtherFieldsPresent() {
    let err = extract(NO_TITLE).unwrap_err();
    assert!(matches!(err, PipelineError::MalformedDocument(_)));
}

#[test]
fn test_missingCastList_shouldOmitKeyNotEmptyList() {
    let meta = extract(BARE_HEADER).unwrap();
    assert!(meta.cast.is_none());

    // The serialized record must not contain the key at all
    let json = serde_json::to_string(&meta).unwrap();
    assert!(!json.contains("\"cast\""));
}

#[test]
fn test_presentButEmptyCastList_shouldKeepEmptyList() {
    let meta = extract(
        r#"<TEI><teiHeader><title>T</title></teiHeader>
           <text><castList></castList></text></TEI>"#,
    )
    .unwrap();

    assert_eq!(meta.cast, Some(Vec::new()));
    let json = serde_json::to_string(&meta).unwrap();
    assert!(json.contains("\"cast\":[]"));
}

#[test]
fn test_metadataSerialization_shouldUseStableKeys() {
    let meta = extract(AVARE).unwrap();
    let json = serde_json::to_string(&meta).unwrap();

    for key in ["title", "edition", "publication", "date", "source", "cast", "responsibilities"] {
        assert!(json.contains(&format!("\"{}\"", key)), "missing key {}", key);
    }
}
