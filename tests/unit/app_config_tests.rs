/*!
 * Unit tests for configuration loading, defaults and validation.
 */

use pivotier::app_config::{Config, LogLevel};
use pivotier::pipeline::ModelPolicy;
use pivotier::pivot::{OutputKind, Tag, TagSet};

#[test]
fn test_defaultConfig_shouldUseFrenchVariantAndJsonOutput() {
    let config = Config::default();
    assert_eq!(config.tagger.variant, "french");
    assert_eq!(config.tagger.model_policy, ModelPolicy::Shared);
    assert_eq!(config.pipeline.outputs, vec![OutputKind::Json]);
    assert!(config.pipeline.tags.is_empty());
    assert!(config.pipeline.workers >= 1);
}

#[test]
fn test_parseConfig_shouldAcceptPartialJson() {
    let config: Config = serde_json::from_str(
        r#"{
            "tagger": { "variant": "old_french", "use_mock": true },
            "pipeline": { "outputs": ["pivot", "conllu"] }
        }"#,
    )
    .unwrap();

    assert_eq!(config.tagger.variant, "old_french");
    assert!(config.tagger.use_mock);
    assert_eq!(
        config.pipeline.outputs,
        vec![OutputKind::Pivot, OutputKind::Conllu]
    );
    // Unspecified sections fall back to defaults
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parseConfig_shouldReadModelPolicy() {
    let config: Config = serde_json::from_str(
        r#"{ "tagger": { "model_policy": "replicate" } }"#,
    )
    .unwrap();
    assert_eq!(config.tagger.model_policy, ModelPolicy::Replicate);
}

#[test]
fn test_parseConfig_shouldReadTagSets() {
    let config: Config = serde_json::from_str(
        r#"{ "pipeline": { "outputs": ["json", "txm"], "tags": [["form","pos"], ["lemma"]] } }"#,
    )
    .unwrap();

    assert_eq!(config.pipeline.tags.len(), 2);
    assert_eq!(
        config.pipeline.tags[0],
        TagSet::from_tags([Tag::Form, Tag::Pos])
    );
    assert_eq!(config.pipeline.tags[1], TagSet::from_tags([Tag::Lemma]));
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_shouldRejectTagListLongerThanOutputs() {
    let config: Config = serde_json::from_str(
        r#"{ "pipeline": { "outputs": ["json"], "tags": [["form"], ["pos"]] } }"#,
    )
    .unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_shouldAcceptSingleReusableTagSet() {
    let config: Config = serde_json::from_str(
        r#"{ "pipeline": { "outputs": ["json", "txm", "conllu"], "tags": [["form"]] } }"#,
    )
    .unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn test_roundTrip_shouldPreserveEverySection() {
    let mut config = Config::default();
    config.tagger.variant = "french_spoken".to_string();
    config.tagger.model_policy = ModelPolicy::Replicate;
    config.pipeline.outputs = vec![OutputKind::Hyperbase];
    config.log_level = LogLevel::Debug;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(back.tagger.variant, "french_spoken");
    assert_eq!(back.tagger.model_policy, ModelPolicy::Replicate);
    assert_eq!(back.pipeline.outputs, vec![OutputKind::Hyperbase]);
    assert_eq!(back.log_level, LogLevel::Debug);
}
