//! Integration tests for the rule store and recommendation pipeline.
//!
//! Every test works against a real rule file in a temporary directory.

use girder_core::error::GirderError;
use girder_core::model::{Criteria, FieldValue};
use girder_core::rules::RuleStore;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;

fn write_rules(path: &Path, rules: serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(&rules).unwrap()).unwrap();
}

fn criteria(value: serde_json::Value) -> Criteria {
    serde_json::from_value(value).unwrap()
}

fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Test 1: Exact match and fallback on a loaded file
// ---------------------------------------------------------------------------
#[test]
fn exact_and_closest_match_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.json");
    write_rules(
        &path,
        json!([
            { "if": { "SoilType": "Clay", "Floors": 2 }, "then": { "ConcreteGrade": "M20" } }
        ]),
    );
    let store = RuleStore::load(&path).unwrap();

    let exact = store.evaluate(&criteria(json!({ "SoilType": "Clay", "Floors": 2 })));
    assert_eq!(
        exact.exact_match.unwrap()["ConcreteGrade"],
        FieldValue::from("M20")
    );
    assert!(exact.suggestion.is_none());

    let near = store.evaluate(&criteria(json!({ "SoilType": "Clay", "Floors": 3 })));
    assert!(near.exact_match.is_none());
    assert_eq!(
        near.suggestion.unwrap()["ConcreteGrade"],
        FieldValue::from("M20")
    );
    assert_eq!(near.match_score, 1);
}

// ---------------------------------------------------------------------------
// Test 2: Empty store yields the "N/A" placeholder
// ---------------------------------------------------------------------------
#[test]
fn empty_store_suggests_not_available() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.json");
    write_rules(&path, json!([]));
    let store = RuleStore::load(&path).unwrap();

    let result = store.evaluate(&criteria(json!({ "Soil Type": "Clay" })));
    assert!(result.exact_match.is_none());
    let suggestion = result.suggestion.unwrap();
    assert!(!suggestion.is_empty());
    assert!(suggestion.values().all(|v| v.as_text() == Some("N/A")));
    assert_eq!(result.match_score, 0);
}

// ---------------------------------------------------------------------------
// Test 3: add is write-through and the new rule is evaluated last
// ---------------------------------------------------------------------------
#[test]
fn added_rule_is_persisted_and_evaluated_after_existing_rules() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.json");
    write_rules(
        &path,
        json!([
            { "if": { "Soil Type": "Clay", "Floors": 2 }, "then": { "Concrete Grade": "M20" } }
        ]),
    );
    let mut store = RuleStore::load(&path).unwrap();

    store
        .add(&json!({
            "if": { "Soil Type": "Clay", "Floors": 4 },
            "then": { "Concrete Grade": "M25" }
        }))
        .unwrap();
    assert_eq!(store.len(), 2);

    // Both rules score 1 for Clay/7 floors; the earlier rule keeps the tie.
    let tie = store.evaluate(&criteria(json!({ "Soil Type": "Clay", "Floors": 7 })));
    assert_eq!(
        tie.suggestion.unwrap()["Concrete Grade"],
        FieldValue::from("M20")
    );

    let hit = store.evaluate(&criteria(json!({ "Soil Type": "Clay", "Floors": 4 })));
    assert_eq!(
        hit.exact_match.unwrap()["Concrete Grade"],
        FieldValue::from("M25")
    );

    let reloaded = RuleStore::load(&path).unwrap();
    assert_eq!(reloaded.rules(), store.rules());
}

// ---------------------------------------------------------------------------
// Test 4: A rule without `then` is rejected and nothing changes on disk
// ---------------------------------------------------------------------------
#[test]
fn invalid_rule_is_rejected_without_touching_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.json");
    write_rules(
        &path,
        json!([
            { "if": { "Floors": 2 }, "then": { "Concrete Grade": "M20" } }
        ]),
    );
    let before = std::fs::read_to_string(&path).unwrap();
    let mut store = RuleStore::load(&path).unwrap();

    let err = store.add(&json!({ "if": { "Floors": 9 } })).unwrap_err();
    assert!(matches!(err, GirderError::RuleInvalid(_)));
    assert_eq!(store.len(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

// ---------------------------------------------------------------------------
// Test 5: Malformed and missing rule files are surfaced, not emptied
// ---------------------------------------------------------------------------
#[test]
fn malformed_and_missing_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = RuleStore::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, GirderError::RulesNotFound { .. }));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "[{ \"if\": ").unwrap();
    let err = RuleStore::load(&broken).unwrap_err();
    assert!(matches!(err, GirderError::RulesLoad { .. }));
}

// ---------------------------------------------------------------------------
// Test 6: Default rules round-trip through a saved file
// ---------------------------------------------------------------------------
#[test]
fn defaults_saved_and_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("construction_rules.json");
    let store = RuleStore::with_defaults(&path).unwrap();
    store.save().unwrap();

    let reloaded = RuleStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 7);
    assert_eq!(reloaded.rules(), store.rules());

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"if\""));
    assert!(text.contains("    {"));
}

// ---------------------------------------------------------------------------
// Test 7: Raw form input through preprocessing to a recommendation
// ---------------------------------------------------------------------------
#[test]
fn raw_input_recommendation_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = RuleStore::with_defaults(dir.path().join("rules.json")).unwrap();

    let (_, corrosive_clay) = girder_core::recommend(
        &raw(&[
            ("soil_type", "Clay"),
            ("loadBearingCapacity", "75"),
            ("moistureContent", "25"),
            ("floors", "3"),
            ("area", "300"),
            ("windSpeed", "40"),
            ("environment", "Corrosive"),
        ]),
        &store,
    )
    .unwrap();
    let design = corrosive_clay.exact_match.unwrap();
    assert_eq!(design["Concrete Grade"], FieldValue::from("M25"));
    assert_eq!(design["Beam Size (mm)"], FieldValue::from("230 x 450"));

    // A wind-speed range never equals a scalar condition.
    let (criteria, ranged) = girder_core::recommend(
        &raw(&[("soil_type", "Clay"), ("floors", "2"), ("windSpeed", "30-40")]),
        &store,
    )
    .unwrap();
    assert_eq!(criteria["Wind Speed (km/h)"], FieldValue::Range(30, 40));
    assert!(ranged.exact_match.is_none());
    assert_eq!(
        ranged.suggestion.unwrap()["Concrete Grade"],
        FieldValue::from("M20")
    );
    assert_eq!(ranged.match_score, 2);
}

// ---------------------------------------------------------------------------
// Test 8: Preprocessing errors stop before evaluation
// ---------------------------------------------------------------------------
#[test]
fn preprocessing_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = RuleStore::with_defaults(dir.path().join("rules.json")).unwrap();
    let err = girder_core::recommend(&raw(&[("floors", "many")]), &store).unwrap_err();
    assert!(matches!(err, GirderError::Preprocess(_)));
}

// ---------------------------------------------------------------------------
// Test 9: Rock threshold rule only matches the literal marker value
// ---------------------------------------------------------------------------
#[test]
fn rock_threshold_rule_matches_literal_capacity_only() {
    let dir = tempfile::tempdir().unwrap();
    let store = RuleStore::with_defaults(dir.path().join("rules.json")).unwrap();
    let rock = |capacity: i64| {
        criteria(json!({
            "Soil Type": "Rock",
            "Load-Bearing Capacity (kPa)": capacity,
            "Moisture Content (%)": 5,
            "Floors": 10,
            "Area (sq. m)": 1000,
            "Wind Speed (km/h)": 60,
            "Environment": "Normal"
        }))
    };

    let at_marker = store.evaluate(&rock(2000));
    assert_eq!(
        at_marker.exact_match.unwrap()["Concrete Grade"],
        FieldValue::from("M30")
    );

    let above = store.evaluate(&rock(2500));
    assert!(above.exact_match.is_none());
    assert_eq!(
        above.suggestion.unwrap()["Concrete Grade"],
        FieldValue::from("M30")
    );
    assert_eq!(above.match_score, 6);
}

// ---------------------------------------------------------------------------
// Test 10: remove is write-through
// ---------------------------------------------------------------------------
#[test]
fn remove_rule_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.json");
    let store = RuleStore::with_defaults(&path).unwrap();
    store.save().unwrap();

    let mut store = RuleStore::load(&path).unwrap();
    let removed = store.remove(0).unwrap();
    assert_eq!(
        removed.consequence()["Concrete Grade"],
        FieldValue::from("M20")
    );

    let reloaded = RuleStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 6);
    assert_eq!(
        reloaded.rules()[0].conditions()["Soil Type"],
        FieldValue::from("Sand")
    );
}

// ---------------------------------------------------------------------------
// Test 11: Mismatch diagnostics over the default rules
// ---------------------------------------------------------------------------
#[test]
fn suggest_improvements_covers_every_contradicting_rule() {
    let dir = tempfile::tempdir().unwrap();
    let store = RuleStore::with_defaults(dir.path().join("rules.json")).unwrap();
    let c = criteria(json!({ "Soil Type": "Clay", "Floors": 3 }));

    let mismatches = store.suggest_improvements(&c);
    // Rule 3 (Clay, 3 floors) agrees on both fields; every other rule differs.
    assert_eq!(mismatches.len(), 6);
    assert!(mismatches.iter().all(|m| m.rule_index != 3));
    assert!(mismatches
        .windows(2)
        .all(|w| w[0].rule_index < w[1].rule_index));
    assert_eq!(mismatches[0].mismatched_keys, vec!["Floors"]);
}
