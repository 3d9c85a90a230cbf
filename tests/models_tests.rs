use serde_json::{Map, Value, json};

use safar::core::models::TourPackage;
use safar::errors::AgentError;

fn base_package() -> TourPackage {
    let mut package = TourPackage::new(
        "T1",
        "Rome",
        5,
        vec!["walking tour".to_string(), "museum pass".to_string()],
    );
    package
        .extra
        .insert("price_eur".to_string(), json!(950));
    package
}

fn mods(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_customized_from_overlays_modified_fields() {
    let base = base_package();
    let customized = TourPackage::customized_from(
        &base,
        &mods(json!({
            "duration": 7,
            "activities": ["walking tour", "cooking class"]
        })),
    )
    .unwrap();

    assert_eq!(customized.destination, "Rome");
    assert_eq!(customized.duration, 7);
    assert_eq!(
        customized.activities,
        vec!["walking tour".to_string(), "cooking class".to_string()]
    );
    // Untouched extras carry over
    assert_eq!(customized.extra["price_eur"], json!(950));
}

#[test]
fn test_customized_from_marks_derivation() {
    let base = base_package();
    let customized = TourPackage::customized_from(&base, &Map::new()).unwrap();

    assert!(customized.is_customized);
    assert_eq!(customized.original_package_id.as_deref(), Some("T1"));
    // The store assigns the new identifier, not the derivation
    assert!(customized.id.is_empty());
}

#[test]
fn test_customized_from_ignores_spoofed_control_fields() {
    // A completion reply cannot un-mark the derivation or pick its own id
    let base = base_package();
    let customized = TourPackage::customized_from(
        &base,
        &mods(json!({
            "_id": "HACK",
            "is_customized": false,
            "original_package_id": "FAKE"
        })),
    )
    .unwrap();

    assert!(customized.id.is_empty());
    assert!(customized.is_customized);
    assert_eq!(customized.original_package_id.as_deref(), Some("T1"));
}

#[test]
fn test_customized_from_accepts_new_extra_fields() {
    let base = base_package();
    let customized = TourPackage::customized_from(
        &base,
        &mods(json!({"hotel_upgrade": "riverside suite"})),
    )
    .unwrap();

    assert_eq!(customized.extra["hotel_upgrade"], json!("riverside suite"));
    assert_eq!(customized.extra["price_eur"], json!(950));
}

#[test]
fn test_customized_from_rejects_type_mismatches() {
    let base = base_package();
    let result = TourPackage::customized_from(&base, &mods(json!({"duration": "a week"})));

    assert!(matches!(result, Err(AgentError::Generation(_))));
}

#[test]
fn test_customized_from_leaves_the_base_untouched() {
    let base = base_package();
    let _ = TourPackage::customized_from(&base, &mods(json!({"duration": 9}))).unwrap();

    assert_eq!(base.duration, 5);
    assert!(!base.is_customized);
    assert!(base.original_package_id.is_none());
}

#[test]
fn test_package_serializes_id_as_underscore_id() {
    let package = base_package();
    let value = serde_json::to_value(&package).unwrap();

    assert_eq!(value["_id"], "T1");
    assert!(value.get("id").is_none());
    assert_eq!(value["price_eur"], json!(950));
}
