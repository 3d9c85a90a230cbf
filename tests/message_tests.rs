use serde_json::{Map, Value, json};

use safar::core::message::{Intent, Message, PipelineResult, Status};
use safar::errors::AgentError;

#[test]
fn test_message_deserializes_type_and_flattened_payload() {
    let message: Message = serde_json::from_value(json!({
        "type": "trip_planner",
        "tour_id": "T1",
        "customization_needs": {"text": "slower pace"}
    }))
    .unwrap();

    assert_eq!(message.intent, Intent::TripPlanner);
    assert_eq!(message.str_field("tour_id"), Some("T1"));
    assert_eq!(
        message.map_field("customization_needs").unwrap()["text"],
        json!("slower pace")
    );
}

#[test]
fn test_message_rejects_unknown_intents() {
    let result: Result<Message, _> = serde_json::from_value(json!({
        "type": "weather_oracle",
        "city": "Rome"
    }));

    assert!(result.is_err());
}

#[test]
fn test_message_serializes_back_to_the_wire_shape() {
    let mut needs = Map::new();
    needs.insert("text".to_string(), json!("add a cooking class"));
    let message = Message::trip_customization("T1", needs);

    let value = serde_json::to_value(&message).unwrap();
    assert_eq!(value["type"], "trip_planner");
    assert_eq!(value["tour_id"], "T1");
    assert_eq!(value["customization_needs"]["text"], "add a cooking class");
}

#[test]
fn test_content_creation_defaults_to_youtube() {
    let message = Message::content_creation("https://youtube.com/watch?v=abc");

    assert_eq!(message.intent, Intent::ContentCreator);
    assert_eq!(message.str_field("content_type"), Some("youtube"));
    assert_eq!(
        message.str_field("content_url"),
        Some("https://youtube.com/watch?v=abc")
    );
}

#[test]
fn test_with_field_replaces_existing_values() {
    let message = Message::content_creation("https://youtube.com/watch?v=abc")
        .with_field("content_type", Value::String("vimeo".to_string()))
        .with_field("platform", Value::String("instagram".to_string()));

    assert_eq!(message.str_field("content_type"), Some("vimeo"));
    assert_eq!(message.str_field("platform"), Some("instagram"));
}

#[test]
fn test_field_accessors_ignore_wrong_types() {
    let message =
        Message::content_creation("https://youtube.com/watch?v=abc").with_field("count", json!(3));

    assert_eq!(message.str_field("count"), None);
    assert_eq!(message.map_field("count"), None);
    assert_eq!(message.str_field("missing"), None);
}

#[test]
fn test_success_envelope_flattens_data_next_to_status() {
    let mut data = Map::new();
    data.insert("caption".to_string(), json!("Rome at golden hour"));
    data.insert("platform".to_string(), json!("instagram"));
    let result = PipelineResult::success(data);

    assert!(result.is_success());
    assert_eq!(result.error_kind(), None);
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "status": "success",
            "caption": "Rome at golden hour",
            "platform": "instagram"
        })
    );
}

#[test]
fn test_error_envelope_carries_message_and_kind() {
    let result = PipelineResult::error(AgentError::NotFound("T9".to_string()));

    assert!(!result.is_success());
    assert_eq!(result.status, Status::Error);
    assert_eq!(result.error_kind(), Some("not_found"));
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "status": "error",
            "error": "Tour package not found: T9",
            "error_kind": "not_found"
        })
    );
}

#[test]
fn test_intent_names_match_the_wire_strings() {
    assert_eq!(Intent::ContentCreator.as_str(), "content_creator");
    assert_eq!(Intent::TripPlanner.as_str(), "trip_planner");
    assert_eq!(
        serde_json::to_value(Intent::ContentCreator).unwrap(),
        json!("content_creator")
    );
}
