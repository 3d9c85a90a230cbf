//! Chat-platform webhook normalizers.
//!
//! WhatsApp payloads are field-sniffed into an intent; Telegram updates are
//! parsed as bot commands. Pipeline outcomes go back to the platform in its
//! own reply shape at HTTP 200, so delivered webhooks are not retried.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::routes::AppState;
use crate::core::message::{Message, PipelineResult};

// ============================================================================
// WhatsApp
// ============================================================================

pub async fn whatsapp(State(state): State<AppState>, Json(payload): Json<Value>) -> Response {
    let message = match normalize_whatsapp(&payload) {
        Some(message) => message,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "status": "error",
                    "error": "Unrecognized webhook payload: expected tour_id or content_url",
                })),
            )
                .into_response();
        }
    };

    let result = state.router.dispatch(&message).await;
    Json(result).into_response()
}

/// Picks the intent from the fields present: `tour_id` wins, then
/// `content_url`; anything else is unusable.
fn normalize_whatsapp(payload: &Value) -> Option<Message> {
    if let Some(tour_id) = payload.get("tour_id").and_then(Value::as_str) {
        let needs = payload
            .get("customization")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        return Some(Message::trip_customization(tour_id, needs));
    }
    if let Some(content_url) = payload.get("content_url").and_then(Value::as_str) {
        return Some(Message::content_creation(content_url));
    }
    None
}

// ============================================================================
// Telegram
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TelegramUpdate {
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramMessage {
    pub chat: TelegramChat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
}

pub async fn telegram(
    State(state): State<AppState>,
    Json(update): Json<TelegramUpdate>,
) -> Json<Value> {
    // Non-text updates are acknowledged without a reply so Telegram moves on
    let Some(message) = update.message else {
        return Json(json!({}));
    };
    let Some(text) = message.text.as_deref() else {
        return Json(json!({}));
    };
    let chat_id = message.chat.id;

    let reply_text = match parse_command(text) {
        Command::CustomizeTrip { tour_id, needs } => {
            let mut needs_map = Map::new();
            if let Some(needs) = needs {
                needs_map.insert("text".to_string(), Value::String(needs));
            }
            let message = Message::trip_customization(&tour_id, needs_map);
            render_result(&state.router.dispatch(&message).await)
        }
        Command::CreateContent { url } => {
            let message = Message::content_creation(&url);
            render_result(&state.router.dispatch(&message).await)
        }
        Command::Usage(usage) => usage.to_string(),
        Command::Unknown => "Unknown command. Try /customizetrip or /createcontent.".to_string(),
    };

    Json(send_message(chat_id, &reply_text))
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    CustomizeTrip {
        tour_id: String,
        needs: Option<String>,
    },
    CreateContent {
        url: String,
    },
    Usage(&'static str),
    Unknown,
}

fn parse_command(text: &str) -> Command {
    let mut parts = text.split_whitespace();
    match parts.next() {
        Some("/customizetrip") => match parts.next() {
            Some(tour_id) => {
                let rest = parts.collect::<Vec<_>>().join(" ");
                Command::CustomizeTrip {
                    tour_id: tour_id.to_string(),
                    needs: if rest.is_empty() { None } else { Some(rest) },
                }
            }
            None => Command::Usage("Usage: /customizetrip <tour_id> [customization needs]"),
        },
        Some("/createcontent") => match parts.next() {
            Some(url) => Command::CreateContent {
                url: url.to_string(),
            },
            None => Command::Usage("Usage: /createcontent <video_url>"),
        },
        _ => Command::Unknown,
    }
}

/// Telegram webhook-reply form: answering the webhook with a method executes
/// it, so no outbound bot call is needed.
fn send_message(chat_id: i64, text: &str) -> Value {
    json!({
        "method": "sendMessage",
        "chat_id": chat_id,
        "text": text,
    })
}

fn render_result(result: &PipelineResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "Internal rendering error".to_string())
}
