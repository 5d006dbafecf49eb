//! Human-readable messages for Partner API error responses
//!
//! The Partner API answers failures with a handful of body shapes. The
//! message is derived from the body with this precedence:
//! 1. a JSON object with exactly one key → `"<Key>: <Value>."`
//! 2. a JSON object with both `code` and `status` → `"Error <code>: <status>."`
//! 3. anything else → `"Error: <body>."`
//!
//! An empty body falls back to the HTTP status line.

use reqwest::StatusCode;
use serde_json::Value;

/// Build the error message for a non-success Partner API response.
pub fn describe_error_body(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!(
            "Error: HTTP {} {}.",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status")
        );
    }

    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        if fields.len() == 1 {
            if let Some((key, value)) = fields.iter().next() {
                return format!("{}: {}.", capitalize(key), capitalize(&value_text(value)));
            }
        }

        if let (Some(code), Some(detail)) = (fields.get("code"), fields.get("status")) {
            return format!("Error {}: {}.", value_text(code), value_text(detail));
        }
    }

    format!("Error: {body}.")
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
