// Response analysis for the route tester
// Pulls a human-readable message out of an error response body

use serde_json::{Map, Value};

/// Best-effort message extraction for a response with status >= 400.
///
/// Looks for, in order:
/// 1. `errors[0].message` when `errors` is a non-empty array
/// 2. a top-level `message` string
/// 3. the raw body, when it is not a JSON object
///
/// Returns `None` for an empty body or an object without either field.
pub fn extract_error_message(body: &str) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    let json: Map<String, Value> = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return Some(body.to_string()),
    };

    if let Some(errors) = json.get("errors").and_then(|e| e.as_array()) {
        if !errors.is_empty() {
            return errors[0]
                .get("message")
                .and_then(|m| m.as_str())
                .map(|m| m.to_string());
        }
    }

    json.get("message")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}
