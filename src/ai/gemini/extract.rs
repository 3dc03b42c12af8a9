//! Locating generated text inside a `generateContent` response envelope.
//!
//! Strategies run in priority order and the first non-blank result wins:
//!
//! 1. `candidates[0].content.parts[0].text`
//! 2. every `candidates[0].content.parts[*].text`, concatenated in payload order
//! 3. top-level `text`

use serde_json::Value;

pub type ExtractionStrategy = fn(&Value) -> Option<String>;

pub const STRATEGIES: &[ExtractionStrategy] = &[first_part_text, joined_part_texts, top_level_text];

pub fn first_part_text(envelope: &Value) -> Option<String> {
    envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub fn joined_part_texts(envelope: &Value) -> Option<String> {
    let parts = envelope
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)?;

    let joined: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    Some(joined)
}

pub fn top_level_text(envelope: &Value) -> Option<String> {
    envelope
        .get("text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Returns the first non-blank text found, untouched.
pub fn extract_text(envelope: &Value) -> Option<String> {
    STRATEGIES
        .iter()
        .filter_map(|strategy| strategy(envelope))
        .find(|text| !text.trim().is_empty())
}
