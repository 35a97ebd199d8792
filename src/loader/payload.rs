//! Resource body decoding shared by both loading strategies.

use serde_json::Value;

use crate::input::translation::TranslationNode;

/// Removes the script assignment prefix when present.
///
/// Bodies without the prefix are returned as-is, so plain JSON files work too.
#[must_use]
pub fn strip_payload_prefix<'a>(body: &'a str, prefix: &str) -> &'a str {
    script_assignment(body, prefix).unwrap_or(body)
}

/// The right-hand side of `<prefix><json>`, or `None` if `script` does not
/// assign the payload slot.
#[must_use]
pub fn script_assignment<'a>(script: &'a str, prefix: &str) -> Option<&'a str> {
    let target = prefix.trim();
    if target.is_empty() {
        return None;
    }
    script.trim_start_matches('\u{feff}').trim_start().strip_prefix(target)
}

/// Parses a payload, tolerating a trailing statement terminator.
///
/// # Errors
/// Returns the JSON error for malformed input.
pub fn parse_payload(payload: &str) -> Result<TranslationNode, serde_json::Error> {
    let trimmed = payload.trim();
    let json = trimmed.strip_suffix(';').unwrap_or(trimmed);
    let value: Value = serde_json::from_str(json)?;
    Ok(TranslationNode::from(&value))
}
