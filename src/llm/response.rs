//! Post-processing of raw model text into a parsed JSON value.

use crate::error::{AnalysisError, Result};
use serde_json::Value;

/// Recover the JSON body from a model response that may be wrapped in a
/// markdown code fence (optionally tagged `json`). The first fence pair wins;
/// a fence that never closes falls through to trimming the whole text. This
/// is a syntactic pre-filter only and does not validate JSON-ness.
pub fn extract_json(text: &str) -> &str {
    if let Some(open) = text.find("```") {
        let body = &text[open + 3..];
        let body = body.strip_prefix("json").unwrap_or(body);
        if let Some(close) = body.find("```") {
            return body[..close].trim();
        }
    }
    text.trim()
}

/// Extract, gate, and parse one model payload. The gate rejects anything not
/// shaped like a single JSON object before a parse is ever attempted; both
/// failures name the entity being analyzed.
pub fn parse_payload(entity: &str, raw: &str) -> Result<Value> {
    let json = extract_json(raw);
    if !(json.starts_with('{') && json.ends_with('}')) {
        return Err(AnalysisError::MalformedPayload {
            entity: entity.to_string(),
        });
    }
    serde_json::from_str(json).map_err(|source| AnalysisError::InvalidJson {
        entity: entity.to_string(),
        source,
    })
}
