//! Wire types for the Gemini `generateContent` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

/// A content part. Search-grounded responses can interleave non-text parts;
/// those deserialize with `text: None` and are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

/// The web-search augmentation capability flag. Serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_with_search_tool_serializes_flag() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hello")],
            tools: vec![Tool {
                google_search: Some(GoogleSearch::default()),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["tools"][0]["googleSearch"], serde_json::json!({}));
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn request_without_tools_omits_the_field() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hello")],
            tools: vec![],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn response_with_non_text_parts_still_deserializes() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "inlineData": { "mimeType": "image/png" } },
                        { "text": "{\"a\": 1}" }
                    ]
                }
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let parts = &response.candidates[0].content.as_ref().unwrap().parts;
        assert_eq!(parts[0].text, None);
        assert_eq!(parts[1].text.as_deref(), Some("{\"a\": 1}"));
    }
}
