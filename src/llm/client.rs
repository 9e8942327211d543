use crate::error::{AnalysisError, Result};
use crate::llm::types::*;
use reqwest::Client;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for both analysis and valuation requests.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Read the API key from `GEMINI_API_KEY`. A missing or empty key fails
    /// construction immediately rather than on the first request.
    pub fn from_env() -> Result<Self> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(AnalysisError::MissingApiKey),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Issue one text-generation request and return the concatenated text
    /// parts of the first candidate. `web_search` enables the search
    /// augmentation tool.
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        web_search: bool,
    ) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let tools = if web_search {
            vec![Tool {
                google_search: Some(GoogleSearch::default()),
            }]
        } else {
            Vec::new()
        };

        let payload = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            tools,
        };

        let res = self.client.post(&url).json(&payload).send().await?;
        let status = res.status();

        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = res.json().await?;

        let text: String = body
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }

        Ok(text)
    }
}
