use crate::decode::DecodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Model response for {entity} is not a JSON object")]
    MalformedPayload { entity: String },

    #[error("Failed to parse model response for {entity}: {source}")]
    InvalidJson {
        entity: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Model response did not match the expected shape: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to retrieve analysis for {company}. The AI model couldn't process the request. This might be due to a temporary issue or an unsupported company. Please try another company.")]
    AnalysisFailed { company: String },

    #[error("Failed to run valuation for {company}. The AI model couldn't complete the calculation. Please adjust your assumptions or try again later.")]
    ValuationFailed { company: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[cfg(feature = "gemini")]
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
