use crate::decode::{decode_company_data, decode_valuation_report};
use crate::error::{AnalysisError, Result};
use crate::llm::client::{GeminiClient, DEFAULT_MODEL};
use crate::llm::prompts::{company_analysis_prompt, valuation_prompt};
use crate::llm::response::parse_payload;
use crate::model::{CompanyData, Market, ValuationAssumptions, ValuationReport};

/// High-level client for the two analysis operations. Each issues a single
/// search-augmented model request; any failure along the pipeline is logged
/// with its true cause and surfaced as one opaque, user-facing error naming
/// the company.
pub struct CompanyAnalyst {
    client: GeminiClient,
    model: String,
}

impl CompanyAnalyst {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub async fn analyze_company(
        &self,
        company_name: &str,
        market: Market,
    ) -> Result<CompanyData> {
        let prompt = company_analysis_prompt(company_name, market);
        let outcome = async {
            let raw = self
                .client
                .generate_content(&self.model, &prompt, true)
                .await?;
            let value = parse_payload(company_name, &raw)?;
            Ok(decode_company_data(&value)?)
        }
        .await;

        outcome.map_err(|err: AnalysisError| {
            log::error!("company analysis for {company_name} failed: {err}");
            AnalysisError::AnalysisFailed {
                company: company_name.to_string(),
            }
        })
    }

    pub async fn run_valuation(
        &self,
        data: &CompanyData,
        assumptions: &ValuationAssumptions,
    ) -> Result<ValuationReport> {
        let outcome = async {
            let prompt = valuation_prompt(data, assumptions)?;
            let raw = self
                .client
                .generate_content(&self.model, &prompt, true)
                .await?;
            let value = parse_payload(&data.company_name, &raw)?;
            Ok(decode_valuation_report(&value)?)
        }
        .await;

        outcome.map_err(|err: AnalysisError| {
            log::error!("valuation for {} failed: {err}", data.company_name);
            AnalysisError::ValuationFailed {
                company: data.company_name.clone(),
            }
        })
    }
}
