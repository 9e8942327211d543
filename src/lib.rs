//! # Finsight
//!
//! Front-end core for an AI-delegated equity research tool. The user names a
//! company; a hosted generative model (prompted to browse and synthesize
//! public data) performs the actual financial analysis and multi-model
//! valuation. This crate owns everything around that single external call:
//!
//! - **Prompt construction** ([`llm::prompts`]) embedding the literal JSON
//!   shape the caller expects
//! - **Response extraction** ([`llm::response`]): markdown-fence stripping, a
//!   brace shape gate, and parsing
//! - **Schema-validated decoding** ([`decode`]): every field group checked at
//!   the boundary, failures reported as `path: reason`
//! - **View state** ([`app`]): the analysis and valuation request slots with
//!   request-generation tokens so stale responses are discarded
//! - **Presentation** ([`render`]): statement pivoting, ratio trends, and
//!   valuation comparison cards
//!
//! ## Example
//!
//! ```rust,ignore
//! use finsight::*;
//!
//! let client = GeminiClient::from_env()?;
//! let analyst = CompanyAnalyst::new(client);
//!
//! let mut controller = AnalysisController::new();
//! let token = controller.submit();
//! match analyst.analyze_company("Acme Corp", Market::Global).await {
//!     Ok(data) => { controller.resolve(token, data); }
//!     Err(err) => { controller.reject(token, err.to_string()); }
//! }
//!
//! if let Some(data) = controller.company_data() {
//!     if let Some(table) = statement_table("Income Statement", &data.income_statement, &data.currency) {
//!         println!("{}", table.to_text());
//!     }
//! }
//! ```
//!
//! All monetary figures are, by prompt convention, millions of the stated
//! currency. Nothing is persisted; each response replaces the last.

pub mod app;
pub mod decode;
pub mod error;
pub mod llm;
pub mod model;
pub mod render;

pub use app::*;
pub use decode::{decode_company_data, decode_valuation_report, DecodeError, FieldError};
pub use error::{AnalysisError, Result};
pub use llm::prompts::{company_analysis_prompt, valuation_prompt};
pub use llm::response::{extract_json, parse_payload};
pub use model::*;
pub use render::*;

#[cfg(feature = "gemini")]
pub use llm::analyst::CompanyAnalyst;
#[cfg(feature = "gemini")]
pub use llm::client::{GeminiClient, DEFAULT_MODEL};
