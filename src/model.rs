use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A financial statement as returned by the model: period label ("2024 TTM",
/// "2023", ...) to metric label ("Revenue", ...) to value.
pub type FinancialStatement = BTreeMap<String, BTreeMap<String, MetricValue>>;

/// Statement cells arrive as numbers in millions of the stated currency, but
/// the model occasionally substitutes a text marker ("N/A").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

/// Target market for an analysis request. Drives the currency convention the
/// prompt imposes on the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    Global,
    Indian,
}

impl Market {
    pub fn currency(self) -> &'static str {
        match self {
            Market::Global => "USD",
            Market::Indian => "INR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Market::Global => "Global (USD)",
            Market::Indian => "Indian (INR)",
        }
    }
}

/// Everything one analysis request returns. Replaced wholesale on the next
/// request; never merged, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyData {
    pub company_name: String,
    pub ticker: String,
    pub currency: String,
    pub summary: String,
    pub income_statement: FinancialStatement,
    pub balance_sheet: FinancialStatement,
    pub cash_flow_statement: FinancialStatement,
    pub ratios: Vec<Ratio>,
    pub ratio_history: Vec<RatioHistory>,
    pub news: Vec<NewsArticle>,
    pub valuation_assumptions: ValuationAssumptions,
}

impl CompanyData {
    /// Newest statement period by the numeric value embedded in its label.
    pub fn latest_statement_period(&self) -> Option<&str> {
        self.income_statement
            .keys()
            .max_by_key(|label| period_key(label))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratio {
    pub name: String,
    pub value: String,
    pub commentary: String,
    pub benchmark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioHistory {
    pub name: String,
    pub history: Vec<RatioDataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioDataPoint {
    pub year: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub headline: String,
    pub source: String,
    pub summary: String,
}

/// Eight percentage-rate inputs to the DCF model. Each field is edited
/// independently; no cross-field validation is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationAssumptions {
    pub revenue_growth_rate: f64,
    pub ebitda_margin: f64,
    pub tax_rate: f64,
    pub capex_as_percentage_of_revenue: f64,
    pub depreciation_as_percentage_of_revenue: f64,
    pub change_in_working_capital_as_percentage_of_revenue: f64,
    pub terminal_growth_rate: f64,
    pub discount_rate: f64,
}

/// Per-model valuation slot, decided once at the decode boundary and consumed
/// uniformly by every renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutcome<T> {
    Present(T),
    Unavailable { reason: String },
}

impl<T> ModelOutcome<T> {
    pub fn as_present(&self) -> Option<&T> {
        match self {
            ModelOutcome::Present(value) => Some(value),
            ModelOutcome::Unavailable { .. } => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            ModelOutcome::Present(_) => None,
            ModelOutcome::Unavailable { reason } => Some(reason),
        }
    }
}

/// The combined result of one multi-model valuation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationReport {
    pub dcf: ModelOutcome<DcfValuation>,
    pub relative: ModelOutcome<RelativeValuation>,
    pub ddm: ModelOutcome<NarrativeValuation>,
    pub asset_based: ModelOutcome<NarrativeValuation>,
    pub commentary: String,
    pub current_share_price: Option<f64>,
    pub net_debt: Option<f64>,
    pub shares_outstanding: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcfValuation {
    pub intrinsic_value: f64,
    pub terminal_value: f64,
    pub enterprise_value: f64,
    pub equity_value: f64,
    pub implied_share_price: f64,
    pub projected_financials: Vec<ProjectedYear>,
    pub dcf_analysis: Vec<DiscountedYear>,
}

/// One projected year of the DCF build-up. Fields the model omits stay None
/// and render as "-".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedYear {
    pub year: u32,
    pub revenue: Option<f64>,
    pub ebitda: Option<f64>,
    pub depreciation: Option<f64>,
    pub ebit: Option<f64>,
    pub taxes: Option<f64>,
    pub nopat: Option<f64>,
    pub capex: Option<f64>,
    pub change_in_nwc: Option<f64>,
    pub unlevered_free_cash_flow: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountedYear {
    pub year: u32,
    pub unlevered_free_cash_flow: Option<f64>,
    pub discount_factor: Option<f64>,
    pub present_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeValuation {
    pub implied_share_price: f64,
    pub commentary: String,
    pub comparable_companies: Vec<ComparableCompany>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableCompany {
    pub name: String,
    pub ticker: String,
    pub pe_ratio: Option<f64>,
}

/// DDM and asset-based results carry only a price and the model's reasoning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeValuation {
    pub implied_share_price: f64,
    pub commentary: String,
}

/// Numeric value embedded in a period label, with non-numeric suffixes like
/// "TTM" stripped ("2024 TTM" -> 2024). Labels with no digits map to 0.
pub fn period_key(label: &str) -> u64 {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_key_strips_suffixes() {
        assert_eq!(period_key("2024 TTM"), 2024);
        assert_eq!(period_key("2023"), 2023);
        assert_eq!(period_key("FY2022"), 2022);
        assert_eq!(period_key("TTM"), 0);
    }

    #[test]
    fn market_currencies() {
        assert_eq!(Market::Global.currency(), "USD");
        assert_eq!(Market::Indian.currency(), "INR");
    }

    #[test]
    fn latest_statement_period_prefers_numeric_order() {
        let mut income = FinancialStatement::new();
        for label in ["2023", "2024 TTM", "2022"] {
            income.insert(label.to_string(), BTreeMap::new());
        }
        let data = CompanyData {
            company_name: "Acme".into(),
            ticker: "ACME".into(),
            currency: "USD".into(),
            summary: String::new(),
            income_statement: income,
            balance_sheet: FinancialStatement::new(),
            cash_flow_statement: FinancialStatement::new(),
            ratios: vec![],
            ratio_history: vec![],
            news: vec![],
            valuation_assumptions: ValuationAssumptions {
                revenue_growth_rate: 5.0,
                ebitda_margin: 20.0,
                tax_rate: 25.0,
                capex_as_percentage_of_revenue: 4.0,
                depreciation_as_percentage_of_revenue: 3.0,
                change_in_working_capital_as_percentage_of_revenue: 1.0,
                terminal_growth_rate: 2.0,
                discount_rate: 9.0,
            },
        };
        assert_eq!(data.latest_statement_period(), Some("2024 TTM"));
    }
}
