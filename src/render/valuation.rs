//! Valuation comparison cards and DCF detail tables. Display logic only; the
//! availability of each model was already decided at the decode boundary.

use crate::model::{DcfValuation, ModelOutcome, ValuationReport};
use crate::render::table::{format_amount, StatementRow, StatementTable};

/// How an implied price compares to the market price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuationStatus {
    FairlyValued,
    Overvalued,
    Undervalued,
    NotAvailable,
}

/// Classify an implied share price against the current price. Within 5%
/// either way counts as fairly valued; a non-positive implied price or an
/// absent/non-positive current price is not classifiable. Returns the
/// percentage deviation alongside the verdict.
pub fn classify_valuation(implied: f64, current: Option<f64>) -> (ValuationStatus, Option<f64>) {
    let current = match current {
        Some(price) if price > 0.0 => price,
        _ => return (ValuationStatus::NotAvailable, None),
    };
    if implied <= 0.0 || !implied.is_finite() {
        return (ValuationStatus::NotAvailable, None);
    }

    let difference_percent = (implied - current) / current * 100.0;
    let status = if difference_percent.abs() < 5.0 {
        ValuationStatus::FairlyValued
    } else if difference_percent < 0.0 {
        ValuationStatus::Overvalued
    } else {
        ValuationStatus::Undervalued
    };
    (status, Some(difference_percent))
}

/// Two-decimal grouped amount prefixed with the currency code; zero or
/// non-finite amounts render "N/A".
pub fn format_currency(value: f64, currency: &str) -> String {
    if value == 0.0 || !value.is_finite() {
        return "N/A".to_string();
    }
    format!("{} {}", currency, format_amount(value))
}

/// One comparison card per valuation model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCard {
    pub title: String,
    pub implied_price: String,
    pub status: ValuationStatus,
    pub difference_percent: Option<f64>,
    pub commentary: String,
}

impl ModelCard {
    fn new(
        title: &str,
        implied: Option<f64>,
        commentary: String,
        current_price: Option<f64>,
        currency: &str,
    ) -> Self {
        let implied = implied.unwrap_or(0.0);
        let (status, difference_percent) = classify_valuation(implied, current_price);
        Self {
            title: title.to_string(),
            implied_price: format_currency(implied, currency),
            status,
            difference_percent,
            commentary,
        }
    }

    /// Status line as shown under the price, e.g. "(+20.0%) Undervalued".
    pub fn status_text(&self) -> String {
        match (self.status, self.difference_percent) {
            (ValuationStatus::NotAvailable, _) | (_, None) => "Not Available".to_string(),
            (ValuationStatus::FairlyValued, Some(pct)) => {
                format!("({:.1}%) Fairly Valued", pct)
            }
            (ValuationStatus::Overvalued, Some(pct)) => format!("({:.1}%) Overvalued", pct),
            (ValuationStatus::Undervalued, Some(pct)) => {
                format!("(+{:.1}%) Undervalued", pct)
            }
        }
    }
}

/// Build the four comparison cards from a valuation report.
pub fn model_cards(report: &ValuationReport, currency: &str) -> Vec<ModelCard> {
    let current = report.current_share_price;

    let dcf = match &report.dcf {
        ModelOutcome::Present(dcf) => ModelCard::new(
            "Discounted Cash Flow (DCF)",
            Some(dcf.implied_share_price),
            "Based on 10-year future cash flows.".to_string(),
            current,
            currency,
        ),
        ModelOutcome::Unavailable { reason } => ModelCard::new(
            "Discounted Cash Flow (DCF)",
            None,
            reason.clone(),
            current,
            currency,
        ),
    };

    let relative = match &report.relative {
        ModelOutcome::Present(relative) => ModelCard::new(
            "Relative Valuation",
            Some(relative.implied_share_price),
            relative.commentary.clone(),
            current,
            currency,
        ),
        ModelOutcome::Unavailable { reason } => {
            ModelCard::new("Relative Valuation", None, reason.clone(), current, currency)
        }
    };

    let ddm = match &report.ddm {
        ModelOutcome::Present(ddm) => ModelCard::new(
            "Dividend Discount Model (DDM)",
            Some(ddm.implied_share_price),
            ddm.commentary.clone(),
            current,
            currency,
        ),
        ModelOutcome::Unavailable { reason } => ModelCard::new(
            "Dividend Discount Model (DDM)",
            None,
            reason.clone(),
            current,
            currency,
        ),
    };

    let asset_based = match &report.asset_based {
        ModelOutcome::Present(asset) => ModelCard::new(
            "Asset-Based Valuation",
            Some(asset.implied_share_price),
            asset.commentary.clone(),
            current,
            currency,
        ),
        ModelOutcome::Unavailable { reason } => ModelCard::new(
            "Asset-Based Valuation",
            None,
            reason.clone(),
            current,
            currency,
        ),
    };

    vec![dcf, relative, ddm, asset_based]
}

fn optional_cell(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_else(|| "-".to_string())
}

/// Pivot the projected financials into a metric-rows by year-columns table.
pub fn projected_financials_table(dcf: &DcfValuation, currency: &str) -> Option<StatementTable> {
    if dcf.projected_financials.is_empty() {
        return None;
    }

    let periods: Vec<String> = dcf
        .projected_financials
        .iter()
        .map(|row| row.year.to_string())
        .collect();

    let metrics: [(&str, fn(&crate::model::ProjectedYear) -> Option<f64>); 9] = [
        ("Revenue", |row| row.revenue),
        ("EBITDA", |row| row.ebitda),
        ("Depreciation", |row| row.depreciation),
        ("EBIT", |row| row.ebit),
        ("Taxes", |row| row.taxes),
        ("NOPAT", |row| row.nopat),
        ("Capex", |row| row.capex),
        ("Change in NWC", |row| row.change_in_nwc),
        ("Unlevered Free Cash Flow", |row| {
            row.unlevered_free_cash_flow
        }),
    ];

    let rows = metrics
        .iter()
        .map(|(label, get)| StatementRow {
            metric: label.to_string(),
            cells: dcf
                .projected_financials
                .iter()
                .map(|row| optional_cell(get(row)))
                .collect(),
        })
        .collect();

    Some(StatementTable {
        title: "10-Year Projected Financials & UFCF (DCF)".to_string(),
        currency: currency.to_string(),
        periods,
        rows,
    })
}

/// Pivot the discounting schedule into a metric-rows by year-columns table.
pub fn dcf_analysis_table(dcf: &DcfValuation, currency: &str) -> Option<StatementTable> {
    if dcf.dcf_analysis.is_empty() {
        return None;
    }

    let periods: Vec<String> = dcf
        .dcf_analysis
        .iter()
        .map(|row| row.year.to_string())
        .collect();

    let metrics: [(&str, fn(&crate::model::DiscountedYear) -> Option<f64>); 3] = [
        ("Unlevered Free Cash Flow", |row| {
            row.unlevered_free_cash_flow
        }),
        ("Discount Factor", |row| row.discount_factor),
        ("Present Value", |row| row.present_value),
    ];

    let rows = metrics
        .iter()
        .map(|(label, get)| StatementRow {
            metric: label.to_string(),
            cells: dcf
                .dcf_analysis
                .iter()
                .map(|row| optional_cell(get(row)))
                .collect(),
        })
        .collect();

    Some(StatementTable {
        title: "DCF Analysis".to_string(),
        currency: currency.to_string(),
        periods,
        rows,
    })
}
