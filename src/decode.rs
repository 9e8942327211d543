//! Schema-validating decode of model payloads.
//!
//! The upstream response is untyped JSON. Rather than upcasting it blindly,
//! each top-level field group is deserialized on its own so a partial or
//! mistyped payload is reported as `path: reason` for every failing group,
//! instead of surfacing later as blank cells in the presentation layer.

use crate::model::{
    CompanyData, DcfValuation, FinancialStatement, ModelOutcome, NarrativeValuation,
    NewsArticle, Ratio, RatioHistory, RelativeValuation, ValuationAssumptions, ValuationReport,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// All field groups that failed to decode, reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {}

impl DecodeError {
    pub fn mentions(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path.starts_with(path))
    }
}

fn push(errors: &mut Vec<FieldError>, path: &str, reason: impl Into<String>) {
    errors.push(FieldError {
        path: path.to_string(),
        reason: reason.into(),
    });
}

/// Decode a required field group. Missing, null, or mistyped groups record a
/// FieldError and yield None.
fn group<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match obj.get(key) {
        None | Some(Value::Null) => {
            push(errors, key, "missing field");
            None
        }
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                push(errors, key, err.to_string());
                None
            }
        },
    }
}

/// Decode an array group element by element so the failing index lands in the
/// reported path.
fn group_vec<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Vec<T>> {
    let items = match obj.get(key) {
        None | Some(Value::Null) => {
            push(errors, key, "missing field");
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            push(errors, key, "expected an array");
            return None;
        }
    };

    let mut decoded = Vec::with_capacity(items.len());
    let mut ok = true;
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value(item.clone()) {
            Ok(value) => decoded.push(value),
            Err(err) => {
                push(errors, &format!("{}[{}]", key, index), err.to_string());
                ok = false;
            }
        }
    }
    ok.then_some(decoded)
}

/// Decode an optional numeric field. Absence is fine; a present non-numeric
/// value is an error.
fn optional_number(
    obj: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_f64() {
            Some(number) => Some(number),
            None => {
                push(errors, key, "expected a number");
                None
            }
        },
    }
}

fn as_object<'a>(value: &'a Value, errors: &mut Vec<FieldError>) -> Option<&'a Map<String, Value>> {
    match value.as_object() {
        Some(obj) => Some(obj),
        None => {
            push(errors, "$", "expected a JSON object");
            None
        }
    }
}

/// Decode a full company analysis payload, validating every field group.
pub fn decode_company_data(value: &Value) -> Result<CompanyData, DecodeError> {
    let mut errors = Vec::new();
    let Some(obj) = as_object(value, &mut errors) else {
        return Err(DecodeError { errors });
    };

    let company_name: Option<String> = group(obj, "companyName", &mut errors);
    let ticker: Option<String> = group(obj, "ticker", &mut errors);
    let currency: Option<String> = group(obj, "currency", &mut errors);
    let summary: Option<String> = group(obj, "summary", &mut errors);
    let income_statement: Option<FinancialStatement> = group(obj, "incomeStatement", &mut errors);
    let balance_sheet: Option<FinancialStatement> = group(obj, "balanceSheet", &mut errors);
    let cash_flow_statement: Option<FinancialStatement> =
        group(obj, "cashFlowStatement", &mut errors);
    let ratios: Option<Vec<Ratio>> = group_vec(obj, "ratios", &mut errors);
    let ratio_history: Option<Vec<RatioHistory>> = group_vec(obj, "ratioHistory", &mut errors);
    let news: Option<Vec<NewsArticle>> = group_vec(obj, "news", &mut errors);
    let valuation_assumptions: Option<ValuationAssumptions> =
        group(obj, "valuationAssumptions", &mut errors);

    let build = move || {
        Some(CompanyData {
            company_name: company_name?,
            ticker: ticker?,
            currency: currency?,
            summary: summary?,
            income_statement: income_statement?,
            balance_sheet: balance_sheet?,
            cash_flow_statement: cash_flow_statement?,
            ratios: ratios?,
            ratio_history: ratio_history?,
            news: news?,
            valuation_assumptions: valuation_assumptions?,
        })
    };

    match build() {
        Some(data) if errors.is_empty() => Ok(data),
        _ => Err(DecodeError { errors }),
    }
}

/// Decode one valuation sub-model slot into its `ModelOutcome`.
///
/// Missing or null means the model skipped that method. A decoded result
/// whose implied share price is zero is the model's declared "not applicable"
/// escape hatch; its commentary becomes the unavailability reason. Present
/// but mistyped slots are decode failures, not silent unavailability.
fn sub_model<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<FieldError>,
    implied_price: impl Fn(&T) -> f64,
    reason: impl Fn(&T) -> String,
) -> ModelOutcome<T> {
    match obj.get(key) {
        None | Some(Value::Null) => ModelOutcome::Unavailable {
            reason: "Not provided by the model.".to_string(),
        },
        Some(value) => match serde_json::from_value::<T>(value.clone()) {
            Ok(decoded) => {
                if implied_price(&decoded) > 0.0 {
                    ModelOutcome::Present(decoded)
                } else {
                    ModelOutcome::Unavailable {
                        reason: reason(&decoded),
                    }
                }
            }
            Err(err) => {
                push(errors, key, err.to_string());
                ModelOutcome::Unavailable {
                    reason: "Malformed in the model response.".to_string(),
                }
            }
        },
    }
}

fn narrative_reason(result: &NarrativeValuation) -> String {
    if result.commentary.trim().is_empty() {
        "Not available.".to_string()
    } else {
        result.commentary.clone()
    }
}

/// Decode a full multi-model valuation payload.
pub fn decode_valuation_report(value: &Value) -> Result<ValuationReport, DecodeError> {
    let mut errors = Vec::new();
    let Some(obj) = as_object(value, &mut errors) else {
        return Err(DecodeError { errors });
    };

    let dcf = sub_model::<DcfValuation>(
        obj,
        "dcf",
        &mut errors,
        |d| d.implied_share_price,
        |_| "Not available.".to_string(),
    );
    let relative = sub_model::<RelativeValuation>(
        obj,
        "relative",
        &mut errors,
        |r| r.implied_share_price,
        |r| {
            if r.commentary.trim().is_empty() {
                "Not available.".to_string()
            } else {
                r.commentary.clone()
            }
        },
    );
    let ddm = sub_model::<NarrativeValuation>(
        obj,
        "ddm",
        &mut errors,
        |n| n.implied_share_price,
        narrative_reason,
    );
    let asset_based = sub_model::<NarrativeValuation>(
        obj,
        "assetBased",
        &mut errors,
        |n| n.implied_share_price,
        narrative_reason,
    );

    let commentary: Option<String> = group(obj, "commentary", &mut errors);
    let current_share_price = optional_number(obj, "currentSharePrice", &mut errors);
    let net_debt = optional_number(obj, "netDebt", &mut errors);
    let shares_outstanding = optional_number(obj, "sharesOutstanding", &mut errors);

    match commentary {
        Some(commentary) if errors.is_empty() => Ok(ValuationReport {
            dcf,
            relative,
            ddm,
            asset_based,
            commentary,
            current_share_price,
            net_debt,
            shares_outstanding,
        }),
        _ => Err(DecodeError { errors }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn company_payload() -> Value {
        json!({
            "companyName": "Acme Corp",
            "ticker": "ACME",
            "currency": "USD",
            "summary": "Diversified widgets.",
            "incomeStatement": {
                "2024 TTM": { "Revenue": 1200.5, "Net Income": 140.2 },
                "2023": { "Revenue": 1100.0, "Net Income": 120.0 }
            },
            "balanceSheet": {
                "2024 TTM": { "Total Assets": 5000.0 }
            },
            "cashFlowStatement": {
                "2024 TTM": { "Operating Cash Flow": 300.0 }
            },
            "ratios": [
                { "name": "P/E Ratio", "value": "24.1", "commentary": "Rich.", "benchmark": "18x" }
            ],
            "ratioHistory": [
                { "name": "P/E Ratio", "history": [ { "year": "2023", "value": 22.0 } ] }
            ],
            "news": [
                { "headline": "Acme wins contract", "source": "Wire", "summary": "Big deal." }
            ],
            "valuationAssumptions": {
                "revenueGrowthRate": 6.0,
                "ebitdaMargin": 22.0,
                "taxRate": 25.0,
                "capexAsPercentageOfRevenue": 4.0,
                "depreciationAsPercentageOfRevenue": 3.0,
                "changeInWorkingCapitalAsPercentageOfRevenue": 1.0,
                "terminalGrowthRate": 2.5,
                "discountRate": 9.0
            }
        })
    }

    #[test]
    fn decodes_complete_company_payload() {
        let data = decode_company_data(&company_payload()).unwrap();
        assert_eq!(data.company_name, "Acme Corp");
        assert_eq!(data.ratios.len(), 1);
        assert_eq!(data.valuation_assumptions.discount_rate, 9.0);
    }

    #[test]
    fn missing_group_is_reported_by_path() {
        let mut payload = company_payload();
        payload.as_object_mut().unwrap().remove("ratios");
        let err = decode_company_data(&payload).unwrap_err();
        assert!(err.mentions("ratios"), "got: {}", err);
    }

    #[test]
    fn mistyped_group_is_reported_by_path() {
        let mut payload = company_payload();
        payload["valuationAssumptions"]["discountRate"] = json!("nine percent");
        let err = decode_company_data(&payload).unwrap_err();
        assert!(err.mentions("valuationAssumptions"), "got: {}", err);
    }

    #[test]
    fn failing_array_element_carries_its_index() {
        let mut payload = company_payload();
        payload["news"][0] = json!({ "headline": "No source" });
        let err = decode_company_data(&payload).unwrap_err();
        assert!(err.mentions("news[0]"), "got: {}", err);
    }

    #[test]
    fn all_failing_groups_are_collected() {
        let mut payload = company_payload();
        {
            let obj = payload.as_object_mut().unwrap();
            obj.remove("summary");
            obj.remove("news");
        }
        let err = decode_company_data(&payload).unwrap_err();
        assert!(err.mentions("summary"));
        assert!(err.mentions("news"));
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = decode_company_data(&json!([1, 2, 3])).unwrap_err();
        assert!(err.mentions("$"));
    }

    fn valuation_payload() -> Value {
        json!({
            "dcf": {
                "intrinsicValue": 110.0,
                "terminalValue": 900.0,
                "enterpriseValue": 1300.0,
                "equityValue": 1100.0,
                "impliedSharePrice": 110.0,
                "projectedFinancials": [
                    { "year": 2025, "revenue": 1300.0, "ebitda": 290.0, "depreciation": 40.0,
                      "ebit": 250.0, "taxes": 62.5, "nopat": 187.5, "capex": 52.0,
                      "changeInNwc": 13.0, "unleveredFreeCashFlow": 162.5 }
                ],
                "dcfAnalysis": [
                    { "year": 2025, "unleveredFreeCashFlow": 162.5, "discountFactor": 0.92,
                      "presentValue": 149.5 }
                ]
            },
            "relative": {
                "impliedSharePrice": 95.0,
                "commentary": "Peers trade at 18x.",
                "comparableCompanies": [
                    { "name": "Widget Co", "ticker": "WID", "peRatio": 18.0 }
                ]
            },
            "ddm": { "impliedSharePrice": 0, "commentary": "Acme pays no dividend." },
            "assetBased": { "impliedSharePrice": 70.0, "commentary": "Book value anchored." },
            "commentary": "Models cluster around 100.",
            "currentSharePrice": 100.0,
            "netDebt": 200.0,
            "sharesOutstanding": 10.0
        })
    }

    #[test]
    fn zero_implied_price_becomes_unavailable_with_reason() {
        let report = decode_valuation_report(&valuation_payload()).unwrap();
        assert!(report.dcf.as_present().is_some());
        assert_eq!(
            report.ddm.unavailable_reason(),
            Some("Acme pays no dividend.")
        );
        assert!(report.asset_based.as_present().is_some());
    }

    #[test]
    fn missing_sub_model_is_unavailable_not_an_error() {
        let mut payload = valuation_payload();
        payload.as_object_mut().unwrap().remove("ddm");
        let report = decode_valuation_report(&payload).unwrap();
        assert_eq!(
            report.ddm.unavailable_reason(),
            Some("Not provided by the model.")
        );
    }

    #[test]
    fn mistyped_sub_model_fails_decode() {
        let mut payload = valuation_payload();
        payload["relative"]["impliedSharePrice"] = json!("ninety-five");
        let err = decode_valuation_report(&payload).unwrap_err();
        assert!(err.mentions("relative"), "got: {}", err);
    }

    #[test]
    fn missing_current_price_is_allowed() {
        let mut payload = valuation_payload();
        payload.as_object_mut().unwrap().remove("currentSharePrice");
        let report = decode_valuation_report(&payload).unwrap();
        assert_eq!(report.current_share_price, None);
    }
}
