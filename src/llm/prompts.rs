//! Prompt builders. Each embeds a literal textual description of the exact
//! JSON shape the caller expects; the only logic is string interpolation and
//! market-dependent phrasing. Deterministic, no I/O.

use crate::error::Result;
use crate::model::{CompanyData, Market, ValuationAssumptions};

const CURRENCY_TOKEN: &str = "${CURRENCY}";

const COMPANY_DATA_SHAPE: &str = r#"{
  "companyName": "string",
  "ticker": "string",
  "currency": "string (e.g., ${CURRENCY})",
  "summary": "A comprehensive summary of the company's business, market position, and recent performance.",
  "incomeStatement": {
    "[Latest Year/TTM]": { "Revenue": "number", "COGS": "number", "Gross Profit": "number", "Operating Expenses": "number", "Net Income": "number" },
    "[Previous Year]": { "Revenue": "number", "COGS": "number", "Gross Profit": "number", "Operating Expenses": "number", "Net Income": "number" },
    "[Year before Previous]": { "Revenue": "number", "COGS": "number", "Gross Profit": "number", "Operating Expenses": "number", "Net Income": "number" }
  },
  "balanceSheet": {
    "[Latest Year/TTM]": { "Total Assets": "number", "Total Liabilities": "number", "Total Equity": "number", "Cash and Equivalents": "number", "Long-term Debt": "number" },
    "[Previous Year]": { "Total Assets": "number", "Total Liabilities": "number", "Total Equity": "number", "Cash and Equivalents": "number", "Long-term Debt": "number" },
    "[Year before Previous]": { "Total Assets": "number", "Total Liabilities": "number", "Total Equity": "number", "Cash and Equivalents": "number", "Long-term Debt": "number" }
  },
  "cashFlowStatement": {
    "[Latest Year/TTM]": { "Operating Cash Flow": "number", "Investing Cash Flow": "number", "Financing Cash Flow": "number", "Net Change in Cash": "number" },
    "[Previous Year]": { "Operating Cash Flow": "number", "Investing Cash Flow": "number", "Financing Cash Flow": "number", "Net Change in Cash": "number" },
    "[Year before Previous]": { "Operating Cash Flow": "number", "Investing Cash Flow": "number", "Financing Cash Flow": "number", "Net Change in Cash": "number" }
  },
  "ratios": [
    { "name": "P/E Ratio", "value": "string", "commentary": "string", "benchmark": "string" },
    { "name": "Debt-to-Equity", "value": "string", "commentary": "string", "benchmark": "string" },
    { "name": "Return on Equity (ROE)", "value": "string", "commentary": "string", "benchmark": "string" },
    { "name": "Current Ratio", "value": "string", "commentary": "string", "benchmark": "string" }
  ],
  "ratioHistory": [
    { "name": "P/E Ratio", "history": [{ "year": "[Latest Year]", "value": "number" }, { "year": "[Year-1]", "value": "number" }, { "year": "[Year-2]", "value": "number" }, { "year": "[Year-3]", "value": "number" }, { "year": "[Year-4]", "value": "number" }] },
    { "name": "Debt-to-Equity", "history": [{ "year": "[Latest Year]", "value": "number" }, { "year": "[Year-1]", "value": "number" }, { "year": "[Year-2]", "value": "number" }, { "year": "[Year-3]", "value": "number" }, { "year": "[Year-4]", "value": "number" }] },
    { "name": "Return on Equity (ROE)", "history": [{ "year": "[Latest Year]", "value": "number" }, { "year": "[Year-1]", "value": "number" }, { "year": "[Year-2]", "value": "number" }, { "year": "[Year-3]", "value": "number" }, { "year": "[Year-4]", "value": "number" }] }
  ],
  "news": [
    { "headline": "string", "source": "string", "summary": "string" }
  ],
  "valuationAssumptions": {
    "revenueGrowthRate": "number",
    "ebitdaMargin": "number",
    "taxRate": "number",
    "capexAsPercentageOfRevenue": "number",
    "depreciationAsPercentageOfRevenue": "number",
    "changeInWorkingCapitalAsPercentageOfRevenue": "number",
    "terminalGrowthRate": "number",
    "discountRate": "number"
  }
}"#;

const VALUATION_SHAPE: &str = r#"{
  "dcf": {
    "intrinsicValue": "number",
    "terminalValue": "number",
    "enterpriseValue": "number",
    "equityValue": "number",
    "impliedSharePrice": "number",
    "projectedFinancials": [{ "year": "number", "revenue": "number", "ebitda": "number", "depreciation": "number", "ebit": "number", "taxes": "number", "nopat": "number", "capex": "number", "changeInNwc": "number", "unleveredFreeCashFlow": "number" }],
    "dcfAnalysis": [{ "year": "number", "unleveredFreeCashFlow": "number", "discountFactor": "number", "presentValue": "number" }]
  },
  "relative": {
    "impliedSharePrice": "number",
    "commentary": "Brief commentary on the choice of comps and multiples.",
    "comparableCompanies": [{ "name": "string", "ticker": "string", "peRatio": "number" }]
  },
  "ddm": {
    "impliedSharePrice": "number",
    "commentary": "Commentary on dividend policy and growth assumptions. State 'N/A' if company doesn't pay dividends."
  },
  "assetBased": {
    "impliedSharePrice": "number",
    "commentary": "Commentary on asset valuation. State 'N/A' if not a suitable method."
  },
  "commentary": "An overall summary synthesizing the results from all models to give a concluding valuation insight.",
  "currentSharePrice": "number",
  "netDebt": "number",
  "sharesOutstanding": "number"
}"#;

/// Build the company analysis prompt for the given market.
pub fn company_analysis_prompt(company_name: &str, market: Market) -> String {
    let currency = market.currency();
    let structure = COMPANY_DATA_SHAPE.replace(CURRENCY_TOKEN, currency);
    format!(
        "You are an expert financial analyst. Perform a detailed financial analysis for the company: \"{company_name}\" in the {market} market.\n\
        Use Google Search to find the latest available financial data, including quarterly reports to create TTM (Trailing Twelve Months) or the most recent annual report.\n\
        \n\
        Please provide the entire response as a single JSON object enclosed in a ```json markdown block.\n\
        The JSON object must strictly adhere to the following structure and include these specific metrics:\n\
        {structure}\n\
        \n\
        Important instructions:\n\
        - Financial statement data should be for the last 3 reported fiscal years. If the latest full year is not over, use TTM data for the most recent year and label the year key as such (e.g. \"2024 TTM\").\n\
        - All financial figures MUST be in millions of the local currency ({currency}).\n\
        - 'ratios' should be for the most recent full year or TTM. Provide insightful commentary and a relevant industry benchmark.\n\
        - 'ratioHistory' should cover the last 5 years for the specified key ratios.\n\
        - 'news' should contain 3-5 recent and highly relevant news articles with a concise summary.\n\
        - 'valuationAssumptions' should be reasonable, industry-standard assumptions for a DCF valuation based on the company's profile and market conditions. These will be used for a later valuation step.\n",
        company_name = company_name,
        market = market.label(),
        structure = structure,
        currency = currency,
    )
}

/// Build the multi-model valuation prompt from loaded company data and the
/// user's (possibly edited) assumptions.
pub fn valuation_prompt(data: &CompanyData, assumptions: &ValuationAssumptions) -> Result<String> {
    let assumptions_json = serde_json::to_string_pretty(assumptions)?;
    let latest = data
        .latest_statement_period()
        .unwrap_or("the most recent reported year");
    Ok(format!(
        "You are an expert valuation analyst. Perform a multi-model valuation for {company} ({ticker}).\n\
        Use the provided company data and valuation assumptions. Use Google Search to get the latest share price, net debt, and shares outstanding figures in millions.\n\
        \n\
        Company Data Snapshot:\n\
        - Currency: {currency}\n\
        - Most recent financials are for year: {latest}\n\
        \n\
        Valuation Assumptions to use for the DCF model:\n\
        {assumptions_json}\n\
        \n\
        Please provide the entire response as a single JSON object enclosed in a ```json markdown block.\n\
        The JSON object must strictly adhere to this structure:\n\
        {structure}\n\
        \n\
        Important instructions:\n\
        - Ensure all financial values in the JSON response are numbers, not strings (e.g., 1234.5, not \"1,234.5\").\n\
        - For DCF: Project financials and unlevered free cash flow for 10 years based on the provided assumptions. Calculate the terminal value using the Gordon Growth model. All values must be in millions of {currency}.\n\
        - For Relative Valuation: Select 3-5 appropriate publicly traded comparable companies and use a relevant multiple (e.g., P/E, EV/EBITDA). Justify the choice in the commentary.\n\
        - For DDM: If the company pays dividends, perform a Dividend Discount Model valuation. If not, state that it's not applicable in the commentary and return 0 for impliedSharePrice.\n\
        - For Asset-Based: Provide an asset-based valuation. This is often based on book value. If not a suitable methodology for this company (e.g. tech company), state why in commentary and return 0 for impliedSharePrice.\n\
        - The final 'commentary' should synthesize the results from all models to give a concluding valuation summary and a final estimated value range.\n",
        company = data.company_name,
        ticker = data.ticker,
        currency = data.currency,
        latest = latest,
        assumptions_json = assumptions_json,
        structure = VALUATION_SHAPE,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_company() -> CompanyData {
        let mut income = BTreeMap::new();
        for label in ["2022", "2023", "2024 TTM"] {
            income.insert(label.to_string(), BTreeMap::new());
        }
        CompanyData {
            company_name: "Acme".into(),
            ticker: "ACME".into(),
            currency: "USD".into(),
            summary: "Widgets.".into(),
            income_statement: income,
            balance_sheet: BTreeMap::new(),
            cash_flow_statement: BTreeMap::new(),
            ratios: vec![],
            ratio_history: vec![],
            news: vec![],
            valuation_assumptions: sample_assumptions(),
        }
    }

    fn sample_assumptions() -> ValuationAssumptions {
        ValuationAssumptions {
            revenue_growth_rate: 6.0,
            ebitda_margin: 22.0,
            tax_rate: 25.0,
            capex_as_percentage_of_revenue: 4.0,
            depreciation_as_percentage_of_revenue: 3.0,
            change_in_working_capital_as_percentage_of_revenue: 1.0,
            terminal_growth_rate: 2.5,
            discount_rate: 9.0,
        }
    }

    #[test]
    fn global_market_prompt_uses_usd_only() {
        let prompt = company_analysis_prompt("Acme", Market::Global);
        assert!(prompt.contains("USD"));
        assert!(!prompt.contains("INR"));
        assert!(prompt.contains("\"Acme\""));
    }

    #[test]
    fn indian_market_prompt_uses_inr_only() {
        let prompt = company_analysis_prompt("Acme", Market::Indian);
        assert!(prompt.contains("INR"));
        assert!(!prompt.contains("USD"));
    }

    #[test]
    fn analysis_prompt_is_deterministic() {
        let a = company_analysis_prompt("Acme", Market::Global);
        let b = company_analysis_prompt("Acme", Market::Global);
        assert_eq!(a, b);
    }

    #[test]
    fn valuation_prompt_quotes_latest_period_and_assumptions() {
        let prompt = valuation_prompt(&sample_company(), &sample_assumptions()).unwrap();
        assert!(prompt.contains("Acme (ACME)"));
        assert!(prompt.contains("2024 TTM"));
        assert!(prompt.contains("\"discountRate\": 9.0"));
        assert!(prompt.contains("impliedSharePrice"));
    }
}
