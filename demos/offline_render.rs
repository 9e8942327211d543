//! Drives the decode, state, and render layers from a canned model payload,
//! with no network or API key. Useful for eyeballing the terminal output.
//!
//! Run: cargo run --example offline_render

use finsight::*;

const COMPANY_PAYLOAD: &str = r#"```json
{
  "companyName": "Acme Corp",
  "ticker": "ACME",
  "currency": "USD",
  "summary": "Acme designs and distributes industrial widgets across three continents, with a growing high-margin services arm.",
  "incomeStatement": {
    "2024 TTM": { "Revenue": 1250.4, "COGS": 700.1, "Gross Profit": 550.3, "Operating Expenses": 310.0, "Net Income": 180.6 },
    "2023": { "Revenue": 1150.0, "COGS": 655.5, "Gross Profit": 494.5, "Operating Expenses": 290.2, "Net Income": 152.3 },
    "2022": { "Revenue": 1020.7, "COGS": 600.9, "Gross Profit": 419.8, "Operating Expenses": 270.8, "Net Income": 110.9 }
  },
  "balanceSheet": {
    "2024 TTM": { "Total Assets": 5100.0, "Total Liabilities": 2900.0, "Total Equity": 2200.0, "Cash and Equivalents": 640.0, "Long-term Debt": 1200.0 },
    "2023": { "Total Assets": 4800.5, "Total Liabilities": 2800.3, "Total Equity": 2000.2, "Cash and Equivalents": 580.0, "Long-term Debt": 1250.0 },
    "2022": { "Total Assets": 4450.0, "Total Liabilities": 2700.0, "Total Equity": 1750.0, "Cash and Equivalents": 410.5, "Long-term Debt": 1300.0 }
  },
  "cashFlowStatement": {
    "2024 TTM": { "Operating Cash Flow": 310.2, "Investing Cash Flow": -120.5, "Financing Cash Flow": -80.0, "Net Change in Cash": 109.7 },
    "2023": { "Operating Cash Flow": 280.0, "Investing Cash Flow": -140.8, "Financing Cash Flow": -60.0, "Net Change in Cash": 79.2 },
    "2022": { "Operating Cash Flow": 240.3, "Investing Cash Flow": -90.0, "Financing Cash Flow": -110.0, "Net Change in Cash": 40.3 }
  },
  "ratios": [
    { "name": "P/E Ratio", "value": "24.1", "commentary": "Trades at a premium to industrials on the services mix.", "benchmark": "18x sector median" },
    { "name": "Debt-to-Equity", "value": "0.55", "commentary": "Leverage declining as debt amortizes.", "benchmark": "0.8" },
    { "name": "Return on Equity (ROE)", "value": "8.2%", "commentary": "Improving with margin expansion.", "benchmark": "10%" },
    { "name": "Current Ratio", "value": "1.9", "commentary": "Comfortable near-term liquidity.", "benchmark": "1.5" }
  ],
  "ratioHistory": [
    { "name": "P/E Ratio", "history": [
      { "year": "2024", "value": 24.1 }, { "year": "2023", "value": 22.5 }, { "year": "2022", "value": 19.8 },
      { "year": "2021", "value": 18.2 }, { "year": "2020", "value": 21.0 } ] },
    { "name": "Return on Equity (ROE)", "history": [
      { "year": "2024", "value": 8.2 }, { "year": "2023", "value": 7.6 }, { "year": "2022", "value": 6.3 },
      { "year": "2021", "value": 5.9 }, { "year": "2020", "value": 6.8 } ] }
  ],
  "news": [
    { "headline": "Acme wins multi-year widget supply contract", "source": "Industrial Wire", "summary": "A five-year agreement expected to add roughly 4% to annual revenue." },
    { "headline": "Acme opens Singapore distribution hub", "source": "Trade Daily", "summary": "The hub shortens APAC lead times and lowers freight costs." },
    { "headline": "Acme raises services guidance", "source": "Market Watchers", "summary": "Management now expects services to reach 30% of revenue by 2027." }
  ],
  "valuationAssumptions": {
    "revenueGrowthRate": 6.5,
    "ebitdaMargin": 24.0,
    "taxRate": 25.0,
    "capexAsPercentageOfRevenue": 4.5,
    "depreciationAsPercentageOfRevenue": 3.5,
    "changeInWorkingCapitalAsPercentageOfRevenue": 1.0,
    "terminalGrowthRate": 2.5,
    "discountRate": 9.0
  }
}
```"#;

const VALUATION_PAYLOAD: &str = r#"```json
{
  "dcf": {
    "intrinsicValue": 118.4,
    "terminalValue": 2100.0,
    "enterpriseValue": 2950.0,
    "equityValue": 2390.0,
    "impliedSharePrice": 118.4,
    "projectedFinancials": [
      { "year": 2025, "revenue": 1331.7, "ebitda": 319.6, "depreciation": 46.6, "ebit": 273.0, "taxes": 68.2, "nopat": 204.7, "capex": 59.9, "changeInNwc": 13.3, "unleveredFreeCashFlow": 178.1 },
      { "year": 2026, "revenue": 1418.2, "ebitda": 340.4, "depreciation": 49.6, "ebit": 290.7, "taxes": 72.7, "nopat": 218.1, "capex": 63.8, "changeInNwc": 14.2, "unleveredFreeCashFlow": 189.7 }
    ],
    "dcfAnalysis": [
      { "year": 2025, "unleveredFreeCashFlow": 178.1, "discountFactor": 0.92, "presentValue": 163.9 },
      { "year": 2026, "unleveredFreeCashFlow": 189.7, "discountFactor": 0.84, "presentValue": 159.3 }
    ]
  },
  "relative": {
    "impliedSharePrice": 104.0,
    "commentary": "Peer industrials trade at 18x forward earnings; applying that multiple to Acme's TTM EPS implies a modest upside.",
    "comparableCompanies": [
      { "name": "Widget Works", "ticker": "WID", "peRatio": 17.5 },
      { "name": "Gadget Global", "ticker": "GDG", "peRatio": 19.2 },
      { "name": "Parts & Co", "ticker": "PRT", "peRatio": 16.8 }
    ]
  },
  "ddm": { "impliedSharePrice": 0, "commentary": "N/A - Acme does not pay a dividend and has signaled buybacks instead." },
  "assetBased": { "impliedSharePrice": 74.5, "commentary": "Book value per share adjusted for the fair value of real estate holdings." },
  "commentary": "The DCF and relative approaches cluster between 104 and 118, suggesting the shares are modestly undervalued at current levels; the asset floor sits near 75.",
  "currentSharePrice": 100.0,
  "netDebt": 560.0,
  "sharesOutstanding": 20.2
}
```"#;

fn main() -> anyhow::Result<()> {
    // Analysis screen.
    let mut analysis = AnalysisController::new();
    let token = analysis.submit();
    println!("{}", ANALYSIS_LOADING_CAPTION);

    let value = parse_payload("Acme Corp", COMPANY_PAYLOAD)?;
    let data = decode_company_data(&value)?;
    analysis.resolve(token, data);

    let data = match analysis.company_data() {
        Some(data) => data.clone(),
        None => return Ok(()),
    };

    println!("\n{} ({})  —  Currency: {}\n", data.company_name, data.ticker, data.currency);
    println!("{}\n", data.summary);

    for (title, statement) in [
        ("Income Statement", &data.income_statement),
        ("Balance Sheet", &data.balance_sheet),
        ("Cash Flow Statement", &data.cash_flow_statement),
    ] {
        if let Some(table) = statement_table(title, statement, &data.currency) {
            println!("{}", table.to_text());
        }
    }

    for ratio in &data.ratios {
        println!("{}", ratio_card(ratio));
    }
    for history in &data.ratio_history {
        println!("{}", ratio_trend(history).to_text());
    }
    for article in &data.news {
        println!("- {} ({})\n  {}", article.headline, article.source, article.summary);
    }

    // Valuation screen, seeded from the analysis.
    let mut valuation = ValuationController::from_company(&data);
    valuation.set_assumption(AssumptionField::DiscountRate, 9.5);
    let token = valuation.begin();
    println!("\n{}", VALUATION_LOADING_CAPTION);

    let value = parse_payload(&data.company_name, VALUATION_PAYLOAD)?;
    let report = decode_valuation_report(&value)?;
    valuation.resolve(token, report);

    if let Some(report) = valuation.report() {
        println!("\nValuation Model Comparison");
        println!(
            "Current Share Price: {}\n",
            format_currency(report.current_share_price.unwrap_or(0.0), &data.currency)
        );
        for card in model_cards(report, &data.currency) {
            println!("{}", card.title);
            println!("  {}  {}", card.implied_price, card.status_text());
            println!("  {}\n", card.commentary);
        }
        if let Some(dcf) = report.dcf.as_present() {
            if let Some(table) = projected_financials_table(dcf, &data.currency) {
                println!("{}", table.to_text());
            }
            if let Some(table) = dcf_analysis_table(dcf, &data.currency) {
                println!("{}", table.to_text());
            }
        }
        println!("AI Summary Commentary\n{}", report.commentary);
    }

    Ok(())
}
