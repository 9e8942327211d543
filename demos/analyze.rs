//! End-to-end terminal session: analyze a company, then run a multi-model
//! valuation with the model's suggested assumptions.
//!
//! Run: cargo run --example analyze -- "Apple" [--indian]
//! Requires GEMINI_API_KEY (a .env file is honored).

use dotenv::dotenv;
use finsight::*;

fn print_company(data: &CompanyData) {
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

    println!("Key Ratios");
    for ratio in &data.ratios {
        println!("{}", ratio_card(ratio));
    }

    println!("Historical Ratio Trends");
    for history in &data.ratio_history {
        println!("{}", ratio_trend(history).to_text());
    }

    println!("News");
    for article in &data.news {
        println!("- {} ({})\n  {}", article.headline, article.source, article.summary);
    }
}

fn print_valuation(report: &ValuationReport, currency: &str) {
    println!("\nValuation Model Comparison");
    println!(
        "Current Share Price: {}\n",
        format_currency(report.current_share_price.unwrap_or(0.0), currency)
    );

    for card in model_cards(report, currency) {
        println!("{}", card.title);
        println!("  {}  {}", card.implied_price, card.status_text());
        println!("  {}\n", card.commentary);
    }

    if let Some(dcf) = report.dcf.as_present() {
        if let Some(table) = projected_financials_table(dcf, currency) {
            println!("{}", table.to_text());
        }
        if let Some(table) = dcf_analysis_table(dcf, currency) {
            println!("{}", table.to_text());
        }
    }

    println!("AI Summary Commentary\n{}", report.commentary);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let market = if let Some(pos) = args.iter().position(|a| a == "--indian") {
        args.remove(pos);
        Market::Indian
    } else {
        Market::Global
    };
    let company = args.join(" ");
    if company.is_empty() {
        eprintln!("usage: analyze <company name> [--indian]");
        std::process::exit(2);
    }

    let client = GeminiClient::from_env()?;
    let analyst = CompanyAnalyst::new(client);

    let mut analysis = AnalysisController::new();
    let token = analysis.submit();
    println!("{}", ANALYSIS_LOADING_CAPTION);

    match analyst.analyze_company(&company, market).await {
        Ok(data) => {
            analysis.resolve(token, data);
        }
        Err(err) => {
            analysis.reject(token, err.to_string());
        }
    }

    if let Screen::Error(message) = analysis.screen() {
        eprintln!("An Error Occurred\n{message}");
        std::process::exit(1);
    }
    let data = match analysis.company_data() {
        Some(data) => data.clone(),
        None => return Ok(()),
    };

    print_company(&data);

    let mut valuation = ValuationController::from_company(&data);
    let token = valuation.begin();
    println!("\n{}", VALUATION_LOADING_CAPTION);

    let assumptions = valuation.assumptions().clone();
    match analyst.run_valuation(&data, &assumptions).await {
        Ok(report) => {
            valuation.resolve(token, report);
        }
        Err(err) => {
            valuation.reject(token, err.to_string());
        }
    }

    match valuation.phase() {
        ValuationPhase::Ready(_) => {
            if let Some(report) = valuation.report() {
                print_valuation(report, &data.currency);
            }
        }
        ValuationPhase::Error(message) => eprintln!("Valuation Error\n{message}"),
        _ => {}
    }

    Ok(())
}
