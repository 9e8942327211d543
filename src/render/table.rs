//! Statement pivoting: a period -> metric map becomes a metric-rows by
//! period-columns grid ready for display. Pure functions over borrowed data;
//! re-rendering the same input yields the same grid.

use crate::model::{period_key, FinancialStatement, MetricValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementTable {
    pub title: String,
    pub currency: String,
    /// Column headers, newest period first.
    pub periods: Vec<String>,
    pub rows: Vec<StatementRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRow {
    pub metric: String,
    /// One formatted cell per period column; "-" where a period lacks the
    /// metric.
    pub cells: Vec<String>,
}

/// Pivot a financial statement. Periods sort descending by the numeric value
/// embedded in their label (suffixes like "TTM" are stripped before
/// comparison; the sort is stable). Metric rows follow the newest period's
/// map. Returns None for an empty statement.
pub fn statement_table(
    title: &str,
    statement: &FinancialStatement,
    currency: &str,
) -> Option<StatementTable> {
    let mut periods: Vec<&String> = statement.keys().collect();
    periods.sort_by(|a, b| period_key(b).cmp(&period_key(a)));

    let newest = statement.get(*periods.first()?)?;

    let rows = newest
        .keys()
        .map(|metric| StatementRow {
            metric: metric.clone(),
            cells: periods
                .iter()
                .map(|period| {
                    statement
                        .get(*period)
                        .and_then(|metrics| metrics.get(metric))
                        .map(format_metric)
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect(),
        })
        .collect();

    Some(StatementTable {
        title: title.to_string(),
        currency: currency.to_string(),
        periods: periods.into_iter().cloned().collect(),
        rows,
    })
}

/// Fixed two-decimal grouping: 1234567.891 -> "1,234,567.89".
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some(parts) => parts,
        None => (formatted.as_str(), "00"),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

fn format_metric(value: &MetricValue) -> String {
    match value {
        MetricValue::Number(number) => format_amount(*number),
        MetricValue::Text(text) => text.clone(),
    }
}

impl StatementTable {
    /// Plain-text rendition with right-aligned value columns, for terminal
    /// display.
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = Vec::with_capacity(self.periods.len() + 1);
        widths.push(
            self.rows
                .iter()
                .map(|row| row.metric.len())
                .max()
                .unwrap_or(0)
                .max("Metric".len()),
        );
        for (col, period) in self.periods.iter().enumerate() {
            let cell_width = self
                .rows
                .iter()
                .filter_map(|row| row.cells.get(col))
                .map(String::len)
                .max()
                .unwrap_or(0);
            widths.push(cell_width.max(period.len()));
        }

        let mut out = String::new();
        out.push_str(&format!(
            "{} (all figures in millions of {})\n",
            self.title, self.currency
        ));

        out.push_str(&format!("{:<width$}", "Metric", width = widths[0]));
        for (col, period) in self.periods.iter().enumerate() {
            out.push_str(&format!("  {:>width$}", period, width = widths[col + 1]));
        }
        out.push('\n');

        for row in &self.rows {
            out.push_str(&format!("{:<width$}", row.metric, width = widths[0]));
            for (col, cell) in row.cells.iter().enumerate() {
                out.push_str(&format!("  {:>width$}", cell, width = widths[col + 1]));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn statement() -> FinancialStatement {
        let mut statement = FinancialStatement::new();
        for (period, revenue) in [("2023", 1100.0), ("2024 TTM", 1200.5), ("2022", 980.25)] {
            let mut metrics = BTreeMap::new();
            metrics.insert("Revenue".to_string(), MetricValue::Number(revenue));
            metrics.insert(
                "Net Income".to_string(),
                MetricValue::Number(revenue * 0.1),
            );
            statement.insert(period.to_string(), metrics);
        }
        statement
    }

    #[test]
    fn periods_sort_numeric_descending_ignoring_suffixes() {
        let table = statement_table("Income Statement", &statement(), "USD").unwrap();
        assert_eq!(table.periods, vec!["2024 TTM", "2023", "2022"]);
    }

    #[test]
    fn empty_statement_yields_no_table() {
        assert_eq!(
            statement_table("Income Statement", &FinancialStatement::new(), "USD"),
            None
        );
    }

    #[test]
    fn cells_follow_the_period_order() {
        let table = statement_table("Income Statement", &statement(), "USD").unwrap();
        let revenue = table
            .rows
            .iter()
            .find(|row| row.metric == "Revenue")
            .unwrap();
        assert_eq!(revenue.cells, vec!["1,200.50", "1,100.00", "980.25"]);
    }

    #[test]
    fn missing_metric_in_an_older_period_renders_dash() {
        let mut statement = statement();
        statement
            .get_mut("2022")
            .unwrap()
            .remove("Net Income")
            .unwrap();
        let table = statement_table("Income Statement", &statement, "USD").unwrap();
        let net_income = table
            .rows
            .iter()
            .find(|row| row.metric == "Net Income")
            .unwrap();
        assert_eq!(net_income.cells[2], "-");
    }

    #[test]
    fn text_cells_pass_through_unformatted() {
        let mut statement = FinancialStatement::new();
        let mut metrics = BTreeMap::new();
        metrics.insert("Revenue".to_string(), MetricValue::Text("N/A".to_string()));
        statement.insert("2024".to_string(), metrics);
        let table = statement_table("Income Statement", &statement, "USD").unwrap();
        assert_eq!(table.rows[0].cells[0], "N/A");
    }

    #[test]
    fn pivoting_is_idempotent() {
        let statement = statement();
        let first = statement_table("Income Statement", &statement, "USD").unwrap();
        let second = statement_table("Income Statement", &statement, "USD").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn amounts_group_thousands_with_two_decimals() {
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-4521.5), "-4,521.50");
        assert_eq!(format_amount(999.999), "1,000.00");
    }

    #[test]
    fn text_rendition_includes_title_and_currency_note() {
        let table = statement_table("Income Statement", &statement(), "USD").unwrap();
        let text = table.to_text();
        assert!(text.starts_with("Income Statement (all figures in millions of USD)"));
        assert!(text.contains("2024 TTM"));
        assert!(text.contains("1,200.50"));
    }
}
