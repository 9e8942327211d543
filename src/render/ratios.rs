//! Ratio cards and historical trend series.

use crate::model::{period_key, Ratio, RatioDataPoint, RatioHistory};

/// Points for one ratio's trend line, sorted ascending by year so the line
/// plots left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<RatioDataPoint>,
}

pub fn ratio_trend(history: &RatioHistory) -> ChartSeries {
    let mut points = history.history.clone();
    points.sort_by_key(|point| period_key(&point.year));
    ChartSeries {
        name: format!("{} Trend", history.name),
        points,
    }
}

impl ChartSeries {
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n", self.name);
        for point in &self.points {
            out.push_str(&format!("  {}: {:.2}\n", point.year, point.value));
        }
        out
    }
}

/// Card text for one ratio, mirroring the dashboard card layout.
pub fn ratio_card(ratio: &Ratio) -> String {
    format!(
        "{}\n  {}\n  {}\n  Industry Benchmark: {}\n",
        ratio.name, ratio.value, ratio.commentary, ratio.benchmark
    )
}
