use chrono::NaiveDate;
use lotto_db::models::Draw;
use serde::Serialize;

use crate::Analyzer;

pub const PATTERN_WINDOW: usize = 50;
/// Seuil haut/bas commun aux deux jeux (1-35 bas, 36+ haut).
pub const HIGH_CUTOFF: u8 = 35;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OddEven {
    pub date: NaiveDate,
    pub odd: usize,
    pub even: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighLow {
    pub date: NaiveDate,
    pub high: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawSum {
    pub date: NaiveDate,
    pub sum: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternSeries<T> {
    pub label: &'static str,
    pub history: Vec<T>,
}

impl<T> PatternSeries<T> {
    fn new(label: &'static str, capacity: usize) -> Self {
        Self { label, history: Vec::with_capacity(capacity) }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub odd_even: PatternSeries<OddEven>,
    pub high_low: PatternSeries<HighLow>,
    pub sum_dist: PatternSeries<DrawSum>,
}

#[derive(Default)]
pub struct PatternAnalyzer;

impl PatternAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for PatternAnalyzer {
    type Output = PatternReport;

    fn analyze(&self, draws: &[Draw]) -> PatternReport {
        let recent = &draws[..draws.len().min(PATTERN_WINDOW)];

        let mut odd_even = PatternSeries::new("Odd/Even", recent.len());
        let mut high_low = PatternSeries::new("High/Low", recent.len());
        let mut sum_dist = PatternSeries::new("Sum", recent.len());

        for draw in recent {
            let nums = &draw.numbers;
            let odd = nums.iter().filter(|&&n| n % 2 == 1).count();
            let high = nums.iter().filter(|&&n| n > HIGH_CUTOFF).count();
            let sum = nums.iter().map(|&n| n as u32).sum();

            odd_even.history.push(OddEven { date: draw.date, odd, even: nums.len() - odd });
            high_low.history.push(HighLow { date: draw.date, high, low: nums.len() - high });
            sum_dist.history.push(DrawSum { date: draw.date, sum });
        }

        PatternReport { odd_even, high_low, sum_dist }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_test_draws, repeated_draws};

    #[test]
    fn test_single_draw_split() {
        let draws = repeated_draws(1, &[1, 2, 35, 36, 70]);
        let report = PatternAnalyzer::new().analyze(&draws);

        assert_eq!(report.odd_even.history[0].odd, 2);
        assert_eq!(report.odd_even.history[0].even, 3);
        assert_eq!(report.high_low.history[0].high, 2, "35 reste bas");
        assert_eq!(report.high_low.history[0].low, 3);
        assert_eq!(report.sum_dist.history[0].sum, 144);
        assert_eq!(report.sum_dist.history[0].date, draws[0].date);
    }

    #[test]
    fn test_window_is_fifty_most_recent() {
        let draws = make_test_draws(80);
        let report = PatternAnalyzer::new().analyze(&draws);
        assert_eq!(report.odd_even.history.len(), PATTERN_WINDOW);
        assert_eq!(report.high_low.history.len(), PATTERN_WINDOW);
        assert_eq!(report.sum_dist.history.len(), PATTERN_WINDOW);
        assert_eq!(report.sum_dist.history[0].date, draws[0].date);
        assert_eq!(report.sum_dist.history[49].date, draws[49].date);
    }

    #[test]
    fn test_short_series() {
        let draws = make_test_draws(4);
        let report = PatternAnalyzer::new().analyze(&draws);
        assert_eq!(report.odd_even.history.len(), 4);
        for (entry, draw) in report.odd_even.history.iter().zip(&draws) {
            assert_eq!(entry.odd + entry.even, draw.numbers.len());
        }
    }

    #[test]
    fn test_serialized_labels() {
        let report = PatternAnalyzer::new().analyze(&repeated_draws(1, &[1, 2, 3, 4, 5]));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["oddEven"]["label"], "Odd/Even");
        assert_eq!(value["highLow"]["label"], "High/Low");
        assert_eq!(value["sumDist"]["label"], "Sum");
        assert_eq!(value["sumDist"]["history"][0]["date"], "2025-12-12");
        assert_eq!(value["sumDist"]["history"][0]["sum"], 15);
    }
}
