pub mod engine;
pub mod error;
pub mod frequency;
pub mod gaps;
pub mod orchestrator;
pub mod pairs;
pub mod patterns;
pub mod predictions;
pub mod special;

use lotto_db::models::Draw;
use serde::Serialize;

pub trait Analyzer: Send + Sync {
    type Output: Serialize + Send;

    /// draws[0] = tirage le plus récent.
    fn analyze(&self, draws: &[Draw]) -> Self::Output;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberCount {
    pub num: u8,
    pub count: u32,
}

/// Trie par nombre d'apparitions décroissant, puis par numéro croissant.
pub(crate) fn rank_counts(mut counts: Vec<NumberCount>) -> Vec<NumberCount> {
    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.num.cmp(&b.num)));
    counts
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
pub(crate) fn make_test_draws(n: usize) -> Vec<Draw> {
    let start = chrono::NaiveDate::from_ymd_opt(2025, 12, 12).unwrap();
    (0..n)
        .map(|i| {
            let numbers = (0..5u32)
                .map(|k| ((i as u32 * 7 + k * 13) % 69 + 1) as u8)
                .collect();
            Draw {
                date: start - chrono::Duration::days(3 * i as i64),
                numbers,
                special: Some((i % 25) as u8 + 1),
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn repeated_draws(n: usize, numbers: &[u8]) -> Vec<Draw> {
    let start = chrono::NaiveDate::from_ymd_opt(2025, 12, 12).unwrap();
    (0..n)
        .map(|i| Draw {
            date: start - chrono::Duration::days(3 * i as i64),
            numbers: numbers.to_vec(),
            special: Some(1),
        })
        .collect()
}
