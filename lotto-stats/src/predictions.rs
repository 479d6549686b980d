use serde::Serialize;

use crate::frequency::{FrequencyReport, HOT_PERIOD};
use crate::gaps::GapReport;

pub const PICKS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionReport {
    pub hot_and_ready: Vec<u8>,
    pub overdue: Vec<u8>,
}

/// Dérivé uniquement des fréquences et des retards, sans parcours des tirages.
#[derive(Default)]
pub struct PredictionAnalyzer;

impl PredictionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn derive(&self, frequency: &FrequencyReport, gaps: &GapReport) -> PredictionReport {
        let hot_and_ready = frequency
            .get(HOT_PERIOD)
            .map(|p| p.top10.iter().take(PICKS).map(|c| c.num).collect())
            .unwrap_or_default();
        let overdue = gaps.ranking.iter().take(PICKS).map(|g| g.num).collect();

        PredictionReport { hot_and_ready, overdue }
    }
}
