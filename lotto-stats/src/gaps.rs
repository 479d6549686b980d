use std::collections::BTreeMap;

use lotto_db::models::{Draw, GameConfig};
use serde::Serialize;

use crate::{round_to, Analyzer};

pub const RANKING_SIZE: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapRecord {
    /// Tirages écoulés depuis la dernière apparition.
    pub current: usize,
    pub max: usize,
    /// Toujours vide, conservé pour la stabilité du format.
    pub history: Vec<usize>,
    pub appearances: usize,
    pub avg_interval: f64,
    pub due_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGap {
    pub num: u8,
    #[serde(flatten)]
    pub record: GapRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapReport {
    pub all: BTreeMap<u8, GapRecord>,
    pub ranking: Vec<RankedGap>,
}

pub struct GapAnalyzer {
    config: GameConfig,
}

impl GapAnalyzer {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

/// draws[0] = le plus récent, donc l'index d'une apparition est aussi son retard.
pub fn gap_record(number: u8, draws: &[Draw]) -> GapRecord {
    let len = draws.len();
    let current = draws
        .iter()
        .position(|d| d.numbers.contains(&number))
        .unwrap_or(len);

    let mut max = 0;
    let mut appearances = 0;
    let mut last_seen: Option<usize> = None;

    // Du plus ancien au plus récent
    for idx in (0..len).rev() {
        if draws[idx].numbers.contains(&number) {
            if let Some(prev) = last_seen {
                max = max.max(prev - idx - 1);
            }
            last_seen = Some(idx);
            appearances += 1;
        }
    }

    match last_seen {
        Some(recent) => max = max.max(recent),
        None => max = len,
    }

    let avg_interval = if appearances > 0 {
        len as f64 / appearances as f64
    } else {
        len as f64
    };
    let due_score = if avg_interval > 0.0 {
        round_to(current as f64 / avg_interval * 100.0, 1)
    } else {
        0.0
    };

    GapRecord {
        current,
        max,
        history: Vec::new(),
        appearances,
        avg_interval: round_to(avg_interval, 2),
        due_score,
    }
}

impl Analyzer for GapAnalyzer {
    type Output = GapReport;

    fn analyze(&self, draws: &[Draw]) -> GapReport {
        let all: BTreeMap<u8, GapRecord> = self
            .config
            .numbers()
            .map(|n| (n, gap_record(n, draws)))
            .collect();

        // Tri stable : à score égal, l'ordre croissant des numéros est conservé.
        let mut ranking: Vec<RankedGap> = all
            .iter()
            .map(|(&num, record)| RankedGap { num, record: record.clone() })
            .collect();
        ranking.sort_by(|a, b| b.record.due_score.total_cmp(&a.record.due_score));
        ranking.truncate(RANKING_SIZE);

        GapReport { all, ranking }
    }
}
