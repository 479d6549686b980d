use std::collections::HashMap;
use std::fmt;

use lotto_db::models::{Draw, GameConfig};
use serde::{Serialize, Serializer};

use crate::Analyzer;

pub const BEST_PAIRS: usize = 20;

/// Paire non ordonnée, toujours stockée plus petit numéro en premier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(u8, u8);

impl PairKey {
    pub fn new(a: u8, b: u8) -> Self {
        if a <= b { PairKey(a, b) } else { PairKey(b, a) }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

impl Serialize for PairKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairCount {
    pub pair: PairKey,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairReport {
    pub best_pairs: Vec<PairCount>,
}

pub struct PairAnalyzer {
    config: GameConfig,
}

impl PairAnalyzer {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Compte chaque paire une fois par tirage qui la contient.
    /// Les paires sont rendues dans l'ordre de première apparition (tirage le plus récent d'abord).
    pub fn count_pairs(&self, draws: &[Draw]) -> Vec<PairCount> {
        let size = self.config.domain_size();
        let mut index: HashMap<PairKey, usize> = HashMap::with_capacity(size * (size - 1) / 2);
        let mut counts: Vec<PairCount> = Vec::new();

        for draw in draws {
            let mut nums = draw.numbers.clone();
            nums.sort_unstable();
            for i in 0..nums.len() {
                for j in (i + 1)..nums.len() {
                    let pair = PairKey::new(nums[i], nums[j]);
                    match index.get(&pair) {
                        Some(&slot) => counts[slot].count += 1,
                        None => {
                            index.insert(pair, counts.len());
                            counts.push(PairCount { pair, count: 1 });
                        }
                    }
                }
            }
        }

        counts
    }
}

impl Analyzer for PairAnalyzer {
    type Output = PairReport;

    fn analyze(&self, draws: &[Draw]) -> PairReport {
        let mut sorted = self.count_pairs(draws);
        // Tri stable : à égalité, la paire vue en premier reste devant
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted.truncate(BEST_PAIRS);

        PairReport { best_pairs: sorted }
    }
}
