use lotto_db::models::{Draw, GameConfig};
use serde::Serialize;

use crate::{rank_counts, Analyzer, NumberCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialGap {
    pub num: u8,
    pub gap: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpecialReport {
    pub frequency: Vec<NumberCount>,
    /// Du plus en retard au plus récent.
    pub gaps: Vec<SpecialGap>,
}

pub struct SpecialBallAnalyzer {
    config: GameConfig,
}

impl SpecialBallAnalyzer {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl Analyzer for SpecialBallAnalyzer {
    type Output = SpecialReport;

    fn analyze(&self, draws: &[Draw]) -> SpecialReport {
        let mut counts: Vec<NumberCount> = self
            .config
            .specials()
            .map(|num| NumberCount { num, count: 0 })
            .collect();

        for special in draws.iter().filter_map(|d| d.special) {
            if self.config.contains_special(special) {
                counts[(special - self.config.special_min) as usize].count += 1;
            }
        }

        let mut gaps: Vec<SpecialGap> = self
            .config
            .specials()
            .map(|num| SpecialGap {
                num,
                gap: draws
                    .iter()
                    .position(|d| d.special == Some(num))
                    .unwrap_or(draws.len()),
            })
            .collect();
        gaps.sort_by(|a, b| b.gap.cmp(&a.gap));

        SpecialReport {
            frequency: rank_counts(counts),
            gaps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_test_draws, repeated_draws};
    use lotto_db::models::Game;

    #[test]
    fn test_frequency_covers_domain() {
        let config = Game::Powerball.config();
        let draws = make_test_draws(50);
        let report = SpecialBallAnalyzer::new(config).analyze(&draws);
        assert_eq!(report.frequency.len(), 26);
        let total: u32 = report.frequency.iter().map(|c| c.count).sum();
        assert_eq!(total, 50);
        for w in report.frequency.windows(2) {
            assert!(w[0].count >= w[1].count);
        }
    }

    #[test]
    fn test_gaps_most_overdue_first() {
        let config = Game::MegaMillions.config();
        let mut draws = repeated_draws(6, &[1, 2, 3, 4, 5]);
        for (i, d) in draws.iter_mut().enumerate() {
            d.special = Some(i as u8 + 1);
        }
        let report = SpecialBallAnalyzer::new(config).analyze(&draws);

        assert_eq!(report.gaps.len(), 25);
        // Les numéros jamais sortis ont un retard égal à la longueur de la série
        assert_eq!(report.gaps[0], SpecialGap { num: 7, gap: 6 });
        let six = report.gaps.iter().find(|g| g.num == 6).unwrap();
        assert_eq!(six.gap, 5);
        let one = report.gaps.iter().find(|g| g.num == 1).unwrap();
        assert_eq!(one.gap, 0);
        assert_eq!(report.gaps.last().unwrap().num, 1);
    }

    #[test]
    fn test_missing_and_out_of_range_ignored() {
        let config = Game::MegaMillions.config();
        let mut draws = repeated_draws(3, &[1, 2, 3, 4, 5]);
        draws[0].special = None;
        draws[1].special = Some(26);
        draws[2].special = Some(4);
        let report = SpecialBallAnalyzer::new(config).analyze(&draws);

        let total: u32 = report.frequency.iter().map(|c| c.count).sum();
        assert_eq!(total, 1);
        assert_eq!(report.frequency[0], NumberCount { num: 4, count: 1 });
        assert!(report.gaps.iter().all(|g| g.num <= 25));
        assert_eq!(report.gaps.iter().find(|g| g.num == 4).unwrap().gap, 2);
    }
}
