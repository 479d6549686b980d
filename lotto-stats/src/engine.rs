use chrono::NaiveDate;
use lotto_db::models::{Draw, Game, GameConfig};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::frequency::{FrequencyAnalyzer, FrequencyReport};
use crate::gaps::{GapAnalyzer, GapReport};
use crate::pairs::{PairAnalyzer, PairReport};
use crate::patterns::{PatternAnalyzer, PatternReport};
use crate::predictions::{PredictionAnalyzer, PredictionReport};
use crate::special::{SpecialBallAnalyzer, SpecialReport};
use crate::Analyzer;

/// Un document JSON prêt à être écrit (`<name>.json`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub name: &'static str,
    pub json: String,
}

#[derive(Debug, Clone)]
pub struct StatsReport {
    pub frequency: FrequencyReport,
    pub gaps: GapReport,
    pub patterns: PatternReport,
    pub pairs: PairReport,
    pub special: SpecialReport,
    pub predictions: PredictionReport,
}

fn fragment<T: Serialize>(name: &'static str, value: &T) -> Result<Fragment> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|source| StatsError::Serialize { fragment: name, source })?;
    Ok(Fragment { name, json })
}

impl StatsReport {
    pub fn fragments(&self) -> Result<Vec<Fragment>> {
        Ok(vec![
            fragment("frequency", &self.frequency)?,
            fragment("gaps", &self.gaps)?,
            fragment("patterns", &self.patterns)?,
            fragment("pairs", &self.pairs)?,
            fragment("special", &self.special)?,
            fragment("predictions", &self.predictions)?,
        ])
    }
}

pub struct StatsEngine {
    game: Game,
    config: GameConfig,
    today: NaiveDate,
}

impl StatsEngine {
    pub fn new(game: Game, config: GameConfig, today: NaiveDate) -> Result<Self> {
        config
            .validate()
            .map_err(|e| StatsError::InvalidConfig { game, reason: e.to_string() })?;
        Ok(Self { game, config, today })
    }

    pub fn for_game(game: Game, today: NaiveDate) -> Result<Self> {
        Self::new(game, game.config(), today)
    }

    /// draws[0] = tirage le plus récent. Une série vide est refusée.
    pub fn run(&self, draws: &[Draw]) -> Result<StatsReport> {
        if draws.is_empty() {
            return Err(StatsError::EmptySeries(self.game));
        }

        let frequency = FrequencyAnalyzer::new(self.config, self.today);
        let gaps = GapAnalyzer::new(self.config);
        let patterns = PatternAnalyzer::new();
        let pairs = PairAnalyzer::new(self.config);
        let special = SpecialBallAnalyzer::new(self.config);

        // Les cinq analyseurs ne font que lire la série
        let ((frequency, gaps), (patterns, (pairs, special))) = rayon::join(
            || rayon::join(|| frequency.analyze(draws), || gaps.analyze(draws)),
            || {
                rayon::join(
                    || patterns.analyze(draws),
                    || rayon::join(|| pairs.analyze(draws), || special.analyze(draws)),
                )
            },
        );

        let predictions = PredictionAnalyzer::new().derive(&frequency, &gaps);

        debug!(
            game = %self.game,
            draws = draws.len(),
            hot = ?predictions.hot_and_ready,
            overdue = ?predictions.overdue,
            "statistiques calculées"
        );

        Ok(StatsReport { frequency, gaps, patterns, pairs, special, predictions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_test_draws, repeated_draws};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 13).unwrap()
    }

    #[test]
    fn test_empty_series_rejected() {
        let engine = StatsEngine::for_game(Game::Powerball, today()).unwrap();
        let err = engine.run(&[]).unwrap_err();
        assert!(matches!(err, StatsError::EmptySeries(Game::Powerball)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig { min: 10, max: 1, special_min: 1, special_max: 25, pick: 5 };
        let err = StatsEngine::new(Game::MegaMillions, config, today()).err().unwrap();
        assert!(matches!(err, StatsError::InvalidConfig { .. }));
    }

    #[test]
    fn test_six_fragments_in_order() {
        let engine = StatsEngine::for_game(Game::MegaMillions, today()).unwrap();
        let report = engine.run(&make_test_draws(30)).unwrap();
        let names: Vec<&str> = report.fragments().unwrap().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["frequency", "gaps", "patterns", "pairs", "special", "predictions"]);
    }

    #[test]
    fn test_run_is_idempotent() {
        let engine = StatsEngine::for_game(Game::Powerball, today()).unwrap();
        let draws = make_test_draws(120);
        let first = engine.run(&draws).unwrap().fragments().unwrap();
        let second = engine.run(&draws).unwrap().fragments().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_three_identical_draws_scenario() {
        let engine = StatsEngine::for_game(Game::MegaMillions, today()).unwrap();
        let report = engine.run(&repeated_draws(3, &[1, 2, 3, 4, 5])).unwrap();

        let all = report.frequency.get("all").unwrap();
        assert_eq!(all.data.len(), 70);
        assert!(all.data.iter().all(|c| c.count == if c.num <= 5 { 3 } else { 0 }));
        assert_eq!(report.gaps.all[&1].current, 0);
        assert_eq!(report.gaps.all[&6].current, 3);
        assert_eq!(report.predictions.hot_and_ready, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_fragments_round_trip_numeric() {
        let engine = StatsEngine::for_game(Game::Powerball, today()).unwrap();
        let report = engine.run(&make_test_draws(20)).unwrap();
        let fragments = report.fragments().unwrap();
        for fragment in &fragments {
            let value: serde_json::Value = serde_json::from_str(&fragment.json).unwrap();
            assert!(value.is_object(), "fragment {}", fragment.name);
        }
        let gaps: serde_json::Value = serde_json::from_str(&fragments[1].json).unwrap();
        assert!(gaps["all"]["1"]["current"].is_u64());
        assert!(gaps["all"]["1"]["dueScore"].is_f64());
        let frequency: serde_json::Value = serde_json::from_str(&fragments[0].json).unwrap();
        assert!(frequency["10draws"]["top10"][0]["count"].is_u64());
        let pairs: serde_json::Value = serde_json::from_str(&fragments[3].json).unwrap();
        assert!(pairs["bestPairs"][0]["pair"].is_string());
    }
}
