use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use lotto_db::models::Game;
use lotto_db::store::{load_series, stats_dir};
use tracing::{error, info, warn};

use crate::engine::{Fragment, StatsEngine, StatsReport};
use crate::error::StatsError;

#[derive(Debug)]
pub enum GameOutcome {
    /// Rien à analyser : aucun fragment écrit.
    Skipped,
    Written { paths: Vec<PathBuf>, report: StatsReport },
}

pub fn write_fragments(dir: &Path, fragments: &[Fragment]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Impossible de créer le répertoire {:?}", dir))?;

    fragments
        .iter()
        .map(|fragment| {
            let path = dir.join(format!("{}.json", fragment.name));
            fs::write(&path, &fragment.json)
                .with_context(|| format!("Impossible d'écrire {:?}", path))?;
            Ok(path)
        })
        .collect()
}

/// Charge l'historique d'un jeu, calcule toutes les statistiques et écrit les six fragments.
pub fn run_game(root: &Path, game: Game, today: NaiveDate) -> Result<GameOutcome> {
    let draws = load_series(root, game)
        .with_context(|| format!("Chargement de l'historique {} impossible", game))?;

    if draws.is_empty() {
        warn!(%game, "aucun tirage disponible, statistiques non générées");
        return Ok(GameOutcome::Skipped);
    }

    info!(%game, draws = draws.len(), "génération des statistiques");
    let engine = StatsEngine::for_game(game, today)?;
    let report = match engine.run(&draws) {
        Ok(report) => report,
        Err(StatsError::EmptySeries(_)) => return Ok(GameOutcome::Skipped),
        Err(e) => return Err(e.into()),
    };

    let dir = stats_dir(root, game);
    let paths = write_fragments(&dir, &report.fragments()?)?;
    info!(%game, dir = ?dir, "statistiques générées");

    Ok(GameOutcome::Written { paths, report })
}

/// Exécute chaque jeu indépendamment : l'échec d'un jeu n'interrompt pas les suivants.
pub fn run_games(root: &Path, games: &[Game], today: NaiveDate) -> Vec<(Game, Result<GameOutcome>)> {
    games
        .iter()
        .map(|&game| {
            let outcome = run_game(root, game, today);
            if let Err(e) = &outcome {
                error!(%game, "échec de la génération : {:#}", e);
            }
            (game, outcome)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make_test_draws;
    use lotto_db::store::{game_dir, save_draw};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lotto-stats-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 13).unwrap()
    }

    #[test]
    fn test_missing_input_skips_without_files() {
        let root = scratch_dir("skip");
        let outcome = run_game(&root, Game::MegaMillions, today()).unwrap();
        assert!(matches!(outcome, GameOutcome::Skipped));
        assert!(!stats_dir(&root, Game::MegaMillions).exists());
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_writes_six_fragments_idempotently() {
        let root = scratch_dir("write");
        for draw in make_test_draws(25) {
            save_draw(&root, Game::Powerball, &draw).unwrap();
        }

        let outcome = run_game(&root, Game::Powerball, today()).unwrap();
        let GameOutcome::Written { paths, report } = outcome else {
            panic!("fragments attendus");
        };
        assert_eq!(paths.len(), 6);
        assert_eq!(report.frequency.get("all").unwrap().total_draws, 25);
        let first: Vec<String> = paths.iter().map(|p| fs::read_to_string(p).unwrap()).collect();

        run_game(&root, Game::Powerball, today()).unwrap();
        let second: Vec<String> = paths.iter().map(|p| fs::read_to_string(p).unwrap()).collect();
        assert_eq!(first, second);

        for name in ["frequency", "gaps", "patterns", "pairs", "special", "predictions"] {
            assert!(stats_dir(&root, Game::Powerball).join(format!("{name}.json")).exists());
        }
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let root = scratch_dir("batch");
        let mm = game_dir(&root, Game::MegaMillions);
        fs::create_dir_all(&mm).unwrap();
        fs::write(mm.join("index.json"), "pas du json").unwrap();
        for draw in make_test_draws(5) {
            save_draw(&root, Game::Powerball, &draw).unwrap();
        }

        let results = run_games(&root, &Game::ALL, today());
        assert_eq!(results.len(), 2);
        assert!(results[0].1.is_err());
        assert!(matches!(results[1].1, Ok(GameOutcome::Written { .. })));
        fs::remove_dir_all(&root).unwrap();
    }
}
