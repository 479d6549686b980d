mod display;
mod import;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::display::{display_draws, display_import_summary, display_report};
use lotto_db::models::Game;
use lotto_db::store::{default_data_root, game_dir, load_series};
use lotto_stats::orchestrator::{run_games, GameOutcome};

#[derive(Parser)]
#[command(name = "lotto", about = "Statistiques Mega Millions et Powerball")]
struct Cli {
    /// Répertoire des données (défaut : ./data)
    #[arg(long, global = true, env = "LOTTO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Générer les fragments de statistiques (tous les jeux si aucun n'est précisé)
    Stats {
        game: Option<Game>,

        /// Afficher un résumé après génération
        #[arg(short, long)]
        summary: bool,
    },

    /// Importer des tirages depuis un fichier CSV (date,n1..n5,spéciale)
    Import {
        #[arg(short, long)]
        game: Game,

        /// Chemin vers le fichier CSV
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Lister les derniers tirages
    List {
        game: Option<Game>,

        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Afficher le répertoire des données
    DataPath {
        game: Option<Game>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn selected_games(game: Option<Game>) -> Vec<Game> {
    match game {
        Some(g) => vec![g],
        None => Game::ALL.to_vec(),
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let root = cli.data_dir.unwrap_or_else(default_data_root);

    match cli.command {
        Command::Stats { game, summary } => cmd_stats(&root, game, summary),
        Command::Import { game, file } => cmd_import(&root, game, &file),
        Command::List { game, last } => cmd_list(&root, game, last),
        Command::DataPath { game } => {
            match game {
                Some(g) => println!("{}", game_dir(&root, g).display()),
                None => println!("{}", root.display()),
            }
            Ok(())
        }
    }
}

fn cmd_stats(root: &Path, game: Option<Game>, summary: bool) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let results = run_games(root, &selected_games(game), today);

    let mut failed = 0;
    for (game, outcome) in results {
        match outcome {
            Ok(GameOutcome::Written { paths, report }) => {
                println!("✅ {} : {} fragments écrits", game.display_name(), paths.len());
                if summary {
                    display_report(game, &report);
                }
            }
            Ok(GameOutcome::Skipped) => {
                println!(
                    "Aucun tirage {}. Lancez d'abord : lotto import --game {} --file <csv>",
                    game.display_name(),
                    game
                );
            }
            Err(_) => failed += 1,
        }
    }

    if failed > 0 {
        bail!("{} jeu(x) en échec", failed);
    }
    Ok(())
}

fn cmd_import(root: &Path, game: Game, file: &Path) -> Result<()> {
    let result = import::import_csv(root, game, file)?;
    display_import_summary(game, &result);
    Ok(())
}

fn cmd_list(root: &Path, game: Option<Game>, last: usize) -> Result<()> {
    for game in selected_games(game) {
        let draws = load_series(root, game)?;
        if draws.is_empty() {
            println!("Aucun tirage {}. Lancez d'abord : lotto import", game.display_name());
            continue;
        }
        display_draws(game, &draws[..last.min(draws.len())]);
    }
    Ok(())
}
