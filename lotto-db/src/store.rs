use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::models::{Draw, Game};

const INDEX_FILE: &str = "index.json";

pub fn default_data_root() -> PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path
}

pub fn game_dir(root: &Path, game: Game) -> PathBuf {
    root.join(game.as_str())
}

pub fn stats_dir(root: &Path, game: Game) -> PathBuf {
    game_dir(root, game).join("stats")
}

pub fn draw_path(root: &Path, game: Game, date: NaiveDate) -> PathBuf {
    game_dir(root, game).join(format!("{}.json", date.format("%Y-%m-%d")))
}

/// Liste des dates disponibles pour un jeu, triée de la plus récente à la plus ancienne.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawIndex {
    pub game: Game,
    #[serde(default)]
    pub draws: Vec<NaiveDate>,
    #[serde(default)]
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DrawIndex {
    pub fn new(game: Game) -> Self {
        Self { game, draws: Vec::new(), total: 0, updated_at: None }
    }

    /// Ajoute la date si absente. Retourne true si elle a été ajoutée.
    pub fn upsert(&mut self, date: NaiveDate) -> bool {
        let inserted = !self.draws.contains(&date);
        if inserted {
            self.draws.push(date);
            self.draws.sort_by(|a, b| b.cmp(a));
        }
        self.total = self.draws.len();
        inserted
    }
}

/// Fichier de tirage tel que stocké sur disque. Les champs inconnus du moteur
/// (jackpot, gains, multiplicateur, vidéo...) sont conservés tels quels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrawFile {
    draw_date: NaiveDate,
    #[serde(default)]
    numbers: Vec<u8>,
    #[serde(
        default,
        alias = "megaBall",
        alias = "powerBall",
        skip_serializing_if = "Option::is_none"
    )]
    special_ball: Option<u8>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl DrawFile {
    fn into_draw(self) -> Draw {
        Draw {
            date: self.draw_date,
            numbers: self.numbers,
            special: self.special_ball,
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    serde_json::from_str(&json).with_context(|| format!("JSON invalide dans {:?}", path))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Impossible d'écrire {:?}", path))
}

pub fn load_index(root: &Path, game: Game) -> Result<Option<DrawIndex>> {
    let path = game_dir(root, game).join(INDEX_FILE);
    if !path.exists() {
        return Ok(None);
    }
    read_json(&path).map(Some)
}

pub fn load_draw(path: &Path) -> Result<Draw> {
    let file: DrawFile = read_json(path)?;
    Ok(file.into_draw())
}

/// Charge l'historique d'un jeu, trié du plus récent au plus ancien.
/// Un index absent donne une série vide : c'est à l'appelant de décider quoi en faire.
pub fn load_series(root: &Path, game: Game) -> Result<Vec<Draw>> {
    let Some(index) = load_index(root, game)? else {
        warn!(%game, "index introuvable dans {:?}", game_dir(root, game));
        return Ok(Vec::new());
    };

    let mut draws = Vec::with_capacity(index.draws.len());
    for date in &index.draws {
        let path = draw_path(root, game, *date);
        if !path.exists() {
            debug!(%game, %date, "fichier de tirage manquant, ignoré");
            continue;
        }
        let draw = load_draw(&path)?;
        if draw.numbers.is_empty() {
            debug!(%game, %date, "tirage sans numéros, ignoré");
            continue;
        }
        draws.push(draw);
    }

    draws.sort_by(|a, b| b.date.cmp(&a.date));
    draws.dedup_by(|a, b| a.date == b.date);
    Ok(draws)
}

/// Écrit le fichier daté du tirage et met à jour l'index.
/// Retourne true si la date est nouvelle dans l'index.
pub fn save_draw(root: &Path, game: Game, draw: &Draw) -> Result<bool> {
    let dir = game_dir(root, game);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Impossible de créer le répertoire {:?}", dir))?;

    let path = draw_path(root, game, draw.date);
    let mut extra = if path.exists() {
        read_json::<DrawFile>(&path)?.extra
    } else {
        Map::new()
    };
    extra.insert("game".to_string(), Value::String(game.as_str().to_string()));

    let file = DrawFile {
        draw_date: draw.date,
        numbers: draw.numbers.clone(),
        special_ball: draw.special,
        extra,
    };
    write_json(&path, &file)?;

    let mut index = load_index(root, game)?.unwrap_or_else(|| DrawIndex::new(game));
    let inserted = index.upsert(draw.date);
    index.updated_at = Some(Utc::now());
    write_json(&dir.join(INDEX_FILE), &index)?;

    debug!(%game, date = %draw.date, inserted, "tirage enregistré");
    Ok(inserted)
}
