use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use lotto_db::models::{parse_draw_date, validate_draw, Draw, Game};
use lotto_db::store::save_draw;

/// Colonnes attendues : date, n1..nN, boule spéciale (facultative).
fn parse_record(record: &csv::StringRecord, game: Game) -> Result<Draw> {
    let config = game.config();

    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
    };

    let date = parse_draw_date(&get(0)?)?;
    let numbers = (1..=config.pick).map(get_u8).collect::<Result<Vec<u8>>>()?;

    let special = match record.get(config.pick + 1).map(str::trim) {
        None | Some("") => None,
        Some(_) => Some(get_u8(config.pick + 1)?),
    };

    let draw = Draw::new(date, numbers, special);
    validate_draw(&draw, &config)?;
    Ok(draw)
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub replaced: u32,
    pub errors: u32,
}

pub fn import_csv(root: &Path, game: Game, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        replaced: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        let line = result.total_records;
        match record_result {
            Ok(record) => match parse_record(&record, game) {
                Ok(draw) => match save_draw(root, game, &draw) {
                    Ok(true) => result.inserted += 1,
                    Ok(false) => result.replaced += 1,
                    Err(e) => {
                        warn!(%game, line, "erreur d'écriture : {:#}", e);
                        result.errors += 1;
                    }
                },
                Err(e) => {
                    warn!(%game, line, "erreur de parsing : {:#}", e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                warn!(%game, line, "erreur de lecture : {}", e);
                result.errors += 1;
            }
        }
    }

    Ok(result)
}
