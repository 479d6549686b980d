use std::ops::RangeInclusive;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    #[value(name = "megamillions")]
    MegaMillions,
    Powerball,
}

impl Game {
    pub const ALL: [Game; 2] = [Game::MegaMillions, Game::Powerball];

    pub fn as_str(&self) -> &'static str {
        match self {
            Game::MegaMillions => "megamillions",
            Game::Powerball => "powerball",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Game::MegaMillions => "Mega Millions",
            Game::Powerball => "Powerball",
        }
    }

    pub fn special_name(&self) -> &'static str {
        match self {
            Game::MegaMillions => "Mega Ball",
            Game::Powerball => "Powerball",
        }
    }

    pub fn config(&self) -> GameConfig {
        match self {
            Game::MegaMillions => GameConfig { min: 1, max: 70, special_min: 1, special_max: 25, pick: 5 },
            Game::Powerball => GameConfig { min: 1, max: 69, special_min: 1, special_max: 26, pick: 5 },
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domaine des numéros d'un jeu. Construit une seule fois puis passé à chaque analyseur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub min: u8,
    pub max: u8,
    pub special_min: u8,
    pub special_max: u8,
    pub pick: usize,
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            bail!("Domaine invalide : min {} > max {}", self.min, self.max);
        }
        if self.special_min > self.special_max {
            bail!(
                "Domaine spécial invalide : min {} > max {}",
                self.special_min,
                self.special_max
            );
        }
        if self.pick == 0 {
            bail!("Le nombre de numéros tirés doit être > 0");
        }
        if self.pick > self.domain_size() {
            bail!(
                "Impossible de tirer {} numéros dans un domaine de {}",
                self.pick,
                self.domain_size()
            );
        }
        Ok(())
    }

    pub fn numbers(&self) -> RangeInclusive<u8> {
        self.min..=self.max
    }

    pub fn specials(&self) -> RangeInclusive<u8> {
        self.special_min..=self.special_max
    }

    pub fn domain_size(&self) -> usize {
        (self.max - self.min) as usize + 1
    }

    pub fn contains(&self, n: u8) -> bool {
        self.numbers().contains(&n)
    }

    pub fn contains_special(&self, n: u8) -> bool {
        self.specials().contains(&n)
    }
}

/// Un tirage normalisé. La boule spéciale (Mega Ball / Powerball) a un seul nom de champ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub date: NaiveDate,
    pub numbers: Vec<u8>,
    pub special: Option<u8>,
}

impl Draw {
    pub fn new(date: NaiveDate, numbers: Vec<u8>, special: Option<u8>) -> Self {
        Self { date, numbers, special }
    }
}

pub fn validate_draw(draw: &Draw, config: &GameConfig) -> Result<()> {
    if draw.numbers.len() != config.pick {
        bail!(
            "{} numéros attendus, {} reçus ({})",
            config.pick,
            draw.numbers.len(),
            draw.date
        );
    }
    for &n in &draw.numbers {
        if !config.contains(n) {
            bail!("Numéro {} hors limites ({}-{})", n, config.min, config.max);
        }
    }
    for i in 0..draw.numbers.len() {
        for j in (i + 1)..draw.numbers.len() {
            if draw.numbers[i] == draw.numbers[j] {
                bail!("Numéro en double : {}", draw.numbers[i]);
            }
        }
    }
    match draw.special {
        Some(s) if !config.contains_special(s) => {
            bail!(
                "Boule spéciale {} hors limites ({}-{})",
                s,
                config.special_min,
                config.special_max
            );
        }
        _ => {}
    }
    Ok(())
}

pub fn parse_draw_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        return Ok(date);
    }
    bail!("Format de date invalide : '{}'", raw)
}
