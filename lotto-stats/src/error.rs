use lotto_db::models::Game;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("aucun tirage à analyser pour {0}")]
    EmptySeries(Game),

    #[error("configuration invalide pour {game} : {reason}")]
    InvalidConfig { game: Game, reason: String },

    #[error("sérialisation du fragment {fragment} impossible : {source}")]
    Serialize {
        fragment: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StatsError>;
