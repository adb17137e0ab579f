use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error(transparent)]
    Config(#[from] anyhow::Error),
}
