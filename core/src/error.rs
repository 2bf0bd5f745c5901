use thiserror::Error;

#[derive(Error, Debug)]
pub enum DerbyError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Round {round} already has {lanes} recorded finishes")]
    Overflow { round: usize, lanes: usize },

    #[error("No schedule has been generated for this session")]
    NoSchedule,

    #[error("Competitor '{name}' is not racing in round {round}")]
    UnknownCompetitor { name: String, round: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DerbyResult<T> = Result<T, DerbyError>;
