use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Invalid construction: {0}")]
    InvalidConstruction(String),

    #[error("Invalid die: a die needs at least one side (got {0})")]
    InvalidDie(u32),

    #[error("Entropy failure: {0}")]
    Entropy(String),

    #[error("Unknown character type: {0}")]
    UnknownCharacterType(String),

    #[error("Fight aborted after {rounds} rounds without a winner")]
    RoundLimitExceeded { rounds: u32 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;

/// Failure reported by a fight observer. Never aborts a fight.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ObserverError(pub String);

impl ObserverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
