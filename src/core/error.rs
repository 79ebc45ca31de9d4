use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoBattleError {
    #[error("Unknown auto-battle profile: {0}")]
    UnknownProfile(String),

    #[error("Invalid profile {id}: {reason}")]
    InvalidProfile { id: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AutoBattleError>;
