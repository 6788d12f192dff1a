use thiserror::Error;

#[derive(Debug, Error)]
pub enum MrpError {
    #[error("no input on stdin")]
    EmptyInput,

    #[error("failed to parse JSON run envelope: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML run envelope: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to deserialize input: {0}")]
    InvalidInput(#[source] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
}

pub type MrpResult<T> = Result<T, MrpError>;
