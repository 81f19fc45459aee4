use finatlas::utils::errors::AtlasError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("Error while parsing: {0}")]
    ParsingError(#[from] std::num::ParseFloatError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("AtlasError: {0}")]
    AtlasError(#[from] AtlasError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulatorError>;

impl From<SimulatorError> for String {
    fn from(e: SimulatorError) -> Self {
        e.to_string()
    }
}
