use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Invalid value: {0}")]
    InvalidValueErr(String),
    #[error("Non-convergent value: {0}")]
    NonConvergentErr(String),
    #[error("Not found: {0}")]
    NotFoundErr(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;

impl From<AtlasError> for String {
    fn from(e: AtlasError) -> Self {
        e.to_string()
    }
}
